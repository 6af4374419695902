mod error;
mod fetch;
mod list;
mod merge;
mod preview;
mod transform;


pub use self::{
    error::Error, fetch::*, list::*, merge::*, preview::*, transform::*,
};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{entities::*, gateways::*, repositories::*};
}
