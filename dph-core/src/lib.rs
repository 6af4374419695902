//! # dph-core
//!
//! The harvesting usecases and the abstract gateways and
//! repositories they depend on.

pub mod gateways;
pub mod repositories;
pub mod usecases;
pub mod util;

pub mod entities {
    pub use dph_entities::{
        address::*, category::*, element::*, id::*, location::*,
    };
}
