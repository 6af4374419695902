use crate::{gateways::UpstreamError, repositories, util::time::FormatError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The retry policy needs at least one attempt")]
    NoAttempts,
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    #[error(transparent)]
    Repo(#[from] repositories::Error),
    #[error(transparent)]
    Time(#[from] FormatError),
}
