//! Implementations of the `dph-core` gateways and repositories.

pub mod json_file;
pub mod overpass;
