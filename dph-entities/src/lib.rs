#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # dph-entities
//!
//! Reusable, agnostic domain entities for the date planner harvest.
//!
//! The entities only contain generic functionality that does not reveal any
//! harvesting policy. Category inference, address composition and link
//! selection live in `dph-core`.

pub mod address;
pub mod category;
pub mod element;
pub mod id;
pub mod location;

#[cfg(any(test, feature = "builders"))]
pub mod builders;
