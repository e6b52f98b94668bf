//! Storage layer
//!
//! Embedded redb database plus typed repositories on top of it.

pub mod repository;
mod store;

pub use store::{Store, StoreError, StoreResult};
