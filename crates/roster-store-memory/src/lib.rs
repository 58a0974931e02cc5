//! In-memory backend for the Roster store.
//!
//! Keeps every collection in process behind a mutex and delays each read and
//! write by a configurable latency, standing in for a network round trip.

mod seed;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use seed::demo_dataset;
pub use store::MemoryStore;

#[cfg(test)]
mod tests;
