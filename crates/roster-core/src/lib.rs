//! Core types, the repository trait, and the assignment engine for Roster.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement [`store::ResourceStore`]; everything else in
//! here is either plain data, a pure resolver over loaded collections, or a
//! workflow written against that trait.

pub mod client;
pub mod consultant;
pub mod contract;
pub mod error;
pub mod resolve;
pub mod role;
pub mod snapshot;
pub mod store;
pub mod timeline;
pub mod validate;
pub mod workflow;

pub use error::{Error, Result};
