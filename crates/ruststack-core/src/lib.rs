//! Core building blocks shared by RustStack service implementations.
//!
//! This crate provides the keyed [`ResourceStore`] that service backends hold
//! their resources in, the infrastructure error type, and tracing setup.

mod error;
mod logging;
mod store;

pub use error::{RustStackError, RustStackResult};
pub use logging::init_tracing;
pub use store::ResourceStore;
