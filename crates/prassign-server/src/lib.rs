//! Server module.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod api;
pub mod errors;
mod health;
mod metrics;
pub mod server;
#[cfg(test)]
mod testutils;

pub use errors::{ApiError, Result, ServerError};
