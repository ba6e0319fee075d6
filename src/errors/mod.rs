//! Centralized error handling module
//!
//! Request-path failures (decode, delivery, confirmation) and startup failures
//! share one typed error so the HTTP layer can turn any of them into a 500.

pub mod types;

pub use types::{AppError, AppResult};
