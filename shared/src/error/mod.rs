//! Unified error handling
//!
//! A single error code space shared by the order server, the printer bridge
//! and any frontend. See [`ErrorCode`] for the code layout and [`AppError`]
//! for the error type returned by API handlers.

mod codes;
mod types;

pub use codes::{ErrorCategory, ErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
