//! Shared types for the luwei ordering system
//!
//! Everything that crosses a crate boundary lives here:
//!
//! - **Models** (`models`): Product, Member, Order, OrderItem
//! - **Errors** (`error`): unified error codes, [`AppError`], [`ApiResponse`]
//! - **Messages** (`message`): realtime event payloads pushed to viewers
//! - **Utilities** (`util`): timestamps

pub mod error;
pub mod message;
pub mod models;
pub mod util;

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use message::RealtimeMessage;
