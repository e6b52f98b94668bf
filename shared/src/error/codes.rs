//! Unified error codes
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Order errors
//! - 6xxx: Product errors
//! - 7xxx: Member / loyalty errors
//! - 9xxx: System errors

use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Represented as u16 on the wire for cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order is empty
    OrderEmpty = 4007,

    // ==================== 6xxx: Product ====================
    /// Product not found
    ProductNotFound = 6001,

    // ==================== 7xxx: Member ====================
    /// Member not found
    MemberNotFound = 7001,
    /// Point balance too low for the requested debit
    InsufficientPoints = 7002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

/// Error category, used for logging decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    General,
    Order,
    Product,
    Member,
    System,
}

impl ErrorCode {
    /// Numeric code
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Default human-readable message for this code
    pub fn message(self) -> &'static str {
        match self {
            Self::Success => "OK",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::RequiredField => "Required field missing",
            Self::OrderNotFound => "Order not found",
            Self::OrderEmpty => "Order has no items",
            Self::ProductNotFound => "Product not found",
            Self::MemberNotFound => "Member not found",
            Self::InsufficientPoints => "Insufficient points",
            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
        }
    }

    /// Category this code belongs to
    pub fn category(self) -> ErrorCategory {
        match self.code() {
            4000..=4999 => ErrorCategory::Order,
            6000..=6999 => ErrorCategory::Product,
            7000..=7999 => ErrorCategory::Member,
            9000..=9999 => ErrorCategory::System,
            _ => ErrorCategory::General,
        }
    }

    /// HTTP status code for this error
    ///
    /// `ProductNotFound` maps to 400 rather than 404: it surfaces during
    /// order validation, where the request as a whole is rejected.
    pub fn http_status(self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,
            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::RequiredField
            | Self::OrderEmpty
            | Self::ProductNotFound
            | Self::InsufficientPoints => StatusCode::BAD_REQUEST,
            Self::NotFound | Self::OrderNotFound | Self::MemberNotFound => StatusCode::NOT_FOUND,
            Self::AlreadyExists => StatusCode::CONFLICT,
            Self::Unknown | Self::InternalError | Self::DatabaseError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code as u16
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Success),
            1 => Ok(Self::Unknown),
            2 => Ok(Self::ValidationFailed),
            3 => Ok(Self::NotFound),
            4 => Ok(Self::AlreadyExists),
            5 => Ok(Self::InvalidRequest),
            7 => Ok(Self::RequiredField),
            4001 => Ok(Self::OrderNotFound),
            4007 => Ok(Self::OrderEmpty),
            6001 => Ok(Self::ProductNotFound),
            7001 => Ok(Self::MemberNotFound),
            7002 => Ok(Self::InsufficientPoints),
            9001 => Ok(Self::InternalError),
            9002 => Ok(Self::DatabaseError),
            other => Err(format!("Unknown error code: {}", other)),
        }
    }
}
