//! # Campusbyte Core
//!
//! Core types, errors, and utilities for the Campusbyte API.
//!
//! - [`errors`]: Application error type, the domain failure taxonomy and HTTP conversion
//! - [`pagination`]: Pagination utilities for API responses
//! - [`password`]: Password hashing and verification
//! - [`serde`]: Custom serde deserialization helpers for query strings
//!
//! # Example
//!
//! ```ignore
//! use campusbyte_core::errors::{AppError, ErrorKind};
//!
//! let error = AppError::schedule_conflict(anyhow::anyhow!("Faculty is not available at that time"));
//! assert_eq!(error.kind, ErrorKind::ScheduleConflict);
//! ```

pub mod errors;
pub mod pagination;
pub mod password;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorKind, ErrorResponse};
pub use pagination::{PaginationMeta, PaginationParams};
pub use password::{hash_password, hash_password_with_cost, verify_password};
