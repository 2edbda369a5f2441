//! Shared helpers for the feature modules.
//!
//! - [`referential`]: existence and absence checks against the store
//! - [`store_errors`]: turning store failures into domain errors

pub mod referential;
pub mod store_errors;
