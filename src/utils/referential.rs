//! Referential validation.
//!
//! Every "this must exist" and "this must not exist yet" rule in the services
//! goes through [`validate_record`], which runs a single [`FindOne`] lookup and
//! turns the outcome into the right [`AppError`].
//!
//! ```ignore
//! let course = require(store, &ById::<Course>::new(course_id), "Course not found").await?;
//!
//! validate_record(
//!     store,
//!     &OfferingSlot { semester_registration_id, course_id, section },
//!     Check::absent("Offered course already exists").failing_with(ErrorKind::DuplicateOffering),
//! )
//! .await?;
//! ```

use campusbyte_core::{AppError, ErrorKind};
use campusbyte_db::{FindOne, Lookup};

/// Whether the lookup is expected to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Exists,
    Absent,
}

/// An expectation about a lookup and the failure reported when it does not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Check {
    pub presence: Presence,
    pub kind: ErrorKind,
    pub message: &'static str,
}

impl Check {
    /// The record must exist. Fails with `NotFound` by default.
    pub const fn exists(message: &'static str) -> Self {
        Self {
            presence: Presence::Exists,
            kind: ErrorKind::NotFound,
            message,
        }
    }

    /// No record may match. Fails with `Conflict` by default.
    pub const fn absent(message: &'static str) -> Self {
        Self {
            presence: Presence::Absent,
            kind: ErrorKind::Conflict,
            message,
        }
    }

    pub const fn failing_with(self, kind: ErrorKind) -> Self {
        Self { kind, ..self }
    }

    fn fail(&self) -> AppError {
        AppError::new(self.kind, anyhow::Error::msg(self.message))
    }
}

/// Runs `lookup` and enforces `check`.
///
/// Returns the matched record when it was expected to exist, `None` when it
/// was expected to be absent.
pub async fn validate_record<S, L>(
    store: &S,
    lookup: &L,
    check: Check,
) -> Result<Option<L::Record>, AppError>
where
    S: FindOne<L> + ?Sized,
    L: Lookup,
{
    let found = store.find_one(lookup).await?;
    match (check.presence, found) {
        (Presence::Exists, Some(record)) => Ok(Some(record)),
        (Presence::Absent, None) => Ok(None),
        _ => Err(check.fail()),
    }
}

/// Fetches a record that must exist, failing with `NotFound` and `message`.
pub async fn require<S, L>(store: &S, lookup: &L, message: &'static str) -> Result<L::Record, AppError>
where
    S: FindOne<L> + ?Sized,
    L: Lookup,
{
    store
        .find_one(lookup)
        .await?
        .ok_or_else(|| Check::exists(message).fail())
}
