//! Repository trait for visit persistence.

use crate::domain::entities::{NewVisit, Visit};
use crate::error::AppError;
use async_trait::async_trait;

/// Append-only store for visit records.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgVisitRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisitRepository: Send + Sync {
    /// Inserts a new visit row.
    ///
    /// Visits are immutable once written; there are no update operations.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors. Callers on the
    /// redirect path treat failures as log-and-drop.
    async fn insert(&self, new_visit: NewVisit) -> Result<Visit, AppError>;
}
