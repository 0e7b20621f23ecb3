//! Repository trait for link data access.

use crate::domain::entities::Link;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for reading links on the redirect path.
///
/// Link and rule mutation is owned by the surrounding application; the
/// redirect core only ever reads.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Finds an active link by its short code, rules included in stored order.
    ///
    /// Inactive links are treated as absent: deactivation stops redirection
    /// without deleting history.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if an active link with this code exists
    /// - `Ok(None)` if the code is unknown or the link is inactive
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_active_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Finds a link by id regardless of its active flag.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError>;
}
