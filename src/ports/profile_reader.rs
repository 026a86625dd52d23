//! ProfileReader port for looking up stored user profiles

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::profile::RawProfile;

/// Read-only access to the user profile store.
///
/// Profiles are returned unvalidated; the caller validates them.
#[async_trait]
pub trait ProfileReader: Send + Sync {
    async fn find(&self, user_id: &UserId) -> Result<Option<RawProfile>, DomainError>;
}
