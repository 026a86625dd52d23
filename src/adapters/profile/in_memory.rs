//! In-memory profile store for tests and local runs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::profile::RawProfile;
use crate::ports::ProfileReader;

#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileStore {
    profiles: Arc<RwLock<HashMap<UserId, RawProfile>>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, user_id: UserId, profile: RawProfile) {
        self.profiles.write().await.insert(user_id, profile);
    }
}

#[async_trait]
impl ProfileReader for InMemoryProfileStore {
    async fn find(&self, user_id: &UserId) -> Result<Option<RawProfile>, DomainError> {
        Ok(self.profiles.read().await.get(user_id).cloned())
    }
}
