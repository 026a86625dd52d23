//! JSON-file profile store.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::profile::RawProfile;
use crate::ports::ProfileReader;

/// Profiles stored as `{base_dir}/{user_id}.json`.
pub struct FsProfileStore {
    base_dir: PathBuf,
}

impl FsProfileStore {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    fn file_path(&self, user_id: &UserId) -> PathBuf {
        self.base_dir.join(format!("{}.json", user_id.as_str()))
    }

    /// Writes a profile, replacing any existing one.
    pub async fn save(&self, user_id: &UserId, profile: &RawProfile) -> Result<PathBuf, DomainError> {
        let file_path = self.file_path(user_id);
        fs::create_dir_all(&self.base_dir)
            .await
            .map_err(|e| storage_error(format!("Failed to create directory: {}", e)))?;

        let content = serde_json::to_vec_pretty(profile)
            .map_err(|e| storage_error(format!("Failed to encode profile: {}", e)))?;

        // Write to a temporary file, then rename over the target
        let temp_path = file_path.with_extension("json.tmp");
        fs::write(&temp_path, content)
            .await
            .map_err(|e| storage_error(format!("Failed to write temporary file: {}", e)))?;
        fs::rename(&temp_path, &file_path)
            .await
            .map_err(|e| storage_error(format!("Failed to rename file: {}", e)))?;

        Ok(file_path)
    }
}

fn storage_error(message: String) -> DomainError {
    DomainError::new(ErrorCode::StorageError, message)
}

#[async_trait]
impl ProfileReader for FsProfileStore {
    async fn find(&self, user_id: &UserId) -> Result<Option<RawProfile>, DomainError> {
        let file_path = self.file_path(user_id);

        let content = match fs::read(&file_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(storage_error(format!("Failed to read file: {}", e))),
        };

        serde_json::from_slice(&content).map(Some).map_err(|e| {
            storage_error(format!("Malformed profile file: {}", e))
                .with_detail("user_id", user_id.as_str())
        })
    }
}
