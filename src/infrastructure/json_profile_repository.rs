// Profile store backed by a JSON file, read on every lookup
use crate::application::profile_repository::ProfileRepository;
use crate::domain::profile::UserProfile;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct JsonProfileRepository {
    path: PathBuf,
}

impl JsonProfileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ProfileRepository for JsonProfileRepository {
    async fn find_profile(&self, username: &str) -> Result<Option<UserProfile>> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read profile store {}", self.path.display()))?;

        let profiles: Vec<UserProfile> =
            serde_json::from_str(&contents).context("Failed to parse profile store")?;

        Ok(profiles.into_iter().find(|p| p.username == username))
    }
}
