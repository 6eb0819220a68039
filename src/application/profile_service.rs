// Profile service - cached lookups that fall back to a placeholder profile
use crate::application::cache_store::CacheStore;
use crate::application::profile_repository::ProfileRepository;
use crate::domain::profile::{is_valid_username, ProfileError, UserProfile};
use std::sync::Arc;
use std::time::Duration;

pub const PROFILE_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Clone)]
pub struct ProfileService {
    repository: Arc<dyn ProfileRepository>,
    cache: Arc<CacheStore<UserProfile>>,
}

impl ProfileService {
    pub fn new(repository: Arc<dyn ProfileRepository>, cache: Arc<CacheStore<UserProfile>>) -> Self {
        Self { repository, cache }
    }

    /// Store misses and store errors both produce a placeholder, which is cached like a real profile
    pub async fn get_profile(&self, username: &str) -> Result<UserProfile, ProfileError> {
        if !is_valid_username(username) {
            return Err(ProfileError::InvalidUsername(username.to_string()));
        }

        let key = format!("user_{}", username);
        if let Some(profile) = self.cache.get(&key) {
            tracing::debug!(username, "Profile cache hit");
            return Ok(profile);
        }

        let profile = match self.repository.find_profile(username).await {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                tracing::info!(username, "Profile not found, using placeholder");
                UserProfile::placeholder(username)
            }
            Err(e) => {
                tracing::warn!(username, "Profile store error, using placeholder: {:#}", e);
                UserProfile::placeholder(username)
            }
        };

        self.cache.set(key, profile.clone());
        Ok(profile)
    }
}
