// Repository trait for the profile backing store
use crate::domain::profile::UserProfile;
use async_trait::async_trait;

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// `Ok(None)` when the store has no such user
    async fn find_profile(&self, username: &str) -> anyhow::Result<Option<UserProfile>>;
}
