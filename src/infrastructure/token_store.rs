// Auth token resolution - session file, then local file, then the configured default
use crate::infrastructure::config::AuthSettings;
use std::path::Path;

pub fn resolve_auth_token(auth: &AuthSettings) -> String {
    if let Some(token) = auth.session_token_path.as_deref().and_then(read_token) {
        tracing::debug!("Using session auth token");
        return token;
    }
    if let Some(token) = auth.local_token_path.as_deref().and_then(read_token) {
        tracing::debug!("Using persisted auth token");
        return token;
    }
    tracing::debug!("No stored auth token, using default");
    auth.default_token.clone()
}

fn read_token(path: &str) -> Option<String> {
    let contents = std::fs::read_to_string(Path::new(path)).ok()?;
    let token = contents.trim();
    (!token.is_empty()).then(|| token.to_string())
}
