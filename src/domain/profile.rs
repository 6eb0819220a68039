// User profile domain model
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 30;
const ROLES: [&str; 3] = ["analyst", "operator", "viewer"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub username: String,
    pub display_name: String,
    pub role: String,
    pub member_since: NaiveDate,
    pub avatar_color: String,
    /// Set on profiles derived from the username because the store had nothing
    #[serde(default)]
    pub is_placeholder: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("invalid username '{0}': expected 3-30 letters, digits or underscores")]
    InvalidUsername(String),
}

/// Matches `^[a-zA-Z0-9_]{3,30}$`
pub fn is_valid_username(username: &str) -> bool {
    (USERNAME_MIN..=USERNAME_MAX).contains(&username.len())
        && username
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

impl UserProfile {
    /// Deterministic stand-in profile; the same username always yields the same profile
    pub fn placeholder(username: &str) -> Self {
        let seed = fnv1a(username.as_bytes());
        let epoch = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default();
        let member_since = epoch
            .checked_add_days(Days::new(seed % 1825))
            .unwrap_or(epoch);

        Self {
            username: username.to_string(),
            display_name: Self::format_display_name(username),
            role: ROLES[(seed % ROLES.len() as u64) as usize].to_string(),
            member_since,
            avatar_color: format!("#{:06x}", (seed >> 16) & 0xFF_FFFF),
            is_placeholder: true,
        }
    }

    fn format_display_name(username: &str) -> String {
        // Convert "jane_doe" to "Jane Doe"
        username
            .split('_')
            .filter(|part| !part.is_empty())
            .map(|part| {
                let mut chars = part.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0xcbf2_9ce4_8422_2325, |hash, b| {
        (hash ^ u64::from(*b)).wrapping_mul(0x0100_0000_01b3)
    })
}
