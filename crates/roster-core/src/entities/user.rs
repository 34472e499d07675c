//! User entity

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Display name of the synthetic owner of unclaimed characters
pub const PLACEHOLDER_DISPLAY_NAME: &str = "Unclaimed Characters";

/// User entity - an authenticated person, or the placeholder owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub display_name: String,
    pub battletag: Option<String>,
    pub is_placeholder: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new real user
    pub fn new(display_name: String, battletag: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            display_name,
            battletag,
            is_placeholder: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create the placeholder user record
    pub fn placeholder() -> Self {
        Self {
            is_placeholder: true,
            ..Self::new(PLACEHOLDER_DISPLAY_NAME.to_string(), None)
        }
    }
}
