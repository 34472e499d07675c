//! Character natural key and slug helpers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use super::Region;

/// Natural key of a character: (name, realm, region)
///
/// Equality and hashing ignore ASCII and Unicode case on `name` and `realm`,
/// matching the unique index on the folded key columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterKey {
    pub name: String,
    pub realm: String,
    pub region: Region,
}

impl CharacterKey {
    /// Create a new key
    pub fn new(name: impl Into<String>, realm: impl Into<String>, region: Region) -> Self {
        Self {
            name: name.into(),
            realm: realm.into(),
            region,
        }
    }

    /// Case-folded name as stored in the unique index
    pub fn name_key(&self) -> String {
        self.name.to_lowercase()
    }

    /// Case-folded realm as stored in the unique index
    pub fn realm_key(&self) -> String {
        self.realm.to_lowercase()
    }

    /// Exact case-insensitive match on name and realm
    pub fn matches(&self, name: &str, realm: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
            && self.realm.to_lowercase() == realm.to_lowercase()
    }
}

impl PartialEq for CharacterKey {
    fn eq(&self, other: &Self) -> bool {
        self.region == other.region && self.matches(&other.name, &other.realm)
    }
}

impl Eq for CharacterKey {}

impl Hash for CharacterKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name_key().hash(state);
        self.realm_key().hash(state);
        self.region.hash(state);
    }
}

impl fmt::Display for CharacterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} ({})", self.name, self.realm, self.region)
    }
}

/// Convert a realm or guild display name into its Battle.net slug
///
/// "Area 52" -> "area-52", "Mal'Ganis" -> "malganis"
pub fn slugify(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| *c != '\'')
                .flat_map(char::to_lowercase)
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
