//! Battle.net region

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Battle.net region a guild and its characters live in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Us,
    Eu,
    Kr,
    Tw,
    Cn,
}

impl Region {
    /// All supported regions
    pub const ALL: [Region; 5] = [Self::Us, Self::Eu, Self::Kr, Self::Tw, Self::Cn];

    /// Lowercase region code as used in API hosts and namespaces
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Us => "us",
            Self::Eu => "eu",
            Self::Kr => "kr",
            Self::Tw => "tw",
            Self::Cn => "cn",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = RegionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "us" => Ok(Self::Us),
            "eu" => Ok(Self::Eu),
            "kr" => Ok(Self::Kr),
            "tw" => Ok(Self::Tw),
            "cn" => Ok(Self::Cn),
            _ => Err(RegionParseError(s.to_string())),
        }
    }
}

/// Error returned when a region code is not recognized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown region: {0}")]
pub struct RegionParseError(pub String);
