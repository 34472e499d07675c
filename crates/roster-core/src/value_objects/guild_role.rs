//! Local guild role used for authorization

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role a user holds in a guild, derived from in-game guild rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GuildRole {
    Gm,
    Officer,
    Member,
    Trialist,
}

impl GuildRole {
    /// Map an in-game guild rank (0 = guild master) to a local role
    ///
    /// Rank 0 is GM, rank 1 is Officer, everything else is Member.
    /// Trialist is never derived; it can only be assigned directly.
    #[must_use]
    pub const fn from_guild_rank(rank: i32) -> Self {
        match rank {
            0 => Self::Gm,
            1 => Self::Officer,
            _ => Self::Member,
        }
    }

    /// Authority level, lower is more authority
    #[must_use]
    pub const fn authority(&self) -> u8 {
        match self {
            Self::Gm => 0,
            Self::Officer => 1,
            Self::Member => 2,
            Self::Trialist => 3,
        }
    }

    /// True for roles allowed to run officer tooling
    #[inline]
    #[must_use]
    pub const fn is_officer_or_above(&self) -> bool {
        matches!(self, Self::Gm | Self::Officer)
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Gm => "GM",
            Self::Officer => "OFFICER",
            Self::Member => "MEMBER",
            Self::Trialist => "TRIALIST",
        }
    }
}

impl fmt::Display for GuildRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GuildRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GM" => Ok(Self::Gm),
            "OFFICER" => Ok(Self::Officer),
            "MEMBER" => Ok(Self::Member),
            "TRIALIST" => Ok(Self::Trialist),
            other => Err(format!("unknown guild role: {other}")),
        }
    }
}
