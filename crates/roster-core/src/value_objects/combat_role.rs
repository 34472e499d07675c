//! Combat role derived from specialization

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Specializations that tank
const TANK_SPECS: &[&str] = &["Blood", "Vengeance", "Guardian", "Brewmaster", "Protection"];

/// Specializations that heal
const HEALER_SPECS: &[&str] = &["Restoration", "Holy", "Discipline", "Mistweaver", "Preservation"];

/// Raid role of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CombatRole {
    Tank,
    Healer,
    Dps,
}

impl CombatRole {
    /// Derive the role from a specialization name
    ///
    /// Unknown or missing specs are DPS.
    pub fn from_spec(spec: Option<&str>) -> Self {
        let Some(spec) = spec.map(str::trim) else {
            return Self::Dps;
        };

        if TANK_SPECS.iter().any(|s| s.eq_ignore_ascii_case(spec)) {
            Self::Tank
        } else if HEALER_SPECS.iter().any(|s| s.eq_ignore_ascii_case(spec)) {
            Self::Healer
        } else {
            Self::Dps
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Tank => "TANK",
            Self::Healer => "HEALER",
            Self::Dps => "DPS",
        }
    }
}

impl fmt::Display for CombatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CombatRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TANK" => Ok(Self::Tank),
            "HEALER" => Ok(Self::Healer),
            "DPS" => Ok(Self::Dps),
            other => Err(format!("unknown combat role: {other}")),
        }
    }
}
