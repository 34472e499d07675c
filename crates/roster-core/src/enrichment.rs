//! Enrichment fallback chains
//!
//! Each enrichable field is resolved from an ordered list of candidates,
//! one per source, evaluated in priority order. The first candidate carrying
//! a value wins. Fields are resolved independently of each other.

use serde::Serialize;

use crate::traits::{CharacterProfile, CharacterSummary, RosterMember};
use crate::value_objects::CombatRole;

/// Literal used when no source knows a text field
pub const UNKNOWN: &str = "Unknown";

/// Where a resolved value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSource {
    /// Detailed character profile (Blizzard)
    Profile,
    /// Secondary lookup (Raider.IO)
    RaiderIo,
    /// Coarse value from the guild roster listing
    Roster,
    /// Nothing known
    Default,
}

/// One `(source, value)` entry of a fallback chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<T> {
    pub source: FieldSource,
    pub value: Option<T>,
}

/// The winning candidate of a fallback chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolved<T> {
    pub source: FieldSource,
    pub value: T,
}

impl<T> Resolved<T> {
    /// True when the value came from a real source rather than the default
    #[inline]
    pub fn is_known(&self) -> bool {
        self.source != FieldSource::Default
    }
}

/// Ordered list of candidates, highest priority first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackChain<T> {
    candidates: Vec<Candidate<T>>,
}

impl<T> Default for FallbackChain<T> {
    fn default() -> Self {
        Self {
            candidates: Vec::new(),
        }
    }
}

impl<T> FallbackChain<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a lower-priority candidate
    pub fn then(mut self, source: FieldSource, value: Option<T>) -> Self {
        self.candidates.push(Candidate { source, value });
        self
    }

    pub fn candidates(&self) -> &[Candidate<T>] {
        &self.candidates
    }

    /// First candidate holding a value, if any
    pub fn resolve(self) -> Option<Resolved<T>> {
        self.candidates
            .into_iter()
            .find_map(|c| c.value.map(|value| Resolved { source: c.source, value }))
    }

    /// Resolve, falling back to `default` tagged as [`FieldSource::Default`]
    pub fn resolve_or(self, default: T) -> Resolved<T> {
        self.resolve().unwrap_or(Resolved {
            source: FieldSource::Default,
            value: default,
        })
    }
}

impl FallbackChain<String> {
    /// Append a text candidate; blank strings count as missing
    pub fn then_text(self, source: FieldSource, value: Option<&str>) -> Self {
        let value = value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);
        self.then(source, value)
    }

    /// Resolve, falling back to the literal [`UNKNOWN`]
    pub fn resolve_or_unknown(self) -> Resolved<String> {
        self.resolve_or(UNKNOWN.to_string())
    }
}

/// Fully resolved enrichment for one roster member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrichment {
    pub class: Resolved<String>,
    pub spec: Resolved<String>,
    pub item_level: Option<Resolved<i32>>,
    pub avatar_url: Option<String>,
    pub role: CombatRole,
}

impl Enrichment {
    /// Class to persist; `None` means keep whatever is stored
    pub fn known_class(&self) -> Option<&str> {
        self.class.is_known().then_some(self.class.value.as_str())
    }
}

/// Merge the roster entry with whatever enrichment lookups succeeded
///
/// class: profile, secondary, roster, "Unknown".
/// spec: profile, secondary, "Unknown".
/// item level: profile, secondary, roster, none.
pub fn resolve_enrichment(
    member: &RosterMember,
    profile: Option<&CharacterProfile>,
    summary: Option<&CharacterSummary>,
) -> Enrichment {
    let class = FallbackChain::new()
        .then_text(FieldSource::Profile, profile.and_then(|p| p.class.as_deref()))
        .then_text(FieldSource::RaiderIo, summary.and_then(|s| s.class.as_deref()))
        .then_text(FieldSource::Roster, member.class.as_deref())
        .resolve_or_unknown();

    let spec = FallbackChain::new()
        .then_text(FieldSource::Profile, profile.and_then(|p| p.active_spec.as_deref()))
        .then_text(FieldSource::RaiderIo, summary.and_then(|s| s.spec.as_deref()))
        .resolve_or_unknown();

    let item_level = FallbackChain::new()
        .then(FieldSource::Profile, profile.and_then(|p| p.item_level))
        .then(FieldSource::RaiderIo, summary.and_then(|s| s.item_level))
        .then(FieldSource::Roster, member.item_level)
        .resolve();

    let role = CombatRole::from_spec(spec.is_known().then_some(spec.value.as_str()));

    Enrichment {
        class,
        spec,
        item_level,
        avatar_url: summary.and_then(|s| s.avatar_url.clone()),
        role,
    }
}
