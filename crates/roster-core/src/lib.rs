//! # roster-core
//!
//! Domain layer containing entities, value objects, enrichment fallback chains,
//! and the ports (repository and external source traits) used by reconciliation.
//! This crate has zero dependencies on infrastructure (database, HTTP, web framework).

pub mod enrichment;
pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use enrichment::{resolve_enrichment, Candidate, Enrichment, FallbackChain, FieldSource, Resolved, UNKNOWN};
pub use entities::{Character, CharacterUpsert, Guild, GuildMembership, User};
pub use error::DomainError;
pub use traits::{
    CharacterLookup, CharacterProfile, CharacterRepository, CharacterSummary, GuildRepository,
    GuildRoster, LinkedCharacter, MembershipRepository, ProfileSource, RepoResult, RosterMember,
    RosterSource, SourceError, SourceResult, UserRepository,
};
pub use value_objects::{slugify, CharacterKey, CombatRole, GuildRole, Region, RegionParseError};
