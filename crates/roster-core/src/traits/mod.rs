//! Ports - traits implemented by the persistence and HTTP adapters

mod repositories;
mod sources;

pub use repositories::{
    CharacterRepository, GuildRepository, MembershipRepository, RepoResult, UserRepository,
};
pub use sources::{
    CharacterLookup, CharacterProfile, CharacterSummary, GuildRoster, LinkedCharacter,
    ProfileSource, RosterMember, RosterSource, SourceError, SourceResult,
};
