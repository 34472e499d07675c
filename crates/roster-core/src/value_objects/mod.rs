//! Value objects - immutable types that represent domain concepts

mod character_key;
mod combat_role;
mod guild_role;
mod region;

pub use character_key::{slugify, CharacterKey};
pub use combat_role::CombatRole;
pub use guild_role::GuildRole;
pub use region::{Region, RegionParseError};
