//! Domain entities - core business objects

mod character;
mod guild;
mod membership;
mod user;

pub use character::{Character, CharacterUpsert};
pub use guild::Guild;
pub use membership::GuildMembership;
pub use user::User;
