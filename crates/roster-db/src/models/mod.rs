//! Database models - SQLx-compatible structs for PostgreSQL tables

mod character;
mod guild;
mod membership;
mod user;

pub use character::CharacterModel;
pub use guild::GuildModel;
pub use membership::MembershipModel;
pub use user::UserModel;
