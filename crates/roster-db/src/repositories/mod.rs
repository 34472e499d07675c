//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in roster-core.

mod character;
mod error;
mod guild;
mod membership;
mod user;

pub use character::PgCharacterRepository;
pub use guild::PgGuildRepository;
pub use membership::PgMembershipRepository;
pub use user::PgUserRepository;
