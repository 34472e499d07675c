//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod claim;
pub mod guilds;
pub mod health;
pub mod roster;
pub mod sync;
pub mod users;
