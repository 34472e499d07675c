//! Integration test utilities for the roster API
//!
//! Spawns the real server against PostgreSQL with the Battle.net and
//! Raider.IO endpoints pointed at a local mock server.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
