//! # roster-db
//!
//! Database layer implementing the roster-core repository traits with PostgreSQL via SQLx.
//!
//! - Connection pool management and startup migrations
//! - Database models with SQLx `FromRow` derives
//! - Model -> entity mappers
//! - Repository implementations
//!
//! ```rust,ignore
//! use roster_db::{create_pool, run_migrations, PgCharacterRepository, PoolConfig};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig::from_env()).await?;
//!     run_migrations(&pool, "./migrations").await?;
//!     let characters = PgCharacterRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, PgPool, PoolConfig};
pub use repositories::{
    PgCharacterRepository, PgGuildRepository, PgMembershipRepository, PgUserRepository,
};
