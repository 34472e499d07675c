//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! reconciliation, claiming, access checks, and queries.

pub mod claim;
pub mod context;
pub mod error;
pub mod guild;
pub mod membership;
pub mod reconcile;
pub mod roster;
pub mod user;

pub use claim::ClaimService;
pub use context::{PlaceholderUser, ServiceContext, ServiceContextBuilder, SyncSettings};
pub use error::{ServiceError, ServiceResult};
pub use guild::{GuildService, BOOTSTRAP_ROLE};
pub use membership::MembershipService;
pub use reconcile::{ReconcileService, SyncSummary, SyncTrigger};
pub use roster::RosterService;
pub use user::UserService;
