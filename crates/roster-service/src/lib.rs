//! # roster-service
//!
//! Application layer containing roster reconciliation, character claiming,
//! guild registration, and the DTOs exchanged with the API layer.

pub mod dto;
pub mod services;

pub use services::{
    ClaimService, GuildService, BOOTSTRAP_ROLE, MembershipService, ReconcileService, RosterService,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, SyncSettings, SyncSummary,
    SyncTrigger, UserService,
};
