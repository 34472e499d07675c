//! # roster-clients
//!
//! HTTP implementations of the roster-core source ports:
//!
//! - [`BlizzardClient`]: guild roster, character profile and account
//!   character list, authenticated with a cached client-credentials token
//! - [`RaiderIoClient`]: public character lookup used for avatar and spec
//!
//! Every outbound GET goes through [`RetryPolicy`], which retries transient
//! failures with jittered exponential backoff.

pub mod blizzard;
mod http;
pub mod raiderio;
pub mod retry;

pub use blizzard::{BlizzardClient, TokenCache};
pub use raiderio::RaiderIoClient;
pub use retry::RetryPolicy;
