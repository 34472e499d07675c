//! User service
//!
//! Minimal user provisioning so token subjects resolve to stored users.

use tracing::{info, instrument};
use uuid::Uuid;

use roster_core::{DomainError, User};

use crate::dto::{CreateUserRequest, UserResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a user
    #[instrument(skip(self, request))]
    pub async fn create_user(&self, request: CreateUserRequest) -> ServiceResult<UserResponse> {
        let display_name = request.display_name.trim();
        if display_name.is_empty() {
            return Err(
                DomainError::ValidationError("display_name must not be blank".to_string()).into(),
            );
        }

        let battletag = request
            .battletag
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty());

        let user = User::new(display_name.to_string(), battletag);
        self.ctx.user_repo().create(&user).await?;

        info!(user_id = %user.id, "User created");

        Ok(UserResponse::from(user))
    }

    /// Get a real user by ID; the placeholder is never exposed
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: Uuid) -> ServiceResult<UserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .filter(|u| !u.is_placeholder)
            .ok_or(DomainError::UserNotFound(user_id))?;

        Ok(UserResponse::from(user))
    }
}
