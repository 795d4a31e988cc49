//! User service
//!
//! Staff account management.

use school_common::hash_password;
use school_core::entities::{NewUser, UserChanges};
use school_core::traits::RecordScope;
use school_core::DomainError;
use tracing::{info, instrument};

use crate::dto::{CreateUserRequest, UpdateUserRequest, UserResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> ServiceResult<Vec<UserResponse>> {
        let users = self.ctx.user_repo().list().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> ServiceResult<UserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(id, RecordScope::Active)
            .await?
            .ok_or(DomainError::UserNotFound)?;

        Ok(UserResponse::from(user))
    }

    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn create(&self, request: CreateUserRequest) -> ServiceResult<UserResponse> {
        let password_hash = hash_password(&request.password)?;

        let user = self
            .ctx
            .user_repo()
            .create(&NewUser {
                name: request.name,
                email: request.email,
                password_hash,
            })
            .await?;

        info!(user_id = user.id, "User created");
        Ok(UserResponse::from(user))
    }

    #[instrument(skip(self, request))]
    pub async fn update(&self, id: i64, request: UpdateUserRequest) -> ServiceResult<UserResponse> {
        let password_hash = request.password.as_deref().map(hash_password).transpose()?;

        let user = self
            .ctx
            .user_repo()
            .update(
                id,
                &UserChanges {
                    name: request.name,
                    email: request.email,
                    password_hash,
                },
            )
            .await?;

        info!(user_id = id, "User updated");
        Ok(UserResponse::from(user))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        self.ctx.user_repo().delete(id).await?;
        info!(user_id = id, "User deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn restore(&self, id: i64) -> ServiceResult<UserResponse> {
        let user = self.ctx.user_repo().restore(id).await?;
        info!(user_id = id, "User restored");
        Ok(UserResponse::from(user))
    }
}
