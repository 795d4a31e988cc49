//! Authentication service
//!
//! Handles registration, login, and resolving bearer tokens to accounts.

use school_common::{hash_password, verify_password, AppError};
use school_core::entities::{NewUser, User};
use school_core::traits::RecordScope;
use tracing::{info, instrument, warn};

use crate::dto::{LoginRequest, RegisterRequest, TokenResponse, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new account and sign it in
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<TokenResponse> {
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

        info!(user_id = user.id, "User registered");

        self.token_for(user)
    }

    /// Exchange credentials for a token.
    ///
    /// Every mismatch yields the same `LoginFailed` error so the response does
    /// not reveal whether the account exists.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<TokenResponse> {
        let Some(password_hash) = self.ctx.user_repo().get_password_hash(&request.username).await? else {
            warn!("Login failed: unknown or inactive account");
            return Err(AppError::LoginFailed.into());
        };

        let valid = verify_password(&request.password, &password_hash).unwrap_or_else(|e| {
            warn!(error = %e, "Stored password hash is unreadable");
            false
        });
        if !valid {
            warn!("Login failed: password mismatch");
            return Err(AppError::LoginFailed.into());
        }

        let user = self
            .ctx
            .user_repo()
            .find_by_email(&request.username, RecordScope::Active)
            .await?
            .ok_or(AppError::LoginFailed)?;

        info!(user_id = user.id, "User logged in");

        self.token_for(user)
    }

    /// Resolve a bearer token to an active account.
    ///
    /// # Errors
    /// `InvalidCredential` for a bad token or unknown subject, `InactiveAccount`
    /// when the account has been soft-deleted.
    #[instrument(skip(self, token))]
    pub async fn authenticate(&self, token: &str) -> ServiceResult<User> {
        let email = self.ctx.jwt_service().verify_subject(token)?;

        let user = self
            .ctx
            .user_repo()
            .find_by_email(&email, RecordScope::WithDeleted)
            .await?
            .ok_or(AppError::InvalidCredential)?;

        if !user.is_active() {
            warn!(user_id = user.id, "Token presented for inactive account");
            return Err(ServiceError::App(AppError::InactiveAccount));
        }

        Ok(user)
    }

    fn token_for(&self, user: User) -> ServiceResult<TokenResponse> {
        let token = self.ctx.jwt_service().issue(&user.email)?;
        Ok(TokenResponse::bearer(
            token.token,
            token.expires_in,
            UserResponse::from(user),
        ))
    }
}
