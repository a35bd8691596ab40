//! Authentication service
//!
//! Owns registration, login, password change, and the refresh-token
//! rotation state machine.
//!
//! Registration runs inside the process-wide gate so the existence check
//! and the insert commit as one serialized sequence. Refresh rotation
//! instead relies on the store's row-level conflict detection: rotations
//! are frequent and a global lock there would serialize every session
//! renewal in the process.

use chrono::Utc;
use tracing::{info, instrument, warn};
use validator::Validate;

use geoquiz_common::auth::{
    generate_refresh_value, hash_password, validate_email, validate_password_strength,
    verify_password,
};
use geoquiz_common::AppError;
use geoquiz_core::entities::{RefreshToken, User};
use geoquiz_core::value_objects::Snowflake;
use geoquiz_core::DomainError;

use crate::dto::{
    AuthResponse, ChangePasswordRequest, LoginRequest, RefreshTokenRequest, RegisterRequest,
    UserResponse,
};

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

    /// Register a new user
    ///
    /// Validation happens before any I/O. The existence check and the
    /// insert run under the registration gate, so two near-simultaneous
    /// registrations with the same email cannot both pass the check.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;
        validate_email(&request.email)?;
        validate_password_strength(&request.password)?;

        let password_hash = hash_password(&request.password)?;

        let _gate = self.ctx.registration_gate().acquire().await;

        let user = self
            .ctx
            .retry()
            .execute(|| async {
                if self.ctx.user_repo().email_exists(&request.email).await? {
                    return Err(DomainError::EmailAlreadyExists);
                }

                let user = User::new(
                    self.ctx.generate_id(),
                    request.email.clone(),
                    request.name.clone(),
                );
                self.ctx.user_repo().create(&user, &password_hash).await?;
                Ok(user)
            })
            .await
            .map_err(|e| match e {
                DomainError::EmailAlreadyExists | DomainError::UniqueViolation(_) => {
                    ServiceError::conflict("Email already registered")
                }
                other => ServiceError::Domain(other),
            })?;

        info!(user_id = %user.id, "user registered");

        self.issue_session(&user).await
    }

    /// Login with email and password
    ///
    /// Unknown email and wrong password produce the identical error, to
    /// avoid user enumeration.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let mut user = self
            .ctx
            .user_repo()
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                warn!("login failed: unknown email");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "login failed: no password credential");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        if !verify_password(&request.password, &password_hash)? {
            warn!(user_id = %user.id, "login failed: wrong password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        let login_at = self.ctx.clock().next();
        self.ctx
            .retry()
            .execute(|| async { self.ctx.user_repo().update_last_login(user.id, login_at).await })
            .await?;
        user.last_login_at = Some(login_at);

        info!(user_id = %user.id, "user logged in");

        self.issue_session(&user).await
    }

    /// Rotate a refresh token, returning a fresh access/refresh pair
    ///
    /// State machine per token: Active -> Revoked, terminal. Under
    /// concurrent refresh of the same token exactly one caller claims it;
    /// everyone else gets the uniform invalid-token error. Revoked,
    /// expired, and unknown tokens are indistinguishable to the caller.
    #[instrument(skip(self, request))]
    pub async fn refresh_tokens(&self, request: RefreshTokenRequest) -> ServiceResult<AuthResponse> {
        let ttl = self.ctx.jwt_service().refresh_token_ttl();

        let rotated = self
            .ctx
            .retry()
            .execute(|| async {
                let Some(existing) = self
                    .ctx
                    .refresh_token_repo()
                    .find_by_token(&request.refresh_token)
                    .await?
                else {
                    return Ok(None);
                };

                let replacement = RefreshToken::new(
                    self.ctx.generate_id(),
                    generate_refresh_value(),
                    existing.user_id,
                    Utc::now() + ttl,
                );

                if self
                    .ctx
                    .refresh_token_repo()
                    .rotate(&request.refresh_token, &replacement)
                    .await?
                {
                    Ok(Some(replacement))
                } else {
                    Ok(None)
                }
            })
            .await?;

        let replacement = rotated.ok_or_else(|| {
            warn!("refresh rejected: token not claimable");
            ServiceError::Domain(DomainError::InvalidRefreshToken)
        })?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(replacement.user_id)
            .await?
            .ok_or(ServiceError::Domain(DomainError::InvalidRefreshToken))?;

        let access_token = self.ctx.jwt_service().sign_access_token(user.id)?;

        info!(user_id = %user.id, "refresh token rotated");

        Ok(AuthResponse::new(
            access_token,
            replacement.token,
            self.ctx.jwt_service().access_token_expiry(),
            UserResponse::from(&user),
        ))
    }

    /// Revoke one refresh token; `Ok(false)` when there was nothing to revoke
    #[instrument(skip(self, token))]
    pub async fn revoke_refresh_token(&self, token: &str) -> ServiceResult<bool> {
        let revoked = self.ctx.refresh_token_repo().revoke(token).await?;
        if revoked {
            info!("refresh token revoked");
        }
        Ok(revoked)
    }

    /// Revoke every active token of one user; `Ok(false)` when none existed
    #[instrument(skip(self))]
    pub async fn revoke_all_user_tokens(&self, user_id: Snowflake) -> ServiceResult<bool> {
        let revoked = self
            .ctx
            .refresh_token_repo()
            .revoke_all_for_user(user_id)
            .await?;
        info!(user_id = %user_id, revoked, "revoked all refresh tokens");
        Ok(revoked > 0)
    }

    /// Change a user's password after verifying the current one
    #[instrument(skip(self, request))]
    pub async fn change_password(
        &self,
        user_id: Snowflake,
        request: ChangePasswordRequest,
    ) -> ServiceResult<bool> {
        validate_password_strength(&request.new_password)?;

        let current_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        if !verify_password(&request.current_password, &current_hash)? {
            warn!(user_id = %user_id, "password change rejected: wrong current password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        let new_hash = hash_password(&request.new_password)?;
        self.ctx
            .retry()
            .execute(|| async { self.ctx.user_repo().update_password(user_id, &new_hash).await })
            .await?;

        info!(user_id = %user_id, "password changed");
        Ok(true)
    }

    /// Sign an access token and persist a fresh refresh token for `user`
    async fn issue_session(&self, user: &User) -> ServiceResult<AuthResponse> {
        let access_token = self.ctx.jwt_service().sign_access_token(user.id)?;
        let ttl = self.ctx.jwt_service().refresh_token_ttl();

        // The opaque value is regenerated inside the retry, so a collision
        // on the token's unique column resolves itself on the next attempt.
        let refresh = self
            .ctx
            .retry()
            .execute(|| async {
                let token = RefreshToken::new(
                    self.ctx.generate_id(),
                    generate_refresh_value(),
                    user.id,
                    Utc::now() + ttl,
                );
                self.ctx.refresh_token_repo().create(&token).await?;
                Ok(token)
            })
            .await?;

        Ok(AuthResponse::new(
            access_token,
            refresh.token,
            self.ctx.jwt_service().access_token_expiry(),
            UserResponse::from(user),
        ))
    }
}
