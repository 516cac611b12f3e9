use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum_helpers::{Clock, JwtAuth, system_clock};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{
    AuthResponse, LoginRequest, NAME_MAX_CHARS, NAME_MIN_CHARS, PublicUser, RegisterRequest, Role,
    UpdateProfile, User, UserFilter, UserList,
};
use crate::repository::UserRepository;

/// Accounts, credentials and token issuing
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    jwt: JwtAuth,
    clock: Clock,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R, jwt: JwtAuth) -> Self {
        Self {
            repository: Arc::new(repository),
            jwt,
            clock: system_clock(),
        }
    }

    /// Replaces the time source used for account timestamps
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Self-service sign-up; always creates a regular user
    #[instrument(skip(self, input))]
    pub async fn register(&self, input: RegisterRequest) -> UserResult<AuthResponse> {
        self.register_with_role(input, Role::User).await
    }

    #[instrument(skip(self, input))]
    pub async fn register_admin(&self, input: RegisterRequest) -> UserResult<AuthResponse> {
        self.register_with_role(input, Role::Admin).await
    }

    async fn register_with_role(
        &self,
        input: RegisterRequest,
        role: Role,
    ) -> UserResult<AuthResponse> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        let name = normalize_name(&input.name)?;
        let email = normalize_email(&input.email)?;

        if self.repository.get_by_email(&email).await?.is_some() {
            return Err(UserError::EmailTaken);
        }

        let password_hash = hash_password(&input.password)?;
        let now = (self.clock)();
        let user = User {
            created_at: now,
            updated_at: now,
            ..User::new(name, email, password_hash, role)
        };
        let user = self.repository.create(user).await?;

        self.issue(user)
    }

    /// Unknown email and wrong password are indistinguishable
    #[instrument(skip(self, input))]
    pub async fn login(&self, input: LoginRequest) -> UserResult<AuthResponse> {
        let email = input.email.trim().to_lowercase();

        let user = self
            .repository
            .get_by_email(&email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !verify_password(&input.password, &user.password_hash)? {
            tracing::info!(user_id = %user.id, "Login rejected");
            return Err(UserError::InvalidCredentials);
        }

        self.issue(user)
    }

    #[instrument(skip(self))]
    pub async fn get_profile(&self, user_id: Uuid) -> UserResult<PublicUser> {
        self.repository
            .get_by_id(user_id)
            .await?
            .map(PublicUser::from)
            .ok_or(UserError::NotFound(user_id))
    }

    #[instrument(skip(self, update))]
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        mut update: UpdateProfile,
    ) -> UserResult<PublicUser> {
        update
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        if update.is_empty() {
            return self.get_profile(user_id).await;
        }

        if let Some(ref name) = update.name {
            update.name = Some(normalize_name(name)?);
        }
        update.address = update.address.map(|v| v.trim().to_string());
        update.phone = update.phone.map(|v| v.trim().to_string());
        update.bio = update.bio.map(|v| v.trim().to_string());

        self.repository
            .update_profile(user_id, update, (self.clock)())
            .await?
            .map(PublicUser::from)
            .ok_or(UserError::NotFound(user_id))
    }

    /// Oldest accounts first
    #[instrument(skip(self))]
    pub async fn list_users(&self, filter: UserFilter) -> UserResult<UserList> {
        filter
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        let users = self.repository.list(&filter).await?;
        let total = self.repository.count().await?;

        Ok(UserList {
            items: users.into_iter().map(PublicUser::from).collect(),
            total,
            offset: filter.offset,
            limit: filter.limit,
        })
    }

    fn issue(&self, user: User) -> UserResult<AuthResponse> {
        let token = self
            .jwt
            .create_access_token(
                &user.id.to_string(),
                &user.email,
                &user.name,
                &[user.role.to_string()],
            )
            .map_err(|e| UserError::Token(e.to_string()))?;

        Ok(AuthResponse {
            token,
            user: user.into(),
        })
    }
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            jwt: self.jwt.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

fn normalize_name(raw: &str) -> UserResult<String> {
    let name = raw.trim();
    let chars = name.chars().count();
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&chars) {
        return Err(UserError::Validation(format!(
            "Name must be {NAME_MIN_CHARS}-{NAME_MAX_CHARS} characters"
        )));
    }
    Ok(name.to_string())
}

fn normalize_email(raw: &str) -> UserResult<String> {
    let email = raw.trim().to_lowercase();
    if !email.contains('@') {
        return Err(UserError::Validation("Email must contain '@'".to_string()));
    }
    Ok(email)
}

fn hash_password(password: &str) -> UserResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserError::PasswordHash(e.to_string()))
}

fn verify_password(password: &str, hash: &str) -> UserResult<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
