use std::{convert::Infallible, fmt};

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    config::{AppConfig, Env},
    models::User,
    repository::{UserRepository, UserRepositoryState},
};

/// Header accepted in `Env::Local` in place of a bearer token.
pub const LOCAL_BYPASS_HEADER: &str = "x-user-id";

/// Claims
///
/// Payload expected inside a bearer JWT. Signed with the configured HS256 secret.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (sub): the user's UUID, looked up in the `users` table.
    pub sub: Uuid,
    /// Expiration Time (exp): always validated.
    pub exp: usize,
    /// Issued At (iat).
    pub iat: usize,
}

/// Role
///
/// Permission level of a caller. Ordered, so an `Admin` satisfies every `User` gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// AuthUser
///
/// The resolved identity of an authenticated request.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

impl AuthUser {
    /// True when this caller meets the `required` minimum role.
    pub fn has_role(&self, required: Role) -> bool {
        self.role >= required
    }
}

/// Caller
///
/// The request's identity, if any. Extraction never rejects: an absent, invalid or
/// expired credential yields `Caller(None)` and the role gate decides what that means.
#[derive(Debug, Clone)]
pub struct Caller(pub Option<AuthUser>);

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
    UserRepositoryState: FromRef<S>,
    AppConfig: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let users = UserRepositoryState::from_ref(state);
        let config = AppConfig::from_ref(state);
        Ok(Caller(resolve_caller(parts, users.as_ref(), &config).await))
    }
}

/// resolve_caller
///
/// 1. Local bypass: in `Env::Local`, a UUID in `x-user-id` that maps to a known user.
/// 2. Bearer token: HS256 JWT whose `sub` maps to a known user.
///
/// Users missing from the `users` table resolve to `None` even with a valid token.
pub async fn resolve_caller(
    parts: &Parts,
    users: &dyn UserRepository,
    config: &AppConfig,
) -> Option<AuthUser> {
    if config.env == Env::Local {
        let bypass_id = parts
            .headers
            .get(LOCAL_BYPASS_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|id_str| Uuid::parse_str(id_str.trim()).ok());
        if let Some(user_id) = bypass_id {
            if let Some(user) = lookup_user(users, user_id).await {
                return Some(authenticated(user, config));
            }
        }
    }

    let token = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))?;

    let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());
    let mut validation = Validation::default();
    validation.validate_exp = true;

    let token_data = match decode::<Claims>(token, &decoding_key, &validation) {
        Ok(data) => data,
        Err(e) => {
            tracing::debug!("rejected bearer token: {:?}", e.kind());
            return None;
        }
    };

    let user = lookup_user(users, token_data.claims.sub).await?;
    Some(authenticated(user, config))
}

async fn lookup_user(users: &dyn UserRepository, id: Uuid) -> Option<User> {
    match users.find_user(id).await {
        Ok(user) => user,
        Err(e) => {
            tracing::error!("user lookup for {} failed: {}", id, e);
            None
        }
    }
}

/// Maps an account to its role: ADMIN when flagged in the table or listed in `ADMIN_EMAILS`.
pub fn role_for(user: &User, config: &AppConfig) -> Role {
    if user.admin || config.is_admin_email(&user.email) {
        Role::Admin
    } else {
        Role::User
    }
}

fn authenticated(user: User, config: &AppConfig) -> AuthUser {
    let role = role_for(&user, config);
    AuthUser {
        id: user.id,
        email: user.email,
        role,
    }
}
