//! Login, session tokens and the bearer-token guard.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
    Json,
};
use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::api::AppState;
use crate::errors::{ApiError, Result};
use crate::extract::AppJson;

/// Token payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub id: u64,
    pub username: String,
    pub exp: usize,
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: u64,
    pub username: String,
    password_hash: String,
}

/// Signs and verifies HS256 session tokens.
pub struct TokenIssuer {
    secret: String,
    ttl_secs: i64,
}

impl TokenIssuer {
    pub fn new(secret: String, ttl_secs: i64) -> Self {
        Self { secret, ttl_secs }
    }

    pub fn issue(&self, user: &User) -> Result<String> {
        let claims = Claims {
            id: user.id,
            username: user.username.clone(),
            exp: (Utc::now().timestamp() + self.ttl_secs) as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;
        debug!("Issued token for {} (ttl {}s)", user.username, self.ttl_secs);
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|_| ApiError::InvalidToken)
    }
}

/// In-memory user accounts with bcrypt-hashed passwords.
pub struct UserStore {
    users: RwLock<Vec<User>>,
    cost: u32,
}

impl UserStore {
    pub fn new(cost: u32) -> Self {
        Self {
            users: RwLock::new(Vec::new()),
            cost,
        }
    }

    pub fn add_user(&self, username: &str, password: &str) -> Result<User> {
        let password_hash = hash(password, self.cost)?;
        let mut users = self.users.write();
        let user = User {
            id: users.len() as u64 + 1,
            username: username.to_string(),
            password_hash,
        };
        users.push(user.clone());
        info!("User {username} registered");
        Ok(user)
    }

    /// The user when the password matches, `InvalidCredentials` otherwise.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<User> {
        let user = self
            .users
            .read()
            .iter()
            .find(|u| u.username == username)
            .cloned()
            .ok_or(ApiError::InvalidCredentials)?;

        if !verify(password, &user.password_hash)? {
            return Err(ApiError::InvalidCredentials);
        }
        Ok(user)
    }
}

// ─────────────────────────────────────────────────────────
// Handlers and middleware
// ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// `POST /login`
pub async fn login(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let user = match state.users.authenticate(&payload.username, &payload.password) {
        Ok(user) => user,
        Err(e) => {
            warn!("Failed login attempt for {}", payload.username);
            return Err(e);
        }
    };
    let token = state.tokens.issue(&user)?;
    info!("Login successful: {}", user.username);
    Ok(Json(LoginResponse { token }))
}

/// Reject requests without a valid `Authorization: Bearer <token>` header.
/// Verified [`Claims`] are stored in the request extensions for handlers
/// that record who made a change.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response> {
    let header = req
        .headers()
        .get("Authorization")
        .ok_or(ApiError::MissingToken)?;

    let token = header
        .to_str()
        .ok()
        .and_then(|h| h.split(' ').nth(1))
        .ok_or(ApiError::InvalidToken)?;

    let claims = state.tokens.verify(token)?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
