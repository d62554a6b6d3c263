use async_trait::async_trait;
use axum::http::{header, HeaderMap};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cookie the browser session is carried in when no Authorization header is sent
pub const SESSION_COOKIE: &str = "__session";

/// Authenticated principal for the current request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity(String);

impl Identity {
    /// Returns None for empty or whitespace-only ids
    pub fn new(user_id: impl Into<String>) -> Option<Self> {
        let user_id = user_id.into();
        if user_id.trim().is_empty() {
            None
        } else {
            Some(Self(user_id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Capability that turns request headers into a caller identity.
///
/// Resolved once per request by the access gate; handlers fall back to it
/// only when the gate did not run.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve(&self, headers: &HeaderMap) -> Option<Identity>;
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    /// Session id, informational
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    /// Fails when the lifetime does not fit in a timestamp
    pub fn new(user_id: String, ttl_hours: u64) -> Result<Self, IdentityError> {
        let now = Utc::now();
        let exp = i64::try_from(ttl_hours)
            .ok()
            .and_then(Duration::try_hours)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or(IdentityError::InvalidTtl(ttl_hours))?;

        Ok(Self {
            sub: user_id,
            sid: None,
            exp: exp.timestamp(),
            iat: now.timestamp(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("Session secret not configured")]
    MissingSecret,
    #[error("No session token present")]
    MissingToken,
    #[error("Authorization header must use Bearer token format")]
    BadScheme,
    #[error("Invalid session token: {0}")]
    InvalidToken(String),
    #[error("Session token has an empty subject")]
    EmptySubject,
    #[error("Session lifetime of {0} hours is out of range")]
    InvalidTtl(u64),
    #[error("Token generation error: {0}")]
    TokenGeneration(String),
}

/// Verifies HS256 session tokens from `Authorization: Bearer` or the session cookie
#[derive(Clone)]
pub struct SessionTokenResolver {
    secret: String,
}

impl SessionTokenResolver {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn verify(&self, headers: &HeaderMap) -> Result<Identity, IdentityError> {
        if self.secret.is_empty() {
            return Err(IdentityError::MissingSecret);
        }

        let token = extract_session_token(headers)?;
        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let token_data = decode::<Claims>(&token, &decoding_key, &Validation::default())
            .map_err(|e| IdentityError::InvalidToken(e.to_string()))?;

        Identity::new(token_data.claims.sub).ok_or(IdentityError::EmptySubject)
    }
}

#[async_trait]
impl IdentityResolver for SessionTokenResolver {
    async fn resolve(&self, headers: &HeaderMap) -> Option<Identity> {
        match self.verify(headers) {
            Ok(identity) => Some(identity),
            Err(IdentityError::MissingToken) => None,
            Err(e) => {
                tracing::debug!("Session token rejected: {}", e);
                None
            }
        }
    }
}

/// Pull the raw token from the Authorization header, falling back to the session cookie
fn extract_session_token(headers: &HeaderMap) -> Result<String, IdentityError> {
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        let auth_str = value.to_str().map_err(|_| IdentityError::BadScheme)?;
        let token = auth_str
            .strip_prefix("Bearer ")
            .ok_or(IdentityError::BadScheme)?
            .trim();
        if token.is_empty() {
            return Err(IdentityError::MissingToken);
        }
        return Ok(token.to_string());
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
        .ok_or(IdentityError::MissingToken)
}

/// Mint a session token, used by the `medimg token` command and tests
pub fn issue_session_token(
    secret: &str,
    user_id: &str,
    ttl_hours: u64,
) -> Result<String, IdentityError> {
    if secret.is_empty() {
        return Err(IdentityError::MissingSecret);
    }
    if user_id.trim().is_empty() {
        return Err(IdentityError::EmptySubject);
    }

    let claims = Claims::new(user_id.to_string(), ttl_hours)?;
    let encoding_key = EncodingKey::from_secret(secret.as_bytes());

    encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| IdentityError::TokenGeneration(e.to_string()))
}
