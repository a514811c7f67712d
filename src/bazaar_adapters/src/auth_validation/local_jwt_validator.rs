use async_trait::async_trait;
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use bazaar_core::{AuthToken, AuthValidator, Role, TokenIssuer, TokenIssuerError, UserId};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone)]
pub struct JwtAuthConfig {
    pub jwt_secret: Secret<String>,
    pub token_ttl_in_seconds: i64,
}

impl JwtAuthConfig {
    pub fn as_bytes(&self) -> &[u8] {
        self.jwt_secret.expose_secret().as_bytes()
    }
}

/// Claims carried by a storefront bearer token.
///
/// `role` is the role at signing time. The gate re-reads the stored role, so
/// a promotion or demotion applies to tokens that are already out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub iat: usize,
    pub exp: usize,
}

impl Claims {
    pub fn user_id(&self) -> Result<UserId, TokenAuthError> {
        UserId::parse(&self.sub).map_err(|_| TokenAuthError::InvalidToken)
    }
}

#[derive(Debug, Error)]
pub enum TokenAuthError {
    #[error("Missing token")]
    MissingToken,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token error: {0}")]
    TokenError(jsonwebtoken::errors::Error),
    #[error("Unexpected error")]
    UnexpectedError(String),
}

/// Signs HS256 tokens with the configured secret and lifetime.
#[derive(Clone)]
pub struct JwtTokenIssuer {
    config: JwtAuthConfig,
}

impl JwtTokenIssuer {
    pub fn new(config: JwtAuthConfig) -> Self {
        Self { config }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, user_id: &UserId, role: Role) -> Result<AuthToken, TokenIssuerError> {
        generate_auth_token(user_id, role, &self.config)
            .map(AuthToken::new)
            .map_err(|e| TokenIssuerError::SigningFailed(e.to_string()))
    }
}

/// Authentication stage of the role gate: reads the bearer token from the
/// `Authorization` header and verifies its signature and expiry.
#[derive(Clone)]
pub struct LocalJwtValidator {
    config: JwtAuthConfig,
}

impl LocalJwtValidator {
    pub fn new(config: JwtAuthConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl AuthValidator for LocalJwtValidator {
    type Claims = Claims;
    type RequestParts = http::request::Parts;
    type Error = TokenAuthError;

    async fn validate(&self, parts: &Self::RequestParts) -> Result<Self::Claims, Self::Error> {
        let token = extract_bearer_token(&parts.headers)?;
        validate_auth_token(&token, &self.config)
    }
}

pub fn extract_bearer_token(headers: &http::HeaderMap) -> Result<String, TokenAuthError> {
    if !headers.contains_key(http::header::AUTHORIZATION) {
        return Err(TokenAuthError::MissingToken);
    }

    headers
        .typed_get::<Authorization<Bearer>>()
        .map(|Authorization(bearer)| bearer.token().to_owned())
        .ok_or(TokenAuthError::InvalidToken)
}

// Create JWT auth token
pub fn generate_auth_token(
    user_id: &UserId,
    role: Role,
    config: &JwtAuthConfig,
) -> Result<String, TokenAuthError> {
    let delta = chrono::Duration::try_seconds(config.token_ttl_in_seconds).ok_or(
        TokenAuthError::UnexpectedError("Failed to create auth token duration".to_string()),
    )?;

    let now = Utc::now();
    let exp = now
        .checked_add_signed(delta)
        .ok_or(TokenAuthError::UnexpectedError(
            "Duration out of range".to_string(),
        ))?
        .timestamp();

    let to_usize = |timestamp: i64| -> Result<usize, TokenAuthError> {
        timestamp
            .try_into()
            .map_err(|_| TokenAuthError::UnexpectedError("Failed to cast i64 to usize".to_string()))
    };

    let claims = Claims {
        sub: user_id.to_string(),
        role,
        iat: to_usize(now.timestamp())?,
        exp: to_usize(exp)?,
    };

    encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &EncodingKey::from_secret(config.as_bytes()),
    )
    .map_err(TokenAuthError::TokenError)
}

// Check if JWT auth token is valid by decoding it using the JWT secret
pub fn validate_auth_token(token: &str, config: &JwtAuthConfig) -> Result<Claims, TokenAuthError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(TokenAuthError::TokenError)
}
