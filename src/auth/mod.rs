//! Caller identity and tenant resolution.
//!
//! Identity arrives as an HS256 JWT minted by the login callback and
//! carried in an `auth_token` cookie or a bearer header. Handlers that
//! operate on tenant data take a [`TenantContext`], which resolves the
//! caller once at the request boundary and is passed down explicitly.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, HeaderMap},
    RequestPartsExt,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_cookies::Cookies;
use uuid::Uuid;

use crate::api::error::PortalError;
use crate::shared::config::OAuthConfig;
use crate::shared::models::{User, UserRole};
use crate::shared::state::AppState;
use crate::storage;

pub mod routes;

pub const AUTH_COOKIE: &str = "auth_token";

/// Extract bearer token from Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|auth| {
            if auth.to_lowercase().starts_with("bearer ") {
                Some(auth[7..].to_string())
            } else {
                None
            }
        })
}

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub email: Option<String>,
    pub name: String,
    pub exp: i64,
    pub iat: i64,
    pub session_id: String,
}

pub fn encoding_key(config: &OAuthConfig) -> EncodingKey {
    EncodingKey::from_secret(config.jwt_secret.as_bytes())
}

pub fn decoding_key(config: &OAuthConfig) -> DecodingKey {
    DecodingKey::from_secret(config.jwt_secret.as_bytes())
}

/// Mint a signed token for the given external identity.
pub fn issue_token(
    config: &OAuthConfig,
    sub: &str,
    email: Option<&str>,
    name: &str,
) -> Result<String, PortalError> {
    let now = Utc::now();
    let exp = now + Duration::hours(config.jwt_expiry_hours);

    let claims = Claims {
        sub: sub.to_string(),
        email: email.map(|e| e.to_string()),
        name: name.to_string(),
        exp: exp.timestamp(),
        iat: now.timestamp(),
        session_id: Uuid::new_v4().to_string(),
    };

    encode(&Header::default(), &claims, &encoding_key(config))
        .map_err(|e| PortalError::Internal(e.to_string()))
}

fn decode_token(config: &OAuthConfig, token: &str) -> Result<Claims, PortalError> {
    let claims = decode::<Claims>(token, &decoding_key(config), &Validation::default())
        .map_err(|_| PortalError::Unauthenticated("Invalid token".to_string()))?
        .claims;

    if claims.exp < Utc::now().timestamp() {
        return Err(PortalError::Unauthenticated("Token expired".to_string()));
    }

    Ok(claims)
}

/// Authenticated caller: valid claims, no tenant requirement yet.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub claims: Claims,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = PortalError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = Arc::<AppState>::from_ref(state);

        let token = if let Some(bearer_token) = extract_bearer_token(&parts.headers) {
            bearer_token
        } else if let Ok(cookies) = parts.extract::<Cookies>().await {
            cookies
                .get(AUTH_COOKIE)
                .map(|c| c.value().to_string())
                .ok_or_else(|| {
                    PortalError::Unauthenticated("No authentication token".to_string())
                })?
        } else {
            return Err(PortalError::Unauthenticated(
                "No authentication token".to_string(),
            ));
        };

        let claims = decode_token(&state.config.oauth, &token)?;
        Ok(AuthenticatedUser { claims })
    }
}

/// Caller identity plus resolved tenant, built once per request and
/// handed to every downstream call.
#[derive(Debug, Clone)]
pub struct TenantContext {
    pub user: User,
    pub client_id: String,
}

impl TenantContext {
    pub fn user_id(&self) -> &str {
        &self.user.id
    }

    pub fn role(&self) -> UserRole {
        self.user.role.parse().unwrap_or(UserRole::Client)
    }

    pub fn require_admin(&self) -> Result<(), PortalError> {
        if self.role() != UserRole::Admin {
            return Err(PortalError::AccessDenied(
                "Admin access required".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = PortalError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthenticatedUser { claims } =
            AuthenticatedUser::from_request_parts(parts, state).await?;
        let state = Arc::<AppState>::from_ref(state);

        let pool = state.conn.clone();
        let user_id = claims.sub.clone();
        let user = tokio::task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(PortalError::from)?;
            storage::get_user(&mut conn, &user_id).map_err(PortalError::from)
        })
        .await
        .map_err(PortalError::from)??;

        // A caller without a user row has no tenant either way.
        let user = user.ok_or(PortalError::TenantMissing)?;
        let client_id = user.client_id.clone().ok_or(PortalError::TenantMissing)?;

        Ok(TenantContext { user, client_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> OAuthConfig {
        OAuthConfig {
            issuer_url: "http://localhost:8080".to_string(),
            client_id: "portalserver-web".to_string(),
            client_secret: String::new(),
            redirect_uri: "http://localhost:5000/auth/callback".to_string(),
            jwt_secret: "test-secret".to_string(),
            jwt_expiry_hours: 24,
        }
    }

    #[test]
    fn issued_token_decodes_back_to_claims() {
        let config = test_config();
        let token = issue_token(&config, "user-1", Some("ana@acme.test"), "Ana").unwrap();
        let claims = decode_token(&config, &token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.email.as_deref(), Some("ana@acme.test"));
        assert_eq!(claims.name, "Ana");
    }

    #[test]
    fn tampered_token_is_rejected() {
        let config = test_config();
        let token = issue_token(&config, "user-1", None, "Ana").unwrap();
        let mut other = test_config();
        other.jwt_secret = "other-secret".to_string();
        assert!(decode_token(&other, &token).is_err());
    }

    #[test]
    fn bearer_header_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer abc123".parse().unwrap());
        assert_eq!(extract_bearer_token(&headers).as_deref(), Some("abc123"));

        headers.insert(header::AUTHORIZATION, "bearer xyz".parse().unwrap());
        assert_eq!(extract_bearer_token(&headers).as_deref(), Some("xyz"));

        headers.insert(header::AUTHORIZATION, "Basic abc".parse().unwrap());
        assert_eq!(extract_bearer_token(&headers), None);
    }
}
