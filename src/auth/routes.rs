//! Login flow against the external identity provider, plus the
//! current-identity endpoint consumed by the frontend on boot.

use axum::{
    extract::{Query, State},
    response::Redirect,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_cookies::{Cookie, Cookies};

use crate::api::error::PortalError;
use crate::auth::{issue_token, AuthenticatedUser, AUTH_COOKIE};
use crate::shared::models::{UpsertUser, User};
use crate::shared::state::AppState;
use crate::storage;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/login", get(login))
        .route("/auth/callback", get(callback))
        .route("/auth/logout", get(logout))
        .route("/api/auth/user", get(current_user))
}

#[derive(Deserialize)]
struct OAuthTokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct UserInfoResponse {
    sub: String,
    email: Option<String>,
    name: Option<String>,
    given_name: Option<String>,
    family_name: Option<String>,
    picture: Option<String>,
}

async fn login(State(state): State<Arc<AppState>>) -> Redirect {
    let oauth = &state.config.oauth;
    let url = format!(
        "{}/oauth/v2/authorize?client_id={}&redirect_uri={}&response_type=code&scope=openid%20profile%20email",
        oauth.issuer_url,
        urlencoding::encode(&oauth.client_id),
        urlencoding::encode(&oauth.redirect_uri),
    );
    Redirect::to(&url)
}

#[derive(Deserialize)]
struct CallbackParams {
    code: String,
}

async fn callback(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Query(params): Query<CallbackParams>,
) -> Result<Redirect, PortalError> {
    let oauth = state.config.oauth.clone();
    let client = reqwest::Client::new();

    let token_url = format!("{}/oauth/v2/token", oauth.issuer_url);
    let token_response: OAuthTokenResponse = client
        .post(&token_url)
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", &params.code),
            ("client_id", &oauth.client_id),
            ("client_secret", &oauth.client_secret),
            ("redirect_uri", &oauth.redirect_uri),
        ])
        .send()
        .await
        .map_err(|e| PortalError::Internal(e.to_string()))?
        .error_for_status()
        .map_err(|_| PortalError::Unauthenticated("Code exchange failed".to_string()))?
        .json()
        .await
        .map_err(|e| PortalError::Internal(e.to_string()))?;

    let userinfo_url = format!("{}/oidc/v1/userinfo", oauth.issuer_url);
    let user_info: UserInfoResponse = client
        .get(&userinfo_url)
        .bearer_auth(&token_response.access_token)
        .send()
        .await
        .map_err(|e| PortalError::Internal(e.to_string()))?
        .error_for_status()
        .map_err(|_| PortalError::Unauthenticated("Userinfo fetch failed".to_string()))?
        .json()
        .await
        .map_err(|e| PortalError::Internal(e.to_string()))?;

    let upsert = UpsertUser {
        id: user_info.sub.clone(),
        email: user_info.email.clone(),
        first_name: user_info.given_name.clone(),
        last_name: user_info.family_name.clone(),
        profile_image_url: user_info.picture.clone(),
    };

    let pool = state.conn.clone();
    let user: User = tokio::task::spawn_blocking(move || {
        let mut conn = pool.get().map_err(PortalError::from)?;
        storage::upsert_user(&mut conn, &upsert).map_err(PortalError::from)
    })
    .await
    .map_err(PortalError::from)??;

    let display_name = user_info.name.unwrap_or_else(|| user.display_name());
    let token = issue_token(&oauth, &user.id, user.email.as_deref(), &display_name)?;
    cookies.add(auth_cookie(token, oauth.jwt_expiry_hours));

    tracing::info!("User {} logged in", user.id);
    Ok(Redirect::to("/"))
}

async fn logout(cookies: Cookies) -> Redirect {
    cookies.remove(Cookie::build((AUTH_COOKIE, "")).path("/").build());
    Redirect::to("/")
}

/// GET /api/auth/user — the row behind the caller's identity, or 404
/// when the external identity has never hit the login callback.
async fn current_user(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser { claims }: AuthenticatedUser,
) -> Result<Json<User>, PortalError> {
    let pool = state.conn.clone();
    let user = tokio::task::spawn_blocking(move || {
        let mut conn = pool.get().map_err(PortalError::from)?;
        storage::get_user(&mut conn, &claims.sub).map_err(PortalError::from)
    })
    .await
    .map_err(PortalError::from)??;

    let user = user.ok_or_else(|| PortalError::NotFound("User not found".to_string()))?;
    Ok(Json(user))
}

fn auth_cookie(token: String, expires_in_hours: i64) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, token))
        .path("/")
        .secure(true)
        .http_only(true)
        .same_site(tower_cookies::cookie::SameSite::Lax)
        .max_age(time::Duration::hours(expires_in_hours))
        .build()
}
