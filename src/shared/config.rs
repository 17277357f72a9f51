use dotenvy::dotenv;
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub uploads: UploadsConfig,
    pub oauth: OAuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadsConfig {
    pub storage_path: String,
    pub max_upload_bytes: usize,
}

/// External identity provider settings. The provider owns the login UI
/// and credential handling; the portal only exchanges codes and reads
/// the userinfo endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct OAuthConfig {
    pub issuer_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
}

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            use base64::Engine;
            let secret =
                base64::engine::general_purpose::STANDARD.encode(uuid::Uuid::new_v4().as_bytes());
            tracing::info!("JWT_SECRET not set, using generated secret");
            secret
        });

        Ok(Self {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("SERVER_PORT")
                    .unwrap_or_else(|_| "5000".to_string())
                    .parse()?,
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL")?,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()?,
            },
            uploads: UploadsConfig {
                storage_path: env::var("UPLOADS_DIR").unwrap_or_else(|_| "uploads".to_string()),
                max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            },
            oauth: OAuthConfig {
                issuer_url: env::var("OAUTH_ISSUER_URL")
                    .unwrap_or_else(|_| "http://localhost:8080".to_string()),
                client_id: env::var("OAUTH_CLIENT_ID")
                    .unwrap_or_else(|_| "portalserver-web".to_string()),
                client_secret: env::var("OAUTH_CLIENT_SECRET").unwrap_or_default(),
                redirect_uri: env::var("OAUTH_REDIRECT_URI")
                    .unwrap_or_else(|_| "http://localhost:5000/auth/callback".to_string()),
                jwt_secret,
                jwt_expiry_hours: env::var("JWT_EXPIRY_HOURS")
                    .unwrap_or_else(|_| "24".to_string())
                    .parse()?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_upload_limit_is_ten_megabytes() {
        assert_eq!(DEFAULT_MAX_UPLOAD_BYTES, 10_485_760);
    }
}
