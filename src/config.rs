use std::net::IpAddr;

use argon2::password_hash::PasswordHash;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub database_name: String,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub session_ttl_minutes: i64,
    pub host: IpAddr,
    pub port: u16,
    pub base_url: String,
    pub max_body_size: usize,
    pub admin: Option<AdminAccount>,
    pub log_level: String,
}

/// The single administrator account that lives outside the users table.
#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());
        let database_name = env_or("REALESTATE_DB_NAME", "realestate");

        let database_max_connections: u32 = env_or("REALESTATE_DB_MAX_CONNECTIONS", "10")
            .parse()
            .map_err(|e| format!("Invalid REALESTATE_DB_MAX_CONNECTIONS: {e}"))?;

        let jwt_secret = env_required("JWT_SECRET")?;

        let session_ttl_minutes: i64 = env_or("REALESTATE_SESSION_TTL_MINUTES", "43200")
            .parse()
            .map_err(|e| format!("Invalid REALESTATE_SESSION_TTL_MINUTES: {e}"))?;
        if session_ttl_minutes <= 0 {
            return Err("REALESTATE_SESSION_TTL_MINUTES must be positive".to_string());
        }

        let host: IpAddr = env_or("REALESTATE_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid REALESTATE_HOST: {e}"))?;

        let port: u16 = env_or("REALESTATE_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid REALESTATE_PORT: {e}"))?;

        let base_url = env_or("REALESTATE_BASE_URL", &format!("http://{host}:{port}"));

        let max_body_size: usize = env_or("REALESTATE_MAX_BODY_SIZE", "10485760")
            .parse()
            .map_err(|e| format!("Invalid REALESTATE_MAX_BODY_SIZE: {e}"))?;

        let admin = match (
            std::env::var("REALESTATE_ADMIN_EMAIL").ok(),
            std::env::var("REALESTATE_ADMIN_PASSWORD_HASH").ok(),
        ) {
            (Some(email), Some(password_hash)) => Some(AdminAccount::new(
                &email,
                &env_or("REALESTATE_ADMIN_NAME", "Admin"),
                &password_hash,
            )?),
            (None, None) => None,
            _ => {
                return Err(
                    "REALESTATE_ADMIN_EMAIL and REALESTATE_ADMIN_PASSWORD_HASH must be set together"
                        .to_string(),
                );
            }
        };

        let log_level = env_or("REALESTATE_LOG_LEVEL", "info");

        Ok(Config {
            database_url,
            database_name,
            database_max_connections,
            jwt_secret,
            session_ttl_minutes,
            host,
            port,
            base_url,
            max_body_size,
            admin,
            log_level,
        })
    }

    /// Cookies only carry the `Secure` flag when the site is served over TLS.
    pub fn secure_cookies(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl AdminAccount {
    pub fn new(email: &str, name: &str, password_hash: &str) -> Result<Self, String> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err("REALESTATE_ADMIN_EMAIL must not be empty".to_string());
        }
        PasswordHash::new(password_hash)
            .map_err(|e| format!("Invalid REALESTATE_ADMIN_PASSWORD_HASH: {e}"))?;

        Ok(AdminAccount {
            email,
            name: name.to_string(),
            password_hash: password_hash.to_string(),
        })
    }
}

/// Emails are compared and stored trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
