use std::sync::Arc;

use crate::auth::password;
use crate::config::{AdminAccount, Config};
use crate::db::Database;
use crate::rate_limit::LoginRateLimiter;
use crate::state::{AppState, SharedState};

pub const TEST_ADMIN_EMAIL: &str = "admin@agency.test";
pub const TEST_ADMIN_PASSWORD: &str = "correct horse battery staple";

pub fn test_config() -> Config {
    let hash = password::hash(TEST_ADMIN_PASSWORD).unwrap();
    Config {
        database_url: None,
        database_name: "realestate".to_string(),
        database_max_connections: 2,
        jwt_secret: "test-jwt-secret-that-is-long-enough".to_string(),
        session_ttl_minutes: 60,
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        base_url: "http://localhost:0".to_string(),
        max_body_size: 1_048_576,
        admin: Some(AdminAccount::new(TEST_ADMIN_EMAIL, "Admin", &hash).unwrap()),
        log_level: "warn".to_string(),
    }
}

/// State with no database configured: any lookup fails with a connection error.
pub fn test_state() -> SharedState {
    let config = test_config();
    Arc::new(AppState {
        db: Database::from_config(&config),
        config,
        login_limiter: LoginRateLimiter::new(),
    })
}
