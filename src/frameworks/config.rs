use std::env;

use sqlx::postgres::PgSslMode;

// Process configuration read from the environment, loaded once at startup.

pub fn http_port() -> u16 {
    env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000)
}

pub fn database_url() -> Option<String> {
    env::var("DATABASE_URL").ok()
}

// TLS posture for the database connection. "require" forces TLS without
// certificate verification, which managed hosts with self-signed chains need.
pub fn database_ssl_mode() -> PgSslMode {
    match env::var("DATABASE_SSL_MODE").as_deref() {
        Ok("disable") => PgSslMode::Disable,
        Ok("require") => PgSslMode::Require,
        _ => PgSslMode::Prefer,
    }
}

pub fn token_secret() -> Option<String> {
    env::var("JWT_SECRET").ok()
}

// Base64-encoded shared secret for the request signature check.
pub fn hmac_secret() -> Option<String> {
    env::var("HMAC_SECRET").ok()
}
