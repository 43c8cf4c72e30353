use crate::frameworks::{config, db};
use crate::interface_adapters::routes;
use crate::interface_adapters::state::{AppState, AuthSettings, PostgresPlayerStore};
use std::net::SocketAddr;
use std::sync::Arc;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub async fn run() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    init_tracing();

    let database_url = match config::database_url() {
        Some(value) => value,
        None => {
            tracing::error!("DATABASE_URL must be set");
            return;
        }
    };
    let token_secret = match config::token_secret() {
        Some(value) => value,
        None => {
            tracing::error!("JWT_SECRET must be set");
            return;
        }
    };
    let hmac_secret = match config::hmac_secret() {
        Some(value) => value,
        None => {
            tracing::error!("HMAC_SECRET must be set");
            return;
        }
    };

    let db = match db::connect_pool(&database_url, config::database_ssl_mode()).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, "failed to connect to database");
            return;
        }
    };

    if let Err(e) = db::run_migrations(&db).await {
        tracing::error!(error = %e, "failed to run migrations");
        return;
    }

    let state = AppState {
        store: Arc::new(PostgresPlayerStore { db }),
        auth: AuthSettings {
            token_secret,
            hmac_secret,
        },
    };

    // Start the web server with the HTTP routes wired up.
    let app = routes::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config::http_port()));

    // Bind TCP listener with error handling.
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(%addr, error = %e, "failed to bind");
            return; // Abort startup on bind failure.
        }
    };
    tracing::info!(%addr, "listening");

    // Serve app and report errors rather than panicking.
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
    }
}
