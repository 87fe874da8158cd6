// Framework bootstrap for the todo service runtime.

use crate::frameworks::config::{Config, ConfigError, StoreKind};
use crate::frameworks::db;
use crate::interface_adapters::routes;
use crate::interface_adapters::state::AppState;
use std::io;
use tokio::net::TcpListener;

fn init_runtime() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();

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

// Process entry point: config, store, listener, serve.
pub async fn start() -> io::Result<()> {
    init_runtime();

    let config = Config::load().map_err(|e| {
        tracing::error!(error = %e, "invalid configuration");
        io::Error::other(e)
    })?;
    let state = build_state(&config).await?;

    let addr = config.addr();
    let listener = TcpListener::bind(addr).await.inspect_err(|e| {
        tracing::error!(%addr, error = %e, "failed to bind");
    })?;

    run(listener, state).await
}

pub async fn build_state(config: &Config) -> io::Result<AppState> {
    match config.store {
        StoreKind::Memory => {
            tracing::warn!("using in-memory todo store; data is lost on restart");
            Ok(AppState::in_memory())
        }
        StoreKind::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .ok_or_else(|| io::Error::other(ConfigError::MissingDatabaseUrl))?;

            let db = db::connect_pool(database_url, config.max_connections)
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, "failed to connect to database");
                    io::Error::other(e)
                })?;

            db::run_migrations(&db).await.map_err(|e| {
                tracing::error!(error = %e, "failed to run migrations");
                io::Error::other(e)
            })?;
            tracing::debug!(max_connections = config.max_connections, "database ready");

            Ok(AppState::postgres(db))
        }
    }
}

pub async fn run(listener: TcpListener, state: AppState) -> io::Result<()> {
    let address = listener.local_addr()?;
    let app = routes::app(state);

    tracing::info!(%address, "listening");

    // Serve app and report errors rather than panicking.
    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
}
