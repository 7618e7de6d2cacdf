use adapter::{database::connect_database_with, memory::InMemoryStore};
use anyhow::{Context, Result};
use api::route::v1;
use axum::Router;
use registry::{notifier_from, AppRegistry};
use shared::config::{AppConfig, StoreBackend};
use shared::env::{which, Environment};
use std::net::{Ipv4Addr, SocketAddr};
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    init_logger()?;
    bootstrap().await
}

fn init_logger() -> Result<()> {
    let log_level = match which() {
        Environment::Development => "debug",
        Environment::Production => "info",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| log_level.into());

    let subscriber = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_target(false);

    tracing_subscriber::registry()
        .with(subscriber)
        .with(env_filter)
        .try_init()?;

    Ok(())
}

async fn build_registry(app_config: AppConfig) -> Result<AppRegistry> {
    if app_config.mail.is_none() {
        tracing::info!("MAIL_ACCESS_TOKEN is not set, notifications are only logged");
    }

    match app_config.store {
        StoreBackend::Postgres => {
            let pool = connect_database_with(&app_config.database);
            pool.migrate()
                .await
                .context("Failed to run database migrations")?;
            Ok(AppRegistry::new(pool, app_config.mail))
        }
        StoreBackend::Memory => {
            tracing::warn!("using the in-memory store, data is lost on shutdown");
            Ok(AppRegistry::in_memory(
                InMemoryStore::new(),
                notifier_from(app_config.mail),
            ))
        }
    }
}

async fn bootstrap() -> Result<()> {
    let app_config = AppConfig::new()?;
    let port = app_config.server.port;
    let registry = build_registry(app_config).await?;

    let app = Router::new()
        .merge(v1::routes())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
        .with_state(registry);

    let addr = SocketAddr::new(Ipv4Addr::LOCALHOST.into(), port);
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app)
        .await
        .context("Unexpected error happened in server")
        .inspect_err(|e| {
            tracing::error!(
                error.cause_chain = ?e,error.message = %e, "Unexpected error"
            )
        })
}
