use std::sync::Arc;

use anyhow::Context;
use importer::{FootballDataClient, FootballDataImporter};
use storage::Database;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod routes;
mod state;

use config::Config;
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::leagues::handlers::import_league,
        features::players::handlers::total_players,
    ),
    components(
        schemas(
            storage::dto::common::MessageResponse,
            storage::dto::league::TotalPlayersResponse,
        )
    ),
    tags(
        (name = "leagues", description = "Import leagues from football-data.org"),
        (name = "players", description = "Aggregates over imported players"),
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting league import API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let client = FootballDataClient::with_base_url(&config.football_data_base_url)
        .context("Failed to build football-data.org client")?
        .with_retry_policy(config.retry);
    tracing::info!(
        "Upstream {} (max {} attempts, {:?} backoff)",
        config.football_data_base_url,
        config.retry.max_attempts(),
        config.retry.backoff()
    );

    let state = AppState::new(Arc::new(db), Arc::new(FootballDataImporter::new(client)));

    let app = routes::router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive());

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    axum::serve(listener, app).await?;

    Ok(())
}
