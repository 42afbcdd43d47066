use axum::http::{HeaderValue, Method};
use puzzle_scoreboard::{
    catalog::repository::{InMemoryCatalogRepository, PostgresCatalogRepository},
    scores::repository::{InMemoryScoreRepository, PostgresScoreRepository},
    AppConfig, AppState,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "puzzle_scoreboard=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load();
    info!(environment = %config.environment, "Starting puzzle scoreboard server");

    let app_state = match &config.database_url {
        Some(database_url) => {
            let pool = sqlx::PgPool::connect(database_url).await?;
            sqlx::migrate!().run(&pool).await?;
            info!("Connected to PostgreSQL and applied migrations");

            AppState::new(
                Arc::new(PostgresCatalogRepository::new(pool.clone())),
                Arc::new(PostgresScoreRepository::new(pool)),
            )
        }
        None => {
            warn!(
                production = config.is_production(),
                "DATABASE_URL is not set, using in-memory storage. Catalog is empty; \
                 scores cannot be recorded"
            );
            AppState::new(
                Arc::new(InMemoryCatalogRepository::new()),
                Arc::new(InMemoryScoreRepository::new()),
            )
        }
    };

    let origins = config
        .cors_origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()?;

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    let app = puzzle_scoreboard::router(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Server running on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
