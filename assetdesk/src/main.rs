use assetdesk::{AppConfig, AppState, api_router, entities};
use sea_orm::Database;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db = Database::connect(&config.database_url).await?;
    if config.bootstrap_schema {
        entities::create_sqlite_schema(&db).await?;
    }

    let app = api_router(AppState::new(db, config.paging)).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!(address = %config.bind, "assetdesk listening");
    axum::serve(listener, app).await?;
    Ok(())
}
