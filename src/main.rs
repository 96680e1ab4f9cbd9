use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catatan_bot::config::Config;
use catatan_bot::services::clock::SystemClock;
use catatan_bot::services::dispatcher::Dispatcher;
use catatan_bot::services::item_store::ItemStore;
use catatan_bot::services::memory_store::MemoryItemStore;
use catatan_bot::services::period::PeriodResolver;
use catatan_bot::services::ports::StoragePort;
use catatan_bot::services::telegram::TelegramService;
use catatan_bot::{build_router, AppState};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,catatan_bot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env().expect("Invalid configuration");

    let storage: Arc<dyn StoragePort> = match &config.database_url {
        Some(database_url) => {
            tracing::info!("Connecting to database...");
            let db = Database::connect(database_url.as_str())
                .await
                .expect("Failed to connect to database");

            tracing::info!("Running migrations...");
            migration::Migrator::up(&db, None)
                .await
                .expect("Failed to run migrations");

            Arc::new(ItemStore::new(db))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, items are kept in memory only");
            Arc::new(MemoryItemStore::new())
        }
    };

    let telegram = TelegramService::new(
        config.telegram_bot_token.clone(),
        config.telegram_api_url.clone(),
    );
    let periods = PeriodResolver::new(config.reference_offset, config.week_start);
    tracing::info!(
        utc_offset = %config.reference_offset,
        week_start = ?config.week_start,
        "Evaluating periods"
    );

    let state = AppState {
        dispatcher: Dispatcher::new(Arc::new(telegram), storage, Arc::new(SystemClock), periods),
    };

    let app = build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind listener");

    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await.expect("Server error");
}
