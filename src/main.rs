use std::sync::Arc;

use sadhana_api_rust::auth::PgAuthProvider;
use sadhana_api_rust::config;
use sadhana_api_rust::database::DatabaseManager;
use sadhana_api_rust::handlers::{app, AppState};
use sadhana_api_rust::store::PgSystemsStore;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, SUPER_ADMIN_KEY, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting Sadhana API in {:?} mode", config.environment);

    let pool = DatabaseManager::pool()
        .await
        .unwrap_or_else(|e| panic!("failed to connect to database: {}", e));

    let state = AppState {
        auth: Arc::new(PgAuthProvider::new(pool.clone())),
        store: Arc::new(PgSystemsStore::new(pool)),
        security: config.security.clone(),
    };

    let app = app(state);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Sadhana API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
