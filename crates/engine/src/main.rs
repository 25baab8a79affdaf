//! PokeArena Engine - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokearena_engine::api;
use pokearena_engine::app::App;
use pokearena_engine::infrastructure::{random::SystemRandom, sqlite};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokearena_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting PokeArena Engine");

    // Load configuration
    let db_path = std::env::var("DATABASE_PATH").unwrap_or_else(|_| "pokearena.db".into());
    let server_host = std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let server_port: u16 = std::env::var("SERVER_PORT")
        .or_else(|_| std::env::var("PORT"))
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .unwrap_or(3000);

    // Open the database and ensure the schema exists
    tracing::info!("Opening database at {}", db_path);
    let pool = sqlite::connect(&db_path).await?;
    sqlite::ensure_schema(&pool).await?;

    // Create application
    let app = Arc::new(App::new(
        Arc::new(sqlite::SqlitePokemonRepo::new(pool.clone())),
        Arc::new(sqlite::SqliteUnitOfWork::new(pool)),
        Arc::new(SystemRandom::new()),
    ));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = api::http::routes()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app);

    let addr: SocketAddr = format!("{server_host}:{server_port}").parse()?;
    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
