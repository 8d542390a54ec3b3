use std::net::SocketAddr;

use rolegate::api::build_router;
use rolegate::bootstrap;
use rolegate::config::Config;
use rolegate::database::Database;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rolegate=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Initialize database connection
    let db = Database::connect(&config.database_url).await?;
    tracing::info!("Database connection established");

    // Run migrations
    db.run_migrations().await?;
    tracing::info!("Database migrations applied");

    // Seed system-managed roles
    if config.seed_system_roles {
        if let Err(e) = bootstrap::seed_system_roles(&db).await {
            tracing::error!("Failed to seed system roles: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()).into());
        }
    }

    // Build application state and router
    let state = bootstrap::build_app_state(db);
    let app = build_router(state);

    // Start server
    let addr: SocketAddr = config.server_address().parse()?;
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
