use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fablehouse_api::config::ServerConfig;
use fablehouse_api::router::build_app_router;
use fablehouse_api::state::AppState;
use fablehouse_db::DbPool;
use fablehouse_pipeline::Services;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Configuration loaded");

    let pool = init_database().await;

    // Missing provider credentials do not block boot; each story run
    // reports a configuration error instead.
    let services = Arc::new(Services::from_env().await);
    match services.ensure_configured() {
        Ok(()) => tracing::info!("Generation services configured"),
        Err(err) => {
            tracing::warn!(error = %err, "Generation services not fully configured; story runs will fail")
        }
    }

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        services,
    };
    let app = build_app_router(state, &config);

    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");
    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "fablehouse_api=debug,fablehouse_pipeline=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Connect, verify, and migrate. Any failure here aborts startup.
async fn init_database() -> DbPool {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = fablehouse_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");

    fablehouse_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    fablehouse_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database pool ready, migrations applied");
    pool
}

/// Resolves when the process receives SIGINT or SIGTERM, which starts
/// the graceful drain in [`axum::serve`].
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("SIGINT received, draining"),
        () = terminate => tracing::info!("SIGTERM received, draining"),
    }
}
