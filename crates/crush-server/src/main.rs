use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crush_api::state::AppStateInner;
use crush_db::Database;
use crush_match::Matcher;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crush=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let secret = std::env::var("CRUSH_SECRET").unwrap_or_else(|_| {
        warn!("CRUSH_SECRET not set, using the dev secret");
        "dev-secret-change-me".into()
    });
    let db_path = std::env::var("CRUSH_DB_PATH").unwrap_or_else(|_| "crushes.db".into());
    let host = std::env::var("CRUSH_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("CRUSH_PORT")
        .unwrap_or_else(|_| "8000".into())
        .parse()?;

    // Init database and matcher
    let db = Database::open(&PathBuf::from(&db_path))?;
    let matcher = Matcher::new(&secret);

    let state = Arc::new(AppStateInner { db, matcher });

    let app = crush_api::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Secret Crush Matcher listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        let mut sigterm =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("failed to install SIGTERM handler");
        tokio::select! {
            _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
