use std::sync::Arc;

use anyhow::Context;
use api::config::Settings;
use api::db::{self, PgFruitStore, PgUserStore};
use api::{routes, with_method_override, AppState};
#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
use tokio::{net::TcpListener, signal::ctrl_c, task::AbortHandle};
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::{time::Duration, SameSite};
use tower_sessions::{ExpiredDeletion, Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::new().context("Failed to load configuration")?;
    let session_key = settings.session_key()?;

    // Initialize database pool
    info!("Connecting to database...");
    let pool = db::connect(&settings)
        .await
        .context("Failed to connect to database")?;

    db::migrate(&pool)
        .await
        .context("Failed to run migrations")?;

    // Create session store
    let session_store = PostgresStore::new(pool.clone());
    session_store
        .migrate()
        .await
        .context("Failed to migrate session store")?;

    let deletion_task = tokio::task::spawn(
        session_store
            .clone()
            .continuously_delete_expired(tokio::time::Duration::from_secs(60)),
    );

    let state = AppState::new(
        Arc::new(PgFruitStore::new(pool.clone())),
        Arc::new(PgUserStore::new(pool)),
    )
    .context("Failed to load templates")?;

    // Session layer configuration
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false) // Set to true in production with HTTPS
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::days(7)));

    let router = match session_key {
        Some(key) => routes(state).layer(session_layer.with_signed(key)),
        None => {
            warn!("SESSION_SECRET not set, session cookies are unsigned");
            routes(state).layer(session_layer)
        }
    };

    let app = with_method_override(router).layer(TraceLayer::new_for_http());

    let address = settings.address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Server listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(deletion_task.abort_handle()))
        .await
        .context("Server error")?;

    deletion_task.await.ok();
    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal(deletion_task: AbortHandle) {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    deletion_task.abort();
}
