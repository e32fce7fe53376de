use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use voxanne_orgs::auth::AuthVerifier;
use voxanne_orgs::orgs::{InMemoryStore, OrgManager};
use voxanne_orgs::{app, AppState, Config, ConfigBuilder};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigBuilder::new()
        .from_env()
        .build()
        .context("invalid configuration")?;

    voxanne_orgs::init_tracing(&config.logging);

    let state = build_state(&config).await?;
    let router = app::router(&config, state);

    let addr = config.server.addr().context("invalid listen address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(%addr, "Listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn build_state(config: &Config) -> anyhow::Result<AppState> {
    let mut verifier = AuthVerifier::from_secret(config.auth.jwt_secret.as_bytes());
    if let Some(issuer) = &config.auth.issuer {
        verifier = verifier.with_issuer(issuer.clone());
    }
    if let Some(audience) = &config.auth.audience {
        verifier = verifier.with_audience(audience.clone());
    }

    #[cfg(feature = "database")]
    if let Some(url) = &config.database.url {
        use voxanne_orgs::orgs::SeaOrmOrgStore;

        let db = sea_orm::Database::connect(url)
            .await
            .context("failed to connect to database")?;
        let store = SeaOrmOrgStore::new(db);
        let manager = OrgManager::new(Arc::new(store.clone()), Arc::new(store));
        info!("Using database store");
        return Ok(AppState::new(verifier, manager));
    }

    #[cfg(not(feature = "database"))]
    if config.database.url.is_some() {
        warn!("VOXANNE_DATABASE_URL set but the 'database' feature is disabled");
    }

    warn!("No database configured, using in-memory store (data is not persisted)");
    let store = InMemoryStore::new();
    let manager = OrgManager::new(Arc::new(store.clone()), Arc::new(store));
    Ok(AppState::new(verifier, manager))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
