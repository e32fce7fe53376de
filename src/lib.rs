//! Organization resource service for the Voxanne dashboard.
//!
//! Serves `GET` and `PUT /api/orgs/{orgId}` behind bearer-token auth, with
//! membership-scoped reads and admin-only renames. Storage is pluggable:
//! an in-memory store by default, SeaORM over Postgres with the `database`
//! feature.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use voxanne_orgs::{AppState, ConfigBuilder, app, auth::AuthVerifier, orgs};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigBuilder::new()
//!         .from_env()
//!         .build()?;
//!
//!     voxanne_orgs::init_tracing(&config.logging);
//!
//!     let store = orgs::InMemoryStore::new();
//!     let manager = orgs::OrgManager::new(Arc::new(store.clone()), Arc::new(store));
//!     let verifier = AuthVerifier::from_secret(config.auth.jwt_secret.as_bytes());
//!     let router = app::router(&config, AppState::new(verifier, manager));
//!
//!     let listener = tokio::net::TcpListener::bind(config.server.addr()?).await?;
//!     axum::serve(listener, router).await?;
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod auth;
pub mod config;
mod error;
pub mod health;
pub mod orgs;
pub mod testing;

pub use app::AppState;
pub use config::{Config, ConfigBuilder, LoggingConfig, ServerConfig};
pub use error::{ApiError, Result};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Initialize tracing from the logging configuration.
///
/// `RUST_LOG` overrides the configured level when set.
pub fn init_tracing(config: &LoggingConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    if config.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
