//! Application state and router assembly.

use crate::auth::AuthVerifier;
use crate::config::Config;
use crate::orgs::OrgManager;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use std::sync::Arc;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

/// Stamps each inbound request with a fresh UUID so log lines for one
/// org lookup or rename can be correlated across the trace span.
#[derive(Clone, Default)]
struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let request_id = Uuid::new_v4().to_string().parse().ok()?;
        Some(RequestId::new(request_id))
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub verifier: AuthVerifier,
    pub orgs: Arc<OrgManager>,
}

impl AppState {
    #[must_use]
    pub fn new(verifier: AuthVerifier, orgs: OrgManager) -> Self {
        Self {
            verifier,
            orgs: Arc::new(orgs),
        }
    }
}

/// Build the application router with all routes and middleware layers.
pub fn router(config: &Config, state: AppState) -> Router {
    Router::new()
        .merge(crate::orgs::routes())
        .merge(crate::health::routes())
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
