// axum middleware applying the composed security headers

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::Response,
    middleware::Next,
};

use crate::config::PolicyConfig;
use crate::headers::assemble_headers;
use crate::policy::{Registry, RequestContext};
use crate::rules::bootstrap;

/// frozen per-process state for the security header middleware
#[derive(Debug, Clone)]
pub struct CspState {
    registry: Arc<Registry>,
    local_env: bool,
    admin_path_prefix: Option<String>,
}

impl CspState {
    /// bootstrap the registry from configuration
    pub fn new(config: &PolicyConfig) -> Self {
        Self::with_registry(bootstrap(config), config)
    }

    /// wrap a registry the host assembled itself (e.g. config rules plus
    /// its own contributions via `rules::builder_from_config`)
    pub fn with_registry(registry: Registry, config: &PolicyConfig) -> Self {
        Self {
            registry: Arc::new(registry),
            local_env: config.environment.is_local(),
            admin_path_prefix: config.admin_path_prefix.clone(),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// derive the rule inputs for one request
    pub fn context_for(&self, path: &str) -> RequestContext {
        RequestContext {
            local_env: self.local_env,
            admin: self
                .admin_path_prefix
                .as_deref()
                .is_some_and(|prefix| path.starts_with(prefix)),
        }
    }
}

/// add security headers to all responses
///
/// install with `axum::middleware::from_fn_with_state(state, apply_security_headers)`.
pub async fn apply_security_headers(
    State(state): State<CspState>,
    request: Request,
    next: Next,
) -> Response<Body> {
    let ctx = state.context_for(request.uri().path());
    let mut response = next.run(request).await;

    assemble_headers(state.registry(), &ctx, response.headers_mut());

    response
}
