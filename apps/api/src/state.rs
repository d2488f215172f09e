use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Both pipelines are stateless; handlers only read configuration.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
}
