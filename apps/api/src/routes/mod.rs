pub mod convert;
pub mod cv;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Headroom above the upload ceiling so oversized files reach the handler's
/// own size check instead of failing mid-stream.
const BODY_LIMIT_SLACK: usize = 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes() + BODY_LIMIT_SLACK;
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/convert", post(convert::handle_convert))
        .route("/cv", post(cv::handle_render_cv))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
