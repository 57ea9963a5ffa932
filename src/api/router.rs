use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;

use crate::api::handlers::{health_handler, upload_handler};
use crate::api::openapi::swagger_ui;
use crate::application::use_cases::UploadImageUseCase;

/// Application state container
pub struct AppState {
    pub upload_use_case: Arc<UploadImageUseCase>,
    /// Largest accepted request body on the upload route
    pub body_limit: usize,
}

/// Create router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let upload_state = Arc::clone(&state.upload_use_case);

    let upload_routes: Router = Router::new()
        .route("/upload", post(upload_handler))
        .with_state(upload_state)
        // Replace axum's 2 MB default with the upload cap
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(state.body_limit));

    Router::new()
        .route("/health", get(health_handler))
        .merge(upload_routes)
        .merge(swagger_ui())
}
