use axum::extract::DefaultBodyLimit;
use axum::{routing::post, Router};

use crate::handlers;
use crate::state::AppState;

/// Maximum accepted upload size. Phone camera photos comfortably fit.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Mount the identification route.
///
/// `POST /identify` -- multipart form with `file` (image) and `user_id`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/identify", post(handlers::identify::identify))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}
