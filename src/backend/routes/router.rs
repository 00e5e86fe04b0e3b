/**
 * Router Configuration
 *
 * The main router: API routes, uploaded avatars, and a JSON 404 for
 * everything else.
 */

use axum::Router;
use tower_http::services::ServeDir;

use crate::backend::error::ApiError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// 1. **API Routes**: users, authors, books
/// 2. **Avatars**: `GET /avatar/{filename}` from the upload folder
/// 3. **Fallback**: `404 notFound` envelope
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = configure_api_routes(&app_state);

    let router = router.nest_service("/avatar", ServeDir::new(&app_state.config.upload_folder));

    let router = router.fallback(not_found);

    router.with_state(app_state)
}

async fn not_found() -> ApiError {
    ApiError::not_found("Resource")
}
