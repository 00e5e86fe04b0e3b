/**
 * API Route Handlers
 *
 * # Routes
 *
 * ## Users (public)
 * - `POST /api/users` - Signup
 * - `POST /api/users/login` - Login
 * - `GET /api/users/confirm/{token}` - Email confirmation
 *
 * ## Authors
 * - `GET /api/authors`, `GET /api/authors/{id}` - public
 * - `POST /api/authors`, `PATCH|DELETE /api/authors/{id}`,
 *   `POST /api/authors/avatar/{id}` - JWT required
 *
 * ## Books
 * - `GET /api/books`, `GET /api/books/{id}` - public
 * - `POST /api/books`, `PUT|PATCH|DELETE /api/books/{id}` - JWT required
 *
 * Collection paths answer with and without a trailing slash.
 */

use axum::{
    middleware::from_fn_with_state,
    routing::{get, patch, post, put, MethodRouter},
    Router,
};

use crate::backend::auth::{confirm_email, login, signup};
use crate::backend::catalog::handlers::{
    create_author, create_book, delete_author, delete_book, get_author, get_book, list_authors, list_books,
    patch_book, replace_book, update_author, upload_avatar,
};
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;

/// Configure API routes
///
/// # Arguments
///
/// * `app_state` - Needed by the auth middleware on write routes
///
/// # Returns
///
/// Router with every `/api` route configured
pub fn configure_api_routes(app_state: &AppState) -> Router<AppState> {
    let public = Router::new();
    let public = collection(public, "/api/users", post(signup))
        .route("/api/users/login", post(login))
        .route("/api/users/confirm/{token}", get(confirm_email));
    let public = collection(public, "/api/authors", get(list_authors)).route("/api/authors/{id}", get(get_author));
    let public = collection(public, "/api/books", get(list_books)).route("/api/books/{id}", get(get_book));

    let protected = Router::new();
    let protected = collection(protected, "/api/authors", post(create_author))
        .route("/api/authors/{id}", patch(update_author).delete(delete_author))
        .route("/api/authors/avatar/{id}", post(upload_avatar));
    let protected = collection(protected, "/api/books", post(create_book))
        .route("/api/books/{id}", put(replace_book).patch(patch_book).delete(delete_book));
    let protected = protected.route_layer(from_fn_with_state(app_state.clone(), auth_middleware));

    public.merge(protected)
}

/// Register `handler` on `path` and on `path/`
fn collection(router: Router<AppState>, path: &str, handler: MethodRouter<AppState>) -> Router<AppState> {
    router
        .route(path, handler.clone())
        .route(&format!("{path}/"), handler)
}
