/**
 * Application State Management
 *
 * `AppState` is the central state container shared by every handler. All
 * of it is built once at start-up and never mutated, so there are no locks:
 * cloning the state clones a handful of `Arc`s and the pool handle.
 *
 * # State Extraction
 *
 * The `FromRef` implementations let handlers take only what they need,
 * e.g. `State(pool): State<SqlitePool>` or `State(auth): State<AuthService>`.
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::auth::tokens::TokenService;
use crate::backend::auth::users::{SqlUserStore, UserStore};
use crate::backend::auth::workflow::AuthService;
use crate::backend::mail::Mailer;
use crate::shared::AppConfig;

/// Application state
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// Credential store
    pub users: Arc<dyn UserStore>,
    /// Verification and access token signer
    pub tokens: Arc<TokenService>,
    /// Outgoing mail
    pub mailer: Arc<dyn Mailer>,
    /// Immutable configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Assemble the state from its parts
    pub fn new(pool: SqlitePool, mailer: Arc<dyn Mailer>, config: AppConfig) -> Self {
        Self {
            users: Arc::new(SqlUserStore::new(pool.clone())),
            tokens: Arc::new(TokenService::new(&config)),
            pool,
            mailer,
            config: Arc::new(config),
        }
    }

    /// The auth workflow over this state's collaborators
    pub fn auth(&self) -> AuthService {
        AuthService::new(self.users.clone(), self.tokens.clone(), self.mailer.clone(), &self.config)
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.pool.clone()
    }
}

impl FromRef<AppState> for AuthService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth()
    }
}

impl FromRef<AppState> for Arc<TokenService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
