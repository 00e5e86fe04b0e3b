/**
 * Server Initialization
 *
 * Builds the Axum application from an [`AppConfig`]:
 *
 * 1. Open the database and run migrations
 * 2. Choose the mailer (SMTP when configured, otherwise log only)
 * 3. Assemble `AppState`
 * 4. Create the router
 */

use std::sync::Arc;

use axum::Router;

use crate::backend::mail::{LogMailer, MailError, Mailer, SmtpMailer};
use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;
use crate::shared::AppConfig;

/// Start-up failures
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("database: {0}")]
    Database(#[from] sqlx::Error),
    #[error("mailer: {0}")]
    Mailer(#[from] MailError),
}

/// Create and configure the Axum application
///
/// # Errors
///
/// Fails when the database cannot be opened or migrated, or the SMTP relay
/// settings are unusable.
pub async fn create_app(config: AppConfig) -> Result<Router<()>, InitError> {
    tracing::info!("Initializing Bookshelf backend server");

    let pool = load_database(&config.database_url).await?;
    let mailer = build_mailer(&config)?;
    let state = AppState::new(pool, mailer, config);

    let app = create_router(state);
    tracing::info!("Router configured");
    Ok(app)
}

fn build_mailer(config: &AppConfig) -> Result<Arc<dyn Mailer>, MailError> {
    match &config.smtp {
        Some(smtp) => {
            tracing::info!("Sending mail through {}:{}", smtp.host, smtp.port);
            Ok(Arc::new(SmtpMailer::new(smtp)?))
        }
        None => {
            tracing::warn!("SMTP_HOST not set, confirmation mails will only be logged");
            Ok(Arc::new(LogMailer))
        }
    }
}
