//! Test application fixture
//!
//! Builds the real router over a fresh in-memory database, a temporary
//! upload folder and a mailer that records what it was asked to send.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use bookshelf::backend::mail::{MailError, Mailer};
use bookshelf::backend::routes::create_router;
use bookshelf::backend::server::config::connect_database;
use bookshelf::backend::server::AppState;
use bookshelf::shared::AppConfig;
use tempfile::TempDir;

/// A mail captured by [`RecordingMailer`]
#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Mailer that stores messages instead of sending them
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<SentMail>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

/// Mailer whose every send fails
pub struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _to: &str, _subject: &str, _body: &str) -> Result<(), MailError> {
        let error = "not an address".parse::<lettre::Address>().unwrap_err();
        Err(MailError::Address(error))
    }
}

/// Configuration used by every test: the testing secrets and a cheap bcrypt cost
pub fn test_config(upload_folder: &std::path::Path) -> AppConfig {
    AppConfig::builder()
        .database_url("sqlite::memory:")
        .secret_key("dragvulcano")
        .security_password_salt("dragvulcano")
        .jwt_secret_key("jwt-test-secret")
        .bcrypt_cost(4)
        .upload_folder(upload_folder)
        .build()
        .expect("valid test configuration")
}

/// Running test application
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub mailer: Arc<RecordingMailer>,
    pub upload_dir: TempDir,
}

impl TestApp {
    /// Fresh app with a recording mailer
    pub async fn new() -> Self {
        let mailer = Arc::new(RecordingMailer::default());
        let (server, state, upload_dir) = build(mailer.clone()).await;
        Self {
            server,
            state,
            mailer,
            upload_dir,
        }
    }

    /// Fresh app whose mailer always fails
    pub async fn with_failing_mailer() -> (TestServer, AppState) {
        let (server, state, _upload_dir) = build(Arc::new(FailingMailer)).await;
        (server, state)
    }
}

async fn build(mailer: Arc<dyn Mailer>) -> (TestServer, AppState, TempDir) {
    let upload_dir = tempfile::tempdir().expect("temp upload dir");
    let config = test_config(upload_dir.path());
    let pool = connect_database(&config.database_url)
        .await
        .expect("in-memory database");
    let state = AppState::new(pool, mailer, config);
    let server = TestServer::new(create_router(state.clone())).expect("test server");
    (server, state, upload_dir)
}
