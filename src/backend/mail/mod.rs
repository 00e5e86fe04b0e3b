//! Mail Module
//!
//! Outgoing mail for the auth workflow. The workflow only sees the
//! [`Mailer`] trait; the server picks [`SmtpMailer`] when an SMTP relay is
//! configured and [`LogMailer`] otherwise.

pub mod mailer;

pub use mailer::{confirmation_email, LogMailer, MailError, Mailer, SmtpMailer};
