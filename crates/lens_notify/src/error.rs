//! Error types for the notification module.

use thiserror::Error;

/// Result type alias for notification operations.
pub type NotifyResult<T> = Result<T, NotifyError>;

/// Errors that can occur while delivering notifications.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Email not configured: {0}")]
    EmailNotConfigured(String),

    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    #[error("Failed to build email message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    #[error("SMTP delivery failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("File transport delivery failed: {0}")]
    FileTransport(#[from] lettre::transport::file::Error),

    #[error("Slack webhook not configured")]
    SlackNotConfigured,

    #[error("Slack delivery failed: {0}")]
    Slack(#[from] reqwest::Error),

    #[error("Slack webhook returned status {0}")]
    SlackStatus(u16),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
