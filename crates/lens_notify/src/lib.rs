//! # lens_notify
//!
//! Delivery of finished CloudLens reports via email (SMTP, or a file
//! transport for development) and Slack incoming webhooks.
//!
//! Delivery runs after the report is fully assembled and written;
//! failures here mark the run as failed without touching the computed
//! report content.

pub mod email;
pub mod error;
pub mod notifier;
pub mod slack;

pub use email::EmailSender;
pub use error::{NotifyError, NotifyResult};
pub use notifier::Notifier;
pub use slack::SlackSender;
