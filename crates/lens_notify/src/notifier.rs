//! Notification dispatch across configured channels.

use tracing::info;

use lens_config::NotificationConfig;
use lens_core::Alert;

use crate::email::EmailSender;
use crate::error::{NotifyError, NotifyResult};
use crate::slack::SlackSender;

/// Sends the finished report through every enabled channel.
///
/// Channel failures propagate: a run with failed delivery is a failed
/// run, even though the report itself was fully computed.
pub struct Notifier {
    project_name: String,
    config: NotificationConfig,
}

impl Notifier {
    pub fn new(project_name: impl Into<String>, config: NotificationConfig) -> Self {
        Self {
            project_name: project_name.into(),
            config,
        }
    }

    /// Deliver the report, honoring the enablement flags.
    pub async fn send(&self, report_text: &str, alerts: &[Alert]) -> NotifyResult<()> {
        if !self.config.enabled {
            info!("Notifications disabled, skipping");
            return Ok(());
        }

        if self.config.notify_only_on_alerts && alerts.is_empty() {
            info!("No alerts detected, skipping notification");
            return Ok(());
        }

        if self.config.email.enabled {
            let sender = EmailSender::new(&self.config.email)?;
            sender.send_report(report_text, alerts).await?;
        }

        if self.config.slack.enabled {
            let webhook = self
                .config
                .slack
                .webhook_url
                .as_deref()
                .ok_or(NotifyError::SlackNotConfigured)?;
            let sender = SlackSender::new(webhook)?;
            sender.send_report(&self.project_name, alerts).await?;
        }

        Ok(())
    }
}
