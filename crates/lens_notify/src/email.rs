//! Email delivery over SMTP or a development file transport.

use chrono::Utc;
use lettre::{
    message::{header::ContentType, Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncFileTransport, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::{info, warn};

use lens_config::{EmailConfig, EmailTransportConfig};
use lens_core::Alert;

use crate::error::{NotifyError, NotifyResult};

/// Sends report emails through the configured transport.
pub struct EmailSender {
    transport: EmailTransport,
    config: EmailConfig,
}

enum EmailTransport {
    Smtp(AsyncSmtpTransport<Tokio1Executor>),
    File(AsyncFileTransport<Tokio1Executor>),
}

impl EmailSender {
    /// Build a sender from the email configuration.
    pub fn new(config: &EmailConfig) -> NotifyResult<Self> {
        let transport = match &config.transport {
            EmailTransportConfig::Smtp {
                host,
                port,
                username,
                password,
                use_tls,
            } => {
                if !use_tls {
                    warn!("SMTP TLS is disabled - not recommended outside development");
                }

                let builder = if *use_tls {
                    AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                        .map_err(NotifyError::Smtp)?
                } else {
                    AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
                };
                let builder = builder
                    .port(*port)
                    .credentials(Credentials::new(username.clone(), password.clone()));

                EmailTransport::Smtp(builder.build())
            }
            EmailTransportConfig::File { path } => {
                if !path.exists() {
                    std::fs::create_dir_all(path)?;
                }
                EmailTransport::File(AsyncFileTransport::<Tokio1Executor>::new(path))
            }
        };

        Ok(Self {
            transport,
            config: config.clone(),
        })
    }

    /// Send the report to every configured recipient.
    pub async fn send_report(&self, report_text: &str, alerts: &[Alert]) -> NotifyResult<()> {
        let sender = self
            .config
            .sender
            .as_deref()
            .ok_or_else(|| NotifyError::EmailNotConfigured("sender".to_string()))?;
        if self.config.recipients.is_empty() {
            return Err(NotifyError::EmailNotConfigured("recipients".to_string()));
        }

        let from: Mailbox = sender
            .parse()
            .map_err(|_| NotifyError::InvalidAddress(sender.to_string()))?;

        let mut builder = Message::builder().from(from).subject(self.subject(alerts));
        for recipient in &self.config.recipients {
            let to: Mailbox = recipient
                .parse()
                .map_err(|_| NotifyError::InvalidAddress(recipient.clone()))?;
            builder = builder.to(to);
        }

        let message = builder.multipart(
            MultiPart::alternative()
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_PLAIN)
                        .body(self.body_text(report_text, alerts)),
                )
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_HTML)
                        .body(self.body_html(report_text, alerts)),
                ),
        )?;

        match &self.transport {
            EmailTransport::Smtp(smtp) => {
                smtp.send(message).await?;
            }
            EmailTransport::File(file) => {
                file.send(message).await?;
            }
        }

        info!(
            "Report email sent to {} recipient(s)",
            self.config.recipients.len()
        );
        Ok(())
    }

    fn subject(&self, alerts: &[Alert]) -> String {
        let suffix = if alerts.is_empty() {
            " - All Clear".to_string()
        } else {
            format!(" - {} ALERT(S)", alerts.len())
        };
        format!(
            "{} Daily Report {}{}",
            self.config.subject_prefix,
            Utc::now().format("%Y-%m-%d"),
            suffix
        )
    }

    fn body_text(&self, report_text: &str, alerts: &[Alert]) -> String {
        let mut body = format!(
            "Daily Report\nGenerated: {}\n\n== Alert Summary ==\n\n",
            Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        );

        if alerts.is_empty() {
            body.push_str("No alerts detected - all systems operating normally\n");
        } else {
            body.push_str(&format!("{} alert(s) detected\n\n", alerts.len()));
            for alert in alerts {
                body.push_str(&format!("- {}: {}\n", alert.severity, alert.message));
            }
        }

        if self.config.include_full_report {
            body.push_str("\n== Full Report ==\n\n");
            body.push_str(report_text);
        } else {
            body.push_str("\nFull report available in the artifact store.\n");
        }

        body.push_str("\n---\nThis is an automated report.\n");
        body
    }

    fn body_html(&self, report_text: &str, alerts: &[Alert]) -> String {
        let alert_section = if alerts.is_empty() {
            "<h2 style=\"color: #16a34a;\">All Clear</h2>\
             <p>No alerts detected - all systems operating normally.</p>"
                .to_string()
        } else {
            let rows: String = alerts
                .iter()
                .map(|alert| {
                    format!(
                        "<tr><td style=\"padding: 8px; border: 1px solid #e5e7eb; \
                         color: {}; font-weight: bold;\">{}</td>\
                         <td style=\"padding: 8px; border: 1px solid #e5e7eb;\">{}</td></tr>",
                        severity_color(alert),
                        alert.severity,
                        alert.message
                    )
                })
                .collect();
            format!(
                "<h2 style=\"color: #dc2626;\">{} Alert(s) Detected</h2>\
                 <table style=\"width: 100%; border-collapse: collapse;\">\
                 <thead><tr><th style=\"padding: 8px; text-align: left;\">Severity</th>\
                 <th style=\"padding: 8px; text-align: left;\">Alert</th></tr></thead>\
                 <tbody>{}</tbody></table>",
                alerts.len(),
                rows
            )
        };

        let report_section = if self.config.include_full_report {
            format!(
                "<h2>Full Report</h2><pre style=\"background-color: #f9fafb; \
                 padding: 15px; border: 1px solid #e5e7eb; overflow-x: auto;\">{}</pre>",
                report_text
            )
        } else {
            String::new()
        };

        format!(
            "<!DOCTYPE html><html><head><meta charset=\"UTF-8\"></head>\
             <body style=\"font-family: Arial, sans-serif; color: #374151; \
             max-width: 800px; margin: 0 auto; padding: 20px;\">\
             <h1>Daily Cloud Health Report</h1>\
             <p>Generated: {}</p>{}{}\
             <p style=\"color: #6b7280; font-size: 14px;\">This is an automated report.</p>\
             </body></html>",
            Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
            alert_section,
            report_section
        )
    }
}

fn severity_color(alert: &Alert) -> &'static str {
    use lens_core::AlertSeverity;
    match alert.severity {
        AlertSeverity::Critical => "#dc2626",
        AlertSeverity::High => "#ea580c",
        AlertSeverity::Medium => "#ca8a04",
        AlertSeverity::Low => "#65a30d",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lens_core::{AlertCategory, AlertSeverity};

    fn config_with_file_transport(dir: &std::path::Path) -> EmailConfig {
        EmailConfig {
            enabled: true,
            sender: Some("reports@example.com".to_string()),
            recipients: vec!["ops@example.com".to_string()],
            transport: EmailTransportConfig::File {
                path: dir.to_path_buf(),
            },
            ..Default::default()
        }
    }

    fn alert() -> Alert {
        Alert {
            severity: AlertSeverity::Critical,
            category: AlertCategory::Logs,
            message: "20 errors detected (threshold: 15)".to_string(),
        }
    }

    #[test]
    fn test_subject_reflects_alerts() {
        let dir = tempfile::tempdir().unwrap();
        let sender = EmailSender::new(&config_with_file_transport(dir.path())).unwrap();

        assert!(sender.subject(&[]).ends_with("All Clear"));
        assert!(sender.subject(&[alert()]).ends_with("1 ALERT(S)"));
    }

    #[test]
    fn test_text_body_lists_alerts() {
        let dir = tempfile::tempdir().unwrap();
        let sender = EmailSender::new(&config_with_file_transport(dir.path())).unwrap();

        let body = sender.body_text("REPORT CONTENT", &[alert()]);
        assert!(body.contains("1 alert(s) detected"));
        assert!(body.contains("CRITICAL: 20 errors detected"));
        assert!(body.contains("REPORT CONTENT"));
    }

    #[test]
    fn test_html_body_colors_severity() {
        let dir = tempfile::tempdir().unwrap();
        let sender = EmailSender::new(&config_with_file_transport(dir.path())).unwrap();

        let html = sender.body_html("REPORT", &[alert()]);
        assert!(html.contains("#dc2626"));
        assert!(html.contains("CRITICAL"));
    }

    #[tokio::test]
    async fn test_send_via_file_transport() {
        let dir = tempfile::tempdir().unwrap();
        let sender = EmailSender::new(&config_with_file_transport(dir.path())).unwrap();

        sender.send_report("REPORT", &[alert()]).await.unwrap();

        let written: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(written.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_sender_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_with_file_transport(dir.path());
        config.sender = None;
        let sender = EmailSender::new(&config).unwrap();

        let result = sender.send_report("REPORT", &[]).await;
        assert!(matches!(result, Err(NotifyError::EmailNotConfigured(_))));
    }
}
