//! Slack webhook delivery.

use chrono::Utc;
use serde_json::json;
use tracing::info;

use lens_core::Alert;

use crate::error::{NotifyError, NotifyResult};

/// How many alerts the Slack message lists before cutting off.
const MAX_SLACK_ALERTS: usize = 5;

/// Posts report summaries to a Slack incoming webhook.
pub struct SlackSender {
    webhook_url: String,
    client: reqwest::Client,
}

impl SlackSender {
    pub fn new(webhook_url: impl Into<String>) -> NotifyResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()?;
        Ok(Self {
            webhook_url: webhook_url.into(),
            client,
        })
    }

    /// Post a summary message with the top alerts.
    pub async fn send_report(&self, project_name: &str, alerts: &[Alert]) -> NotifyResult<()> {
        let payload = Self::build_payload(project_name, alerts);

        let response = self
            .client
            .post(&self.webhook_url)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(NotifyError::SlackStatus(response.status().as_u16()));
        }

        info!("Slack notification sent");
        Ok(())
    }

    fn build_payload(project_name: &str, alerts: &[Alert]) -> serde_json::Value {
        let status_line = if alerts.is_empty() {
            "*All Clear*".to_string()
        } else {
            format!("*{} ALERT(S)*", alerts.len())
        };

        let mut blocks = vec![
            json!({
                "type": "header",
                "text": {
                    "type": "plain_text",
                    "text": format!("{} Report - {}", project_name, Utc::now().format("%Y-%m-%d")),
                }
            }),
            json!({
                "type": "section",
                "text": {
                    "type": "mrkdwn",
                    "text": format!(
                        "{}\n\nGenerated: {}",
                        status_line,
                        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
                    ),
                }
            }),
        ];

        if !alerts.is_empty() {
            let listed: String = alerts
                .iter()
                .take(MAX_SLACK_ALERTS)
                .map(|a| format!("- *{}*: {}", a.severity, a.message))
                .collect::<Vec<_>>()
                .join("\n");
            blocks.push(json!({
                "type": "section",
                "text": {
                    "type": "mrkdwn",
                    "text": format!("*Top Alerts:*\n{}", listed),
                }
            }));
        }

        json!({ "blocks": blocks })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lens_core::{AlertCategory, AlertSeverity};

    fn alert(message: &str) -> Alert {
        Alert {
            severity: AlertSeverity::High,
            category: AlertCategory::Cost,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_payload_without_alerts() {
        let payload = SlackSender::build_payload("CloudLens", &[]);
        let blocks = payload["blocks"].as_array().unwrap();

        assert_eq!(blocks.len(), 2);
        assert!(blocks[1]["text"]["text"]
            .as_str()
            .unwrap()
            .contains("All Clear"));
    }

    #[test]
    fn test_payload_caps_listed_alerts() {
        let alerts: Vec<Alert> = (0..8).map(|i| alert(&format!("alert {}", i))).collect();
        let payload = SlackSender::build_payload("CloudLens", &alerts);
        let blocks = payload["blocks"].as_array().unwrap();

        assert_eq!(blocks.len(), 3);
        let listing = blocks[2]["text"]["text"].as_str().unwrap();
        assert!(listing.contains("alert 4"));
        assert!(!listing.contains("alert 5"));
    }

    #[tokio::test]
    async fn test_unreachable_webhook_errors() {
        let sender = SlackSender::new("http://127.0.0.1:1/webhook").unwrap();
        let result = sender.send_report("CloudLens", &[]).await;
        assert!(matches!(result, Err(NotifyError::Slack(_))));
    }
}
