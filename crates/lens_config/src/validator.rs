//! Config validation utilities.

use crate::models::Config;

/// Validation result with details.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(message.into());
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

/// Validator for a loaded configuration.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::new();

        Self::validate_thresholds(config, &mut result);
        Self::validate_log_sources(config, &mut result);
        Self::validate_patterns(config, &mut result);
        Self::validate_delivery(config, &mut result);

        result
    }

    fn validate_thresholds(config: &Config, result: &mut ValidationResult) {
        let cost = &config.cost_analysis.thresholds;
        if cost.high_cost_service_percent < 0.0 {
            result.add_error("cost_analysis.thresholds.high_cost_service_percent must be non-negative");
        }
        if cost.high_cost_service_percent > 100.0 {
            result.add_warning(
                "high_cost_service_percent above 100% can never match any service",
            );
        }
        if cost.cost_increase_alert_percent < 0.0 {
            result.add_error("cost_analysis.thresholds.cost_increase_alert_percent must be non-negative");
        }

        let logs = &config.log_analysis.thresholds;
        if logs.max_error_rate_percent < 0.0 {
            result.add_error("log_analysis.thresholds.max_error_rate_percent must be non-negative");
        }
        if logs.max_error_rate_percent > 100.0 {
            result.add_warning("max_error_rate_percent above 100% can never trigger");
        }
    }

    fn validate_log_sources(config: &Config, result: &mut ValidationResult) {
        if config.log_analysis.enabled && config.log_analysis.data_sources.is_empty() {
            result.add_error("log_analysis is enabled but has no data_sources");
        }

        for source in &config.log_analysis.data_sources {
            if source.path.as_os_str().is_empty() {
                result.add_error("log source has an empty path");
            }
        }
    }

    fn validate_patterns(config: &Config, result: &mut ValidationResult) {
        for pattern in &config.log_analysis.error_patterns {
            if pattern.name.is_empty() {
                result.add_error("error pattern has an empty name");
            }
            if pattern.keywords.is_empty() {
                result.add_error(format!(
                    "error pattern '{}' has no keywords",
                    pattern.name
                ));
            }
        }
    }

    fn validate_delivery(config: &Config, result: &mut ValidationResult) {
        let notify = &config.notifications;
        if notify.enabled && notify.email.enabled {
            if notify.email.sender.is_none() {
                result.add_error("email notifications enabled without a sender");
            }
            if notify.email.recipients.is_empty() {
                result.add_error("email notifications enabled without recipients");
            }
        }
        if notify.enabled && notify.slack.enabled && notify.slack.webhook_url.is_none() {
            result.add_error("slack notifications enabled without a webhook_url");
        }
        if !notify.enabled && (notify.email.enabled || notify.slack.enabled) {
            result.add_warning(
                "notification channels configured but notifications.enabled is false",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ErrorPattern, NotificationConfig, SlackConfig};

    #[test]
    fn test_default_config_is_valid() {
        let result = ConfigValidator::validate(&Config::default());
        assert!(result.valid, "errors: {:?}", result.errors);
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let mut config = Config::default();
        config.log_analysis.thresholds.max_error_rate_percent = -1.0;
        let result = ConfigValidator::validate(&config);
        assert!(!result.valid);
    }

    #[test]
    fn test_empty_pattern_keywords_rejected() {
        let mut config = Config::default();
        config.log_analysis.error_patterns = vec![ErrorPattern {
            name: "Broken".to_string(),
            keywords: vec![],
        }];
        let result = ConfigValidator::validate(&config);
        assert!(!result.valid);
        assert!(result.errors[0].contains("Broken"));
    }

    #[test]
    fn test_slack_without_webhook_rejected() {
        let mut config = Config::default();
        config.notifications = NotificationConfig {
            enabled: true,
            slack: SlackConfig {
                enabled: true,
                webhook_url: None,
            },
            ..Default::default()
        };
        let result = ConfigValidator::validate(&config);
        assert!(!result.valid);
    }

    #[test]
    fn test_channels_without_master_switch_warn() {
        let mut config = Config::default();
        config.notifications.slack.enabled = true;
        config.notifications.slack.webhook_url = Some("https://hooks.slack.com/x".to_string());
        let result = ConfigValidator::validate(&config);
        assert!(result.valid);
        assert!(!result.warnings.is_empty());
    }
}
