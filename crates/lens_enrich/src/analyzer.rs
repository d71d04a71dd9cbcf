//! Text analysis client implementations.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{EnrichError, EnrichResult};
use crate::types::TextInsights;

/// Texts shorter than this are not worth an API call.
const MIN_TEXT_LEN: usize = 10;

/// The service rejects documents larger than this.
const MAX_TEXT_BYTES: usize = 5000;

/// A text analysis capability: key phrases, sentiment, entities.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TextAnalyzer: Send + Sync {
    async fn analyze(&self, text: &str) -> EnrichResult<TextInsights>;
}

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
    language: &'a str,
}

/// HTTP client for a remote text analysis service.
pub struct HttpAnalyzer {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpAnalyzer {
    /// Create a client for the given endpoint with a bounded request
    /// timeout.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> EnrichResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    /// Truncate to the service's document limit on a char boundary.
    fn truncate(text: &str) -> &str {
        if text.len() <= MAX_TEXT_BYTES {
            return text;
        }
        let mut end = MAX_TEXT_BYTES;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        &text[..end]
    }
}

#[async_trait::async_trait]
impl TextAnalyzer for HttpAnalyzer {
    async fn analyze(&self, text: &str) -> EnrichResult<TextInsights> {
        if text.trim().len() < MIN_TEXT_LEN {
            warn!("Text too short for analysis, returning empty insights");
            return Ok(TextInsights::empty());
        }

        let body = AnalyzeRequest {
            text: Self::truncate(text),
            language: "en",
        };

        debug!("Requesting text analysis from {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(EnrichError::Status(response.status().as_u16()));
        }

        let insights: TextInsights = response.json().await?;
        debug!(
            "Detected {} key phrases, {} entities",
            insights.key_phrases.len(),
            insights.entities.len()
        );
        Ok(insights)
    }
}

/// Analyzer used when enrichment is disabled or unconfigured; always
/// succeeds with empty insights.
pub struct NoopAnalyzer;

#[async_trait::async_trait]
impl TextAnalyzer for NoopAnalyzer {
    async fn analyze(&self, _text: &str) -> EnrichResult<TextInsights> {
        Ok(TextInsights::empty())
    }
}

/// Run the analyzer and degrade any failure to empty insights with a
/// logged warning.
pub async fn analyze_or_empty(analyzer: &dyn TextAnalyzer, text: &str) -> TextInsights {
    match analyzer.analyze(text).await {
        Ok(insights) => insights,
        Err(e) => {
            warn!("Text analysis failed, continuing without insights: {}", e);
            TextInsights::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::KeyPhrase;

    #[tokio::test]
    async fn test_noop_analyzer_returns_empty() {
        let insights = NoopAnalyzer
            .analyze("plenty of text to analyze here")
            .await
            .unwrap();
        assert!(insights.is_empty());
    }

    #[tokio::test]
    async fn test_short_text_skips_request() {
        // The endpoint is unreachable; a short text must not even try.
        let analyzer =
            HttpAnalyzer::new("http://127.0.0.1:1/analyze", Duration::from_secs(1)).unwrap();
        let insights = analyzer.analyze("short").await.unwrap();
        assert!(insights.is_empty());
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let text = "é".repeat(MAX_TEXT_BYTES); // 2 bytes per char
        let truncated = HttpAnalyzer::truncate(&text);
        assert!(truncated.len() <= MAX_TEXT_BYTES);
        assert!(truncated.is_char_boundary(truncated.len()));
    }

    #[tokio::test]
    async fn test_analyze_or_empty_swallows_failure() {
        let analyzer =
            HttpAnalyzer::new("http://127.0.0.1:1/analyze", Duration::from_millis(100)).unwrap();
        let insights =
            analyze_or_empty(&analyzer, "a text long enough to trigger a real request").await;
        assert!(insights.is_empty());
    }

    #[tokio::test]
    async fn test_analyze_or_empty_passes_through() {
        let mut mock = MockTextAnalyzer::new();
        mock.expect_analyze().returning(|_| {
            Ok(TextInsights {
                key_phrases: vec![KeyPhrase {
                    text: "cost spike".to_string(),
                    score: 0.9,
                }],
                ..Default::default()
            })
        });

        let insights = analyze_or_empty(&mock, "long enough input text").await;
        assert_eq!(insights.key_phrases.len(), 1);
    }
}
