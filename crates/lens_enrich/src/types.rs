//! Result types returned by the text analysis service.

use serde::{Deserialize, Serialize};

/// A key phrase with its detection confidence (0.0 to 1.0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyPhrase {
    pub text: String,
    #[serde(default)]
    pub score: f64,
}

/// A named entity with its type tag and confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub score: f64,
}

/// Document-level sentiment classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub label: String,
    #[serde(default)]
    pub positive: f64,
    #[serde(default)]
    pub negative: f64,
    #[serde(default)]
    pub neutral: f64,
    #[serde(default)]
    pub mixed: f64,
}

/// Everything the analysis service extracted from one text.
///
/// All fields degrade to empty; downstream code must accept a fully
/// empty value without special-casing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextInsights {
    #[serde(default)]
    pub key_phrases: Vec<KeyPhrase>,
    #[serde(default)]
    pub sentiment: Option<Sentiment>,
    #[serde(default)]
    pub entities: Vec<Entity>,
}

impl TextInsights {
    /// An insights value with nothing detected.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.key_phrases.is_empty() && self.sentiment.is_none() && self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_insights() {
        let insights = TextInsights::empty();
        assert!(insights.is_empty());
    }

    #[test]
    fn test_deserialize_partial_response() {
        // A service may omit whole sections; missing fields default.
        let insights: TextInsights =
            serde_json::from_str(r#"{"key_phrases": [{"text": "cost spike"}]}"#).unwrap();
        assert_eq!(insights.key_phrases.len(), 1);
        assert_eq!(insights.key_phrases[0].text, "cost spike");
        assert_eq!(insights.key_phrases[0].score, 0.0);
        assert!(insights.sentiment.is_none());
    }
}
