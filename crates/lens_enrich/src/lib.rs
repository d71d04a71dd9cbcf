//! # lens_enrich
//!
//! Optional NLP enrichment for CloudLens: key phrases, sentiment, and
//! named entities extracted from the generated analysis summaries.
//!
//! Enrichment never decides the fate of a run. The [`TextAnalyzer`]
//! trait is the seam: the CLI wires in an [`HttpAnalyzer`] when an
//! endpoint is configured, a [`NoopAnalyzer`] otherwise, and every
//! failure path collapses to [`TextInsights::empty`].

pub mod analyzer;
pub mod error;
pub mod types;

pub use analyzer::{analyze_or_empty, HttpAnalyzer, NoopAnalyzer, TextAnalyzer};
pub use error::{EnrichError, EnrichResult};
pub use types::{Entity, KeyPhrase, Sentiment, TextInsights};
