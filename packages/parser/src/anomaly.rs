//! Structured anomalies collected during a parse run.
//!
//! Anomalies replace ad-hoc warning strings: each one carries a machine-
//! readable kind plus enough context (article number, source line) to review
//! the affected unit later. Anomalies are data, not errors: the pipeline
//! keeps going and returns them alongside the records.

use std::fmt;

use serde::Serialize;

use crate::types::ArticleNumber;

/// Kinds of recoverable anomalies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnomalyKind {
    /// A line that looks like an article heading but carries no number.
    MalformedHeading,

    /// An amendment clause whose target article could not be resolved.
    UnresolvedTarget,

    /// An article number that breaks the ascending parse order.
    NonMonotonicNumber,

    /// Two records sharing the same (article number, amendment type) pair.
    DuplicateArticle,

    /// An amendment that references its own article number.
    SelfReferentialAmendment,

    /// A unit whose body text is empty after trimming.
    EmptyBody,

    /// Caller supplied empty or blank input text.
    EmptyInput,
}

impl AnomalyKind {
    /// Get the string value used in reports and flattened metadata.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MalformedHeading => "malformed-heading",
            Self::UnresolvedTarget => "unresolved-target",
            Self::NonMonotonicNumber => "non-monotonic-number",
            Self::DuplicateArticle => "duplicate-article",
            Self::SelfReferentialAmendment => "self-referential-amendment",
            Self::EmptyBody => "empty-body",
            Self::EmptyInput => "empty-input",
        }
    }
}

/// A recoverable problem found while parsing one regulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Anomaly {
    /// What went wrong.
    pub kind: AnomalyKind,

    /// Article the anomaly belongs to, when one could be identified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article: Option<ArticleNumber>,

    /// 1-based source line, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,

    /// Human-readable description.
    pub message: String,
}

impl Anomaly {
    /// Create a new anomaly.
    #[must_use]
    pub fn new(kind: AnomalyKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            article: None,
            line: None,
            message: message.into(),
        }
    }

    /// Attach the affected article number.
    #[must_use]
    pub fn with_article(mut self, article: ArticleNumber) -> Self {
        self.article = Some(article);
        self
    }

    /// Attach the 1-based source line.
    #[must_use]
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.kind.as_str())?;
        if let Some(article) = &self.article {
            write!(f, " Pasal {article}")?;
        }
        if let Some(line) = self.line {
            write!(f, " (line {line})")?;
        }
        write!(f, ": {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anomaly_kind_as_str() {
        assert_eq!(AnomalyKind::MalformedHeading.as_str(), "malformed-heading");
        assert_eq!(AnomalyKind::UnresolvedTarget.as_str(), "unresolved-target");
        assert_eq!(AnomalyKind::EmptyInput.as_str(), "empty-input");
    }

    #[test]
    fn test_anomaly_display_full() {
        let anomaly = Anomaly::new(AnomalyKind::UnresolvedTarget, "no target article in clause")
            .with_article(ArticleNumber::new(20, ""))
            .with_line(14);

        assert_eq!(
            anomaly.to_string(),
            "[unresolved-target] Pasal 20 (line 14): no target article in clause"
        );
    }

    #[test]
    fn test_anomaly_display_minimal() {
        let anomaly = Anomaly::new(AnomalyKind::EmptyInput, "input text is empty");
        assert_eq!(anomaly.to_string(), "[empty-input]: input text is empty");
    }

    #[test]
    fn test_anomaly_kind_serializes_kebab_case() {
        let json = serde_json::to_string(&AnomalyKind::SelfReferentialAmendment).unwrap();
        assert_eq!(json, "\"self-referential-amendment\"");
    }
}
