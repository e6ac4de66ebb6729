//! The parse pipeline tying all stages together.
//!
//! One call per regulation: segment the raw text, classify and tag each
//! unit sequentially, assemble records, then validate the batch. Every
//! failure mode inside the run is collected as an anomaly; a single
//! malformed article never blocks the remaining hundreds.

use unicode_normalization::UnicodeNormalization;

use crate::amendment::{classify, RegulationContext};
use crate::anomaly::{Anomaly, AnomalyKind};
use crate::assemble::assemble;
use crate::concepts::Vocabulary;
use crate::segment::segment;
use crate::types::{LegalRecord, Regulation};
use crate::validate::validate;

/// Result of parsing one regulation: the assembled records plus every
/// anomaly collected along the way.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    /// Assembled records in parse order.
    pub records: Vec<LegalRecord>,

    /// Anomalies from segmentation, classification, assembly, and
    /// validation, in discovery order.
    pub anomalies: Vec<Anomaly>,
}

/// Parse one regulation's raw text into indexable records.
///
/// Stateless and deterministic: the same text always yields the same
/// outcome. Blank input is the distinguished caller-input case: an empty
/// record sequence with a single `empty-input` anomaly, not an error.
///
/// # Examples
/// ```
/// use vocana_parser::{parse_regulation, Regulation, Vocabulary};
///
/// let regulation = Regulation::new("UU 13/2003", "Ketenagakerjaan").unwrap();
/// let vocabulary = Vocabulary::employment_law();
///
/// let text = "Pasal 1\nTenaga kerja adalah setiap orang yang mampu bekerja.";
/// let outcome = parse_regulation(text, &regulation, &vocabulary);
///
/// assert_eq!(outcome.records.len(), 1);
/// assert!(outcome.anomalies.is_empty());
/// ```
#[must_use]
pub fn parse_regulation(
    raw_text: &str,
    regulation: &Regulation,
    vocabulary: &Vocabulary,
) -> ParseOutcome {
    if raw_text.trim().is_empty() {
        return ParseOutcome {
            records: Vec::new(),
            anomalies: vec![Anomaly::new(
                AnomalyKind::EmptyInput,
                "input text is empty",
            )],
        };
    }

    // Consolidated statute text arrives with mixed unicode forms
    let text: String = raw_text.nfc().collect();

    let (units, mut anomalies) = segment(&text);

    let mut context = RegulationContext::new();
    let mut records = Vec::with_capacity(units.len());

    // Sequential by design: target resolution consults earlier articles
    for unit in &units {
        let classification = classify(unit, &context);
        anomalies.extend(classification.anomalies.iter().cloned());
        context.record(&unit.number);

        let concepts = vocabulary.tag(&unit.body);

        match assemble(unit, &classification, concepts, regulation) {
            Ok(record) => records.push(record),
            Err(anomaly) => {
                tracing::warn!(article = %unit.number, "Excluding record: {}", anomaly.message);
                anomalies.push(anomaly);
            }
        }
    }

    anomalies.extend(validate(&records));

    ParseOutcome { records, anomalies }
}
