//! Batch-level structural validation over assembled records.
//!
//! Checks invariants that only hold across the whole sequence: ascending
//! article order, uniqueness of (number, amendment) pairs, and sane
//! amendment linkage. Violations are reported as anomalies; no record is
//! ever discarded here.

use std::collections::HashSet;

use crate::anomaly::{Anomaly, AnomalyKind};
use crate::types::{AmendmentType, LegalRecord};

/// Validate a record batch, returning every structural anomaly found.
///
/// Records pass through untouched; the caller keeps the full batch and
/// decides what to do with flagged entries.
#[must_use]
pub fn validate(records: &[LegalRecord]) -> Vec<Anomaly> {
    let mut anomalies = Vec::new();

    check_ordering(records, &mut anomalies);
    check_duplicates(records, &mut anomalies);
    check_self_references(records, &mut anomalies);

    anomalies
}

/// Article numbers must be strictly increasing in parse order, except that
/// an Inserted record may share the previous record's base with a differing
/// suffix (insertion blocks like 14, 14A, 14B).
fn check_ordering(records: &[LegalRecord], anomalies: &mut Vec<Anomaly>) {
    for pair in records.windows(2) {
        let (prev, cur) = (&pair[0], &pair[1]);

        if cur.article_number > prev.article_number {
            continue;
        }

        let inserted_sibling = cur.amendment_type == AmendmentType::Inserted
            && cur.article_number.base() == prev.article_number.base()
            && cur.article_number.suffix() != prev.article_number.suffix();

        if inserted_sibling {
            continue;
        }

        anomalies.push(
            Anomaly::new(
                AnomalyKind::NonMonotonicNumber,
                format!(
                    "Pasal {} follows Pasal {} out of order",
                    cur.article_number, prev.article_number
                ),
            )
            .with_article(cur.article_number.clone())
            .with_line(cur.source_line_range.0),
        );
    }
}

/// No two records may share an identical (article number, amendment type)
/// pair within one regulation.
fn check_duplicates(records: &[LegalRecord], anomalies: &mut Vec<Anomaly>) {
    let mut seen: HashSet<(String, AmendmentType)> = HashSet::new();

    for record in records {
        let key = (record.article_number.to_string(), record.amendment_type);
        if !seen.insert(key) {
            anomalies.push(
                Anomaly::new(
                    AnomalyKind::DuplicateArticle,
                    format!(
                        "duplicate (Pasal {}, {}) pair",
                        record.article_number,
                        record.amendment_type.as_str()
                    ),
                )
                .with_article(record.article_number.clone())
                .with_line(record.source_line_range.0),
            );
        }
    }
}

/// An amendment must not reference its own article number.
fn check_self_references(records: &[LegalRecord], anomalies: &mut Vec<Anomaly>) {
    for record in records {
        if record.amended_article_ref.as_ref() == Some(&record.article_number) {
            anomalies.push(
                Anomaly::new(
                    AnomalyKind::SelfReferentialAmendment,
                    format!("Pasal {} amends itself", record.article_number),
                )
                .with_article(record.article_number.clone())
                .with_line(record.source_line_range.0),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ArticleNumber;
    use std::collections::BTreeSet;

    fn record(number: &str, amendment_type: AmendmentType) -> LegalRecord {
        LegalRecord {
            regulation_id: "UU 13/2003".to_string(),
            article_number: number.parse().unwrap(),
            amendment_type,
            amended_article_ref: None,
            body_text: "Isi pasal.".to_string(),
            concepts: BTreeSet::new(),
            section_label: "General".to_string(),
            source_line_range: (1, 1),
        }
    }

    #[test]
    fn test_validate_clean_batch() {
        let records = vec![
            record("1", AmendmentType::Unchanged),
            record("2", AmendmentType::Unchanged),
            record("3", AmendmentType::Modified),
        ];
        assert!(validate(&records).is_empty());
    }

    #[test]
    fn test_validate_inserted_suffix_is_in_order() {
        let records = vec![
            record("14", AmendmentType::Unchanged),
            record("14A", AmendmentType::Inserted),
            record("14B", AmendmentType::Inserted),
            record("15", AmendmentType::Unchanged),
        ];
        assert!(validate(&records).is_empty());
    }

    #[test]
    fn test_validate_out_of_order_flagged() {
        let records = vec![
            record("15", AmendmentType::Unchanged),
            record("14", AmendmentType::Unchanged),
        ];
        let anomalies = validate(&records);

        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].kind, AnomalyKind::NonMonotonicNumber);
        assert_eq!(anomalies[0].article, Some(ArticleNumber::new(14, "")));
    }

    #[test]
    fn test_validate_inserted_sibling_exception() {
        // 14B then 14A breaks strict ascent but shares the base with a
        // differing suffix on an Inserted record, so it passes
        let records = vec![
            record("14B", AmendmentType::Inserted),
            record("14A", AmendmentType::Inserted),
        ];
        assert!(validate(&records).is_empty());
    }

    #[test]
    fn test_validate_equal_numbers_flagged() {
        let records = vec![
            record("14", AmendmentType::Unchanged),
            record("14", AmendmentType::Modified),
        ];
        let anomalies = validate(&records);

        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].kind, AnomalyKind::NonMonotonicNumber);
    }

    #[test]
    fn test_validate_duplicate_pair_flagged() {
        let records = vec![
            record("14", AmendmentType::Modified),
            record("15", AmendmentType::Unchanged),
            record("14", AmendmentType::Modified),
        ];
        let anomalies = validate(&records);

        assert!(anomalies
            .iter()
            .any(|a| a.kind == AnomalyKind::DuplicateArticle));
    }

    #[test]
    fn test_validate_same_number_different_amendment_not_duplicate() {
        let records = vec![
            record("14", AmendmentType::Modified),
            record("14", AmendmentType::Deleted),
        ];
        let anomalies = validate(&records);

        // Ordering fires, but there is no duplicate-pair anomaly
        assert!(anomalies
            .iter()
            .all(|a| a.kind != AnomalyKind::DuplicateArticle));
    }

    #[test]
    fn test_validate_self_reference_flagged() {
        let mut bad = record("20", AmendmentType::Modified);
        bad.amended_article_ref = Some("20".parse().unwrap());
        let records = vec![record("19", AmendmentType::Unchanged), bad];

        let anomalies = validate(&records);
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].kind, AnomalyKind::SelfReferentialAmendment);
    }

    #[test]
    fn test_validate_never_discards_records() {
        let records = vec![
            record("15", AmendmentType::Unchanged),
            record("14", AmendmentType::Unchanged),
        ];
        let before = records.clone();
        let _ = validate(&records);
        assert_eq!(records, before);
    }
}
