//! Record assembly and flattening for the indexing collaborator.
//!
//! Assembly is a pure merge of the segmented unit, its classification, and
//! its concept tags into a [`LegalRecord`]. Flattening turns a record into
//! the shape the external index accepts: a body string plus a flat metadata
//! mapping of scalar values.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::amendment::Classification;
use crate::anomaly::{Anomaly, AnomalyKind};
use crate::types::{ConceptTag, LegalRecord, RawUnit, Regulation};

/// Assemble a record from one unit and its per-stage outputs.
///
/// Deterministic: identical inputs always produce an identical record.
/// A body that is empty after trimming violates the record invariant; the
/// unit is excluded and an `empty-body` anomaly returned instead.
pub fn assemble(
    unit: &RawUnit,
    classification: &Classification,
    concepts: BTreeSet<ConceptTag>,
    regulation: &Regulation,
) -> Result<LegalRecord, Anomaly> {
    let body_text = unit.body.trim().to_string();

    if body_text.is_empty() {
        return Err(Anomaly::new(
            AnomalyKind::EmptyBody,
            format!("Pasal {} has no body text", unit.number),
        )
        .with_article(unit.number.clone())
        .with_line(unit.line_range.0));
    }

    Ok(LegalRecord {
        regulation_id: regulation.id.clone(),
        article_number: unit.number.clone(),
        amendment_type: classification.amendment_type,
        amended_article_ref: classification.amended_ref.clone(),
        body_text,
        concepts,
        section_label: unit.section_label.clone(),
        source_line_range: unit.line_range,
    })
}

/// A scalar metadata value the indexing collaborator accepts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetaValue {
    /// String value.
    Str(String),

    /// Integer value.
    Int(i64),

    /// Boolean value.
    Bool(bool),
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<usize> for MetaValue {
    fn from(value: usize) -> Self {
        Self::Int(value as i64)
    }
}

/// The flattened unit handed to the indexing collaborator: an id, the
/// document text to embed, and a flat scalar metadata mapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexDocument {
    /// Stable document id (e.g., "uu13_2003_pasal_14a").
    pub id: String,

    /// Composed document text.
    pub text: String,

    /// Flat metadata mapping.
    pub metadata: BTreeMap<String, MetaValue>,
}

impl IndexDocument {
    /// Flatten a record into the collaborator's document shape.
    #[must_use]
    pub fn from_record(record: &LegalRecord, regulation: &Regulation) -> Self {
        let id = format!(
            "{}_pasal_{}",
            regulation.to_slug(),
            record.article_number.to_string().to_lowercase()
        );

        Self {
            id,
            text: compose_text(record, regulation),
            metadata: flatten_metadata(record, regulation),
        }
    }
}

/// Compose the document text the collaborator will embed.
fn compose_text(record: &LegalRecord, regulation: &Regulation) -> String {
    let mut text = format!(
        "Pasal {} ({}) - {}",
        record.article_number, regulation.id, record.section_label
    );

    if record.amendment_type != crate::types::AmendmentType::Unchanged {
        text.push_str(&format!("\nPerubahan: {}", record.amendment_type.as_str()));
        if let Some(target) = &record.amended_article_ref {
            text.push_str(&format!(" (Pasal {target})"));
        }
    }

    text.push_str("\n\n");
    text.push_str(&record.body_text);

    if !record.concepts.is_empty() {
        text.push_str("\n\nKonsep: ");
        text.push_str(&join_concepts(&record.concepts));
    }

    text
}

/// Build the flat metadata mapping for one record.
fn flatten_metadata(record: &LegalRecord, regulation: &Regulation) -> BTreeMap<String, MetaValue> {
    let mut metadata = BTreeMap::new();

    metadata.insert("regulation".to_string(), MetaValue::from(regulation.id.as_str()));
    metadata.insert(
        "regulation_title".to_string(),
        MetaValue::from(regulation.title.as_str()),
    );
    metadata.insert("tier".to_string(), MetaValue::from(regulation.tier.as_str()));
    metadata.insert(
        "hierarchy_level".to_string(),
        MetaValue::Int(i64::from(regulation.tier.hierarchy_level())),
    );
    metadata.insert(
        "pasal_number".to_string(),
        MetaValue::from(record.article_number.to_string()),
    );
    metadata.insert(
        "amendment_type".to_string(),
        MetaValue::from(record.amendment_type.as_str()),
    );
    if let Some(target) = &record.amended_article_ref {
        metadata.insert(
            "amended_article_ref".to_string(),
            MetaValue::from(target.to_string()),
        );
    }
    metadata.insert(
        "concepts".to_string(),
        MetaValue::from(join_concepts(&record.concepts)),
    );
    metadata.insert(
        "section_label".to_string(),
        MetaValue::from(record.section_label.as_str()),
    );
    metadata.insert("word_count".to_string(), MetaValue::from(record.word_count()));
    metadata.insert(
        "line_start".to_string(),
        MetaValue::from(record.source_line_range.0),
    );
    metadata.insert(
        "line_end".to_string(),
        MetaValue::from(record.source_line_range.1),
    );

    metadata
}

/// Comma-join a concept set in its deterministic order.
fn join_concepts(concepts: &BTreeSet<ConceptTag>) -> String {
    concepts
        .iter()
        .map(ConceptTag::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AmendmentType, ArticleNumber};

    fn test_regulation() -> Regulation {
        Regulation::new(
            "UU 13/2003",
            "Undang-Undang Nomor 13 Tahun 2003 tentang Ketenagakerjaan",
        )
        .unwrap()
    }

    fn test_unit(number: &str, body: &str) -> RawUnit {
        RawUnit {
            number: number.parse().unwrap(),
            heading_clause: String::new(),
            body: body.to_string(),
            section_label: "BAB IX HUBUNGAN KERJA".to_string(),
            line_range: (10, 12),
        }
    }

    fn unchanged() -> Classification {
        Classification {
            amendment_type: AmendmentType::Unchanged,
            amended_ref: None,
            anomalies: Vec::new(),
        }
    }

    #[test]
    fn test_assemble_trims_body() {
        let unit = test_unit("50", "  Hubungan kerja terjadi karena perjanjian kerja.  ");
        let record = assemble(&unit, &unchanged(), BTreeSet::new(), &test_regulation()).unwrap();

        assert_eq!(record.body_text, "Hubungan kerja terjadi karena perjanjian kerja.");
        assert_eq!(record.regulation_id, "UU 13/2003");
        assert_eq!(record.section_label, "BAB IX HUBUNGAN KERJA");
        assert_eq!(record.source_line_range, (10, 12));
    }

    #[test]
    fn test_assemble_rejects_empty_body() {
        let unit = test_unit("51", "   \n  ");
        let result = assemble(&unit, &unchanged(), BTreeSet::new(), &test_regulation());

        let anomaly = result.unwrap_err();
        assert_eq!(anomaly.kind, AnomalyKind::EmptyBody);
        assert_eq!(anomaly.article, Some(ArticleNumber::new(51, "")));
        assert_eq!(anomaly.line, Some(10));
    }

    #[test]
    fn test_assemble_deterministic() {
        let unit = test_unit("50", "Hubungan kerja terjadi karena perjanjian kerja.");
        let concepts: BTreeSet<ConceptTag> = [ConceptTag::new("pkwt")].into_iter().collect();

        let first = assemble(&unit, &unchanged(), concepts.clone(), &test_regulation()).unwrap();
        let second = assemble(&unit, &unchanged(), concepts, &test_regulation()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_index_document_id() {
        let unit = test_unit("14A", "Ketentuan tambahan mengenai PKWT.");
        let classification = Classification {
            amendment_type: AmendmentType::Inserted,
            amended_ref: Some(ArticleNumber::new(14, "")),
            anomalies: Vec::new(),
        };
        let record = assemble(&unit, &classification, BTreeSet::new(), &test_regulation()).unwrap();
        let document = IndexDocument::from_record(&record, &test_regulation());

        assert_eq!(document.id, "uu13_2003_pasal_14a");
    }

    #[test]
    fn test_index_document_metadata() {
        let unit = test_unit("81", "Ketentuan mengenai pemutusan hubungan kerja dan pesangon.");
        let classification = Classification {
            amendment_type: AmendmentType::Modified,
            amended_ref: Some(ArticleNumber::new(81, "")),
            anomalies: Vec::new(),
        };
        let concepts: BTreeSet<ConceptTag> =
            [ConceptTag::new("phk"), ConceptTag::new("pesangon")]
                .into_iter()
                .collect();
        let record = assemble(&unit, &classification, concepts, &test_regulation()).unwrap();
        let document = IndexDocument::from_record(&record, &test_regulation());

        assert_eq!(
            document.metadata.get("regulation"),
            Some(&MetaValue::from("UU 13/2003"))
        );
        assert_eq!(document.metadata.get("tier"), Some(&MetaValue::from("UU")));
        assert_eq!(
            document.metadata.get("hierarchy_level"),
            Some(&MetaValue::Int(1))
        );
        assert_eq!(
            document.metadata.get("amendment_type"),
            Some(&MetaValue::from("diubah"))
        );
        assert_eq!(
            document.metadata.get("amended_article_ref"),
            Some(&MetaValue::from("81"))
        );
        // BTreeSet order: pesangon before phk
        assert_eq!(
            document.metadata.get("concepts"),
            Some(&MetaValue::from("pesangon,phk"))
        );
        assert_eq!(document.metadata.get("word_count"), Some(&MetaValue::Int(7)));
        assert_eq!(document.metadata.get("line_start"), Some(&MetaValue::Int(10)));
    }

    #[test]
    fn test_index_document_metadata_omits_unset_ref() {
        let unit = test_unit("1", "Ketentuan umum.");
        let record = assemble(&unit, &unchanged(), BTreeSet::new(), &test_regulation()).unwrap();
        let document = IndexDocument::from_record(&record, &test_regulation());

        assert!(!document.metadata.contains_key("amended_article_ref"));
        assert_eq!(document.metadata.get("concepts"), Some(&MetaValue::from("")));
    }

    #[test]
    fn test_index_document_text_composition() {
        let unit = test_unit("89", "Ketentuan upah minimum ditetapkan oleh gubernur.");
        let classification = Classification {
            amendment_type: AmendmentType::Modified,
            amended_ref: Some(ArticleNumber::new(88, "")),
            anomalies: Vec::new(),
        };
        let concepts: BTreeSet<ConceptTag> = [ConceptTag::new("upah_minimum")].into_iter().collect();
        let record = assemble(&unit, &classification, concepts, &test_regulation()).unwrap();
        let document = IndexDocument::from_record(&record, &test_regulation());

        assert!(document.text.starts_with("Pasal 89 (UU 13/2003)"));
        assert!(document.text.contains("Perubahan: diubah (Pasal 88)"));
        assert!(document.text.contains("Ketentuan upah minimum"));
        assert!(document.text.contains("Konsep: upah_minimum"));
    }

    #[test]
    fn test_meta_value_serialization() {
        assert_eq!(
            serde_json::to_string(&MetaValue::from("UU 13/2003")).unwrap(),
            "\"UU 13/2003\""
        );
        assert_eq!(serde_json::to_string(&MetaValue::Int(42)).unwrap(), "42");
        assert_eq!(serde_json::to_string(&MetaValue::Bool(true)).unwrap(), "true");
    }
}
