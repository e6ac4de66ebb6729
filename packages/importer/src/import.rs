//! Import orchestration: parse one statute and feed the collection sink.

use chrono::Utc;

use vocana_parser::{
    parse_regulation, AmendmentType, Anomaly, IndexDocument, Regulation, Vocabulary,
};

use crate::error::Result;
use crate::sink::{CollectionManifest, CollectionSink};

/// Documents handed to the sink per call when no batch size is given.
pub const DEFAULT_BATCH_SIZE: usize = 25;

/// Summary of one import run.
#[derive(Debug, Clone)]
pub struct ImportReport {
    /// Collection name the documents were written under.
    pub collection: String,

    /// Number of records imported.
    pub records: usize,

    /// Anomalies collected during parsing.
    pub anomalies: Vec<Anomaly>,

    /// Records per amendment type: (unchanged, modified, deleted, inserted).
    pub amendment_counts: (usize, usize, usize, usize),

    /// Total words across all record bodies.
    pub total_words: usize,
}

impl ImportReport {
    /// Records that are plain articles.
    #[must_use]
    pub fn unchanged(&self) -> usize {
        self.amendment_counts.0
    }

    /// Records classified as modifications.
    #[must_use]
    pub fn modified(&self) -> usize {
        self.amendment_counts.1
    }

    /// Records classified as deletions.
    #[must_use]
    pub fn deleted(&self) -> usize {
        self.amendment_counts.2
    }

    /// Records classified as insertions.
    #[must_use]
    pub fn inserted(&self) -> usize {
        self.amendment_counts.3
    }
}

/// Collection name for a regulation.
#[must_use]
pub fn collection_name(regulation: &Regulation) -> String {
    format!("vocana_legal_{}", regulation.to_slug())
}

/// Parse statute text and write the flattened documents to the sink in
/// batches, finishing with the collection manifest.
pub fn import_statute(
    text: &str,
    regulation: &Regulation,
    vocabulary: &Vocabulary,
    batch_size: usize,
    sink: &mut dyn CollectionSink,
) -> Result<ImportReport> {
    let outcome = parse_regulation(text, regulation, vocabulary);

    let documents: Vec<IndexDocument> = outcome
        .records
        .iter()
        .map(|record| IndexDocument::from_record(record, regulation))
        .collect();

    let batch_size = batch_size.max(1);
    for batch in documents.chunks(batch_size) {
        sink.put(batch)?;
    }

    let collection = collection_name(regulation);
    let manifest = CollectionManifest {
        collection: collection.clone(),
        description: format!("{} - {}", regulation.id, regulation.title),
        regulation: regulation.id.clone(),
        total_documents: documents.len(),
        total_anomalies: outcome.anomalies.len(),
        import_date: Utc::now().to_rfc3339(),
    };
    sink.finish(&manifest)?;

    let mut counts = (0, 0, 0, 0);
    let mut total_words = 0;
    for record in &outcome.records {
        match record.amendment_type {
            AmendmentType::Unchanged => counts.0 += 1,
            AmendmentType::Modified => counts.1 += 1,
            AmendmentType::Deleted => counts.2 += 1,
            AmendmentType::Inserted => counts.3 += 1,
        }
        total_words += record.word_count();
    }

    tracing::info!(
        collection = %collection,
        records = outcome.records.len(),
        anomalies = outcome.anomalies.len(),
        "Import finished"
    );

    Ok(ImportReport {
        collection,
        records: outcome.records.len(),
        anomalies: outcome.anomalies,
        amendment_counts: counts,
        total_words,
    })
}
