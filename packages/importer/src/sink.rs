//! Collection sinks: the boundary to the external indexing collaborator.
//!
//! The vector store itself is out of scope; the importer only needs
//! something that accepts flattened documents plus a collection manifest.
//! Sinks are constructed once per run and injected; there is no ambient
//! global client.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use vocana_parser::IndexDocument;

use crate::error::Result;

/// Collection-level metadata written alongside the documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionManifest {
    /// Collection name (e.g., "vocana_legal_uu13_2003").
    pub collection: String,

    /// Human-readable description.
    pub description: String,

    /// Regulation identifier the collection covers.
    pub regulation: String,

    /// Number of documents written.
    pub total_documents: usize,

    /// Number of anomalies recorded during parsing.
    pub total_anomalies: usize,

    /// Import timestamp (RFC 3339).
    pub import_date: String,
}

/// Something that accepts batches of flattened documents.
///
/// Implemented by the real index client in deployment; the bundled
/// [`JsonlSink`] writes an import-ready file set instead, and
/// [`MemorySink`] backs tests and dry runs.
pub trait CollectionSink {
    /// Append a batch of documents to the collection.
    fn put(&mut self, batch: &[IndexDocument]) -> Result<()>;

    /// Finalize the collection with its manifest.
    fn finish(&mut self, manifest: &CollectionManifest) -> Result<()>;
}

/// Sink writing one JSON document per line plus a manifest file.
///
/// Uses the atomic write pattern: documents go to a temp file that is
/// synced and renamed on finish, so a crash mid-import never leaves a
/// half-written collection behind.
pub struct JsonlSink {
    output_dir: PathBuf,
    slug: String,
    temp_path: PathBuf,
    writer: Option<BufWriter<File>>,
    written: usize,
}

impl JsonlSink {
    /// Create a sink writing under `output_dir` for the given slug.
    pub fn create(output_dir: &Path, slug: &str) -> Result<Self> {
        fs::create_dir_all(output_dir)?;

        let temp_path = output_dir.join(format!(".{slug}.jsonl.tmp"));
        let writer = BufWriter::new(File::create(&temp_path)?);

        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            slug: slug.to_string(),
            temp_path,
            writer: Some(writer),
            written: 0,
        })
    }

    /// Path the documents file will have after `finish`.
    #[must_use]
    pub fn documents_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.jsonl", self.slug))
    }

    /// Path the manifest file will have after `finish`.
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.manifest.json", self.slug))
    }

    /// Number of documents written so far.
    #[must_use]
    pub fn written(&self) -> usize {
        self.written
    }
}

impl CollectionSink for JsonlSink {
    fn put(&mut self, batch: &[IndexDocument]) -> Result<()> {
        if let Some(writer) = self.writer.as_mut() {
            for document in batch {
                serde_json::to_writer(&mut *writer, document)?;
                writer.write_all(b"\n")?;
                self.written += 1;
            }
        }
        Ok(())
    }

    fn finish(&mut self, manifest: &CollectionManifest) -> Result<()> {
        if let Some(writer) = self.writer.take() {
            let file = writer.into_inner().map_err(|e| e.into_error())?;
            file.sync_all()?;
        }

        let documents_path = self.documents_path();

        // On Windows, rename fails if the destination already exists
        #[cfg(target_os = "windows")]
        if documents_path.exists() {
            fs::remove_file(&documents_path)?;
        }

        fs::rename(&self.temp_path, &documents_path)?;

        let manifest_temp = self
            .output_dir
            .join(format!(".{}.manifest.json.tmp", self.slug));
        {
            let mut file = File::create(&manifest_temp)?;
            serde_json::to_writer_pretty(&mut file, manifest)?;
            file.write_all(b"\n")?;
            file.sync_all()?;
        }

        let manifest_path = self.manifest_path();

        #[cfg(target_os = "windows")]
        if manifest_path.exists() {
            fs::remove_file(&manifest_path)?;
        }

        fs::rename(&manifest_temp, &manifest_path)?;

        Ok(())
    }
}

/// In-memory sink for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemorySink {
    /// Documents received so far.
    pub documents: Vec<IndexDocument>,

    /// Manifest received on finish, if any.
    pub manifest: Option<CollectionManifest>,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CollectionSink for MemorySink {
    fn put(&mut self, batch: &[IndexDocument]) -> Result<()> {
        self.documents.extend_from_slice(batch);
        Ok(())
    }

    fn finish(&mut self, manifest: &CollectionManifest) -> Result<()> {
        self.manifest = Some(manifest.clone());
        Ok(())
    }
}
