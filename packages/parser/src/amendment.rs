//! Amendment classification for segmented article units.
//!
//! Inspects the heading clause and lead sentence of a unit for the three
//! amendment operation markers (diubah/dihapus/disisipkan, plus the synonym
//! spellings found in consolidated texts) and resolves the article being
//! amended where possible. Markers deeper in the body never classify: an
//! article that merely mentions "dapat diubah" is not an amendment.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::anomaly::{Anomaly, AnomalyKind};
use crate::types::{AmendmentType, ArticleNumber, RawUnit};

/// Amendment markers, including synonym spellings:
/// diubah/diganti = modified, dihapus/dicabut = deleted,
/// disisipkan/ditambah = inserted.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static MARKER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(diubah|diganti|dihapus|dicabut|disisipkan|ditambah)\b")
        .expect("valid regex")
});

/// Article references inside an amendment clause ("Pasal 16", "Pasal 16A").
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static TARGET_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bPasal\s+(\d{1,4})([A-Za-z]{0,3})\b").expect("valid regex"));

/// Article numbers already seen in the current parse pass.
///
/// Target resolution may fall back on previously-seen numbers (an inserted
/// "Pasal 14A" anchors to "Pasal 14" when that article exists), which is why
/// unit processing within one regulation is strictly sequential.
#[derive(Debug, Default)]
pub struct RegulationContext {
    seen: BTreeSet<ArticleNumber>,
}

impl RegulationContext {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an article number after its unit has been classified.
    pub fn record(&mut self, number: &ArticleNumber) {
        self.seen.insert(number.clone());
    }

    /// Check whether an article number was seen earlier in this pass.
    #[must_use]
    pub fn contains(&self, number: &ArticleNumber) -> bool {
        self.seen.contains(number)
    }

    /// Number of distinct article numbers seen so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// True when no article numbers have been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Result of classifying one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// The amendment operation detected (first marker in text order wins).
    pub amendment_type: AmendmentType,

    /// The article being amended, when one could be resolved.
    pub amended_ref: Option<ArticleNumber>,

    /// Anomalies found during classification (unresolved targets).
    pub anomalies: Vec<Anomaly>,
}

/// Classify a unit's amendment operation and resolve its target article.
///
/// Marker search covers the heading clause plus the first sentence of the
/// trailing body. When several markers appear (compound amendment clauses),
/// the first in text order wins. For Modified and Inserted units the target
/// is the first "Pasal <number>" occurrence in the same clause; an inserted
/// unit with a suffixed number additionally falls back to its own base
/// article when that article was seen earlier in the pass. Failure to
/// resolve is recorded as an anomaly, never an error.
#[must_use]
pub fn classify(unit: &RawUnit, context: &RegulationContext) -> Classification {
    let clause = lead_clause(unit);

    let amendment_type = match MARKER_PATTERN.find(&clause) {
        Some(m) => marker_family(m.as_str()),
        None => AmendmentType::Unchanged,
    };

    let mut anomalies = Vec::new();
    let amended_ref = match amendment_type {
        AmendmentType::Modified | AmendmentType::Inserted => {
            resolve_target(unit, &clause, amendment_type, context, &mut anomalies)
        }
        AmendmentType::Unchanged | AmendmentType::Deleted => None,
    };

    Classification {
        amendment_type,
        amended_ref,
        anomalies,
    }
}

/// The clause used for marker search: heading remainder plus the first
/// sentence of the trailing body.
fn lead_clause(unit: &RawUnit) -> String {
    let mut clause = unit.heading_clause.clone();

    if let Some(first_line) = unit
        .trailing_body()
        .lines()
        .find(|line| !line.trim().is_empty())
    {
        let sentence = first_sentence(first_line.trim());
        if !clause.is_empty() {
            clause.push(' ');
        }
        clause.push_str(sentence);
    }

    clause
}

/// Take text up to and including the first sentence terminator.
fn first_sentence(text: &str) -> &str {
    match text.find('.') {
        Some(pos) => &text[..=pos],
        None => text,
    }
}

/// Map a matched marker word to its amendment family.
fn marker_family(marker: &str) -> AmendmentType {
    match marker.to_lowercase().as_str() {
        "dihapus" | "dicabut" => AmendmentType::Deleted,
        "disisipkan" | "ditambah" => AmendmentType::Inserted,
        // MARKER_PATTERN only matches the six marker words
        _ => AmendmentType::Modified,
    }
}

/// Resolve the amended article for a Modified/Inserted unit.
fn resolve_target(
    unit: &RawUnit,
    clause: &str,
    amendment_type: AmendmentType,
    context: &RegulationContext,
    anomalies: &mut Vec<Anomaly>,
) -> Option<ArticleNumber> {
    // First "Pasal <number>" in the clause wins, even when several appear.
    if let Some(caps) = TARGET_PATTERN.captures(clause) {
        if let Ok(base) = caps[1].parse::<u32>() {
            return Some(ArticleNumber::new(base, &caps[2]));
        }
    }

    // Inserted articles with a letter suffix anchor to their base article
    // when it was seen earlier in this pass ("Pasal 14A" inserted after
    // "Pasal 14").
    if amendment_type == AmendmentType::Inserted && unit.number.suffix().is_some() {
        let base = unit.number.base_number();
        if context.contains(&base) {
            return Some(base);
        }
    }

    tracing::warn!(
        article = %unit.number,
        "Amendment clause without resolvable target article"
    );
    anomalies.push(
        Anomaly::new(
            AnomalyKind::UnresolvedTarget,
            format!(
                "no target article found in {} clause of Pasal {}",
                amendment_type.as_str(),
                unit.number
            ),
        )
        .with_article(unit.number.clone())
        .with_line(unit.line_range.0),
    );
    None
}
