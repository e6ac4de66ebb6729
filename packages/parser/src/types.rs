//! Core data types for the statute parser.
//!
//! These types represent Indonesian employment-law regulations and their
//! article-level units, from the raw segmented form up to the assembled
//! record handed to the indexing collaborator.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::validate_regulation_id;
use crate::error::{ParseError, Result};

/// Tiers of Indonesian legislative instruments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegulationTier {
    /// Statute (Undang-Undang).
    #[serde(rename = "UU")]
    Uu,

    /// Government regulation (Peraturan Pemerintah).
    #[serde(rename = "PP")]
    Pp,

    /// Presidential regulation (Peraturan Presiden).
    #[serde(rename = "PERPRES")]
    Perpres,

    /// Ministerial regulation (Peraturan Menteri Ketenagakerjaan).
    #[serde(rename = "PERMENAKER")]
    Permenaker,
}

impl RegulationTier {
    /// Get the string value for flattened metadata.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uu => "UU",
            Self::Pp => "PP",
            Self::Perpres => "PERPRES",
            Self::Permenaker => "PERMENAKER",
        }
    }

    /// Position in the legislative hierarchy (1 = highest).
    #[must_use]
    pub fn hierarchy_level(&self) -> u8 {
        match self {
            Self::Uu => 1,
            Self::Pp => 2,
            Self::Perpres => 3,
            Self::Permenaker => 4,
        }
    }

    /// Parse from the leading token of a regulation id.
    #[must_use]
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix.to_uppercase().as_str() {
            "UU" => Some(Self::Uu),
            "PP" => Some(Self::Pp),
            "PERPRES" => Some(Self::Perpres),
            "PERMENAKER" => Some(Self::Permenaker),
            _ => None,
        }
    }
}

/// A regulation being parsed: identifier, official title, and tier.
///
/// One `Regulation` value parameterizes a whole parse run; per-statute
/// behavioral differences are configuration on this type, not code forks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Regulation {
    /// Short identifier (e.g., "UU 13/2003").
    pub id: String,

    /// Official long title.
    pub title: String,

    /// Legislative tier, derived from the id prefix.
    pub tier: RegulationTier,
}

impl Regulation {
    /// Create a regulation from its short identifier and official title.
    ///
    /// # Errors
    /// Returns [`ParseError::InvalidRegulationId`] when the id does not
    /// match the `<tier> <number>/<year>` format.
    ///
    /// # Examples
    /// ```
    /// use vocana_parser::types::{Regulation, RegulationTier};
    ///
    /// let regulation = Regulation::new(
    ///     "UU 13/2003",
    ///     "Undang-Undang Nomor 13 Tahun 2003 tentang Ketenagakerjaan",
    /// ).unwrap();
    /// assert_eq!(regulation.tier, RegulationTier::Uu);
    /// ```
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Result<Self> {
        let id = id.into();
        validate_regulation_id(&id)?;

        // validate_regulation_id guarantees a known prefix token
        let tier = id
            .split_whitespace()
            .next()
            .and_then(RegulationTier::from_prefix)
            .ok_or_else(|| ParseError::InvalidRegulationId(id.clone()))?;

        Ok(Self {
            id,
            title: title.into(),
            tier,
        })
    }

    /// Generate the slug used for collection names and document ids.
    ///
    /// # Examples
    /// ```
    /// use vocana_parser::types::Regulation;
    ///
    /// let regulation = Regulation::new("UU 13/2003", "Ketenagakerjaan").unwrap();
    /// assert_eq!(regulation.to_slug(), "uu13_2003");
    /// ```
    #[must_use]
    pub fn to_slug(&self) -> String {
        self.id.to_lowercase().replace(' ', "").replace('/', "_")
    }
}

/// Regex for article numbers: digits plus optional letter suffix.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ARTICLE_NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,4})([A-Za-z]{0,3})$").expect("valid regex"));

/// An article number: numeric base plus optional letter suffix.
///
/// Suffixed numbers ("14A") denote inserted articles and are distinct from
/// their base. Ordering is numeric on the base, then lexicographic on the
/// suffix, so `14 < 14A < 14B < 15`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ArticleNumber {
    base: u32,
    suffix: String,
}

impl ArticleNumber {
    /// Create an article number from its parts. The suffix is uppercased.
    #[must_use]
    pub fn new(base: u32, suffix: impl Into<String>) -> Self {
        Self {
            base,
            suffix: suffix.into().to_uppercase(),
        }
    }

    /// Numeric base (e.g., 14 for "14A").
    #[must_use]
    pub fn base(&self) -> u32 {
        self.base
    }

    /// Letter suffix, if any (e.g., "A" for "14A").
    #[must_use]
    pub fn suffix(&self) -> Option<&str> {
        if self.suffix.is_empty() {
            None
        } else {
            Some(&self.suffix)
        }
    }

    /// The base article number without suffix ("14A" -> "14").
    #[must_use]
    pub fn base_number(&self) -> ArticleNumber {
        Self {
            base: self.base,
            suffix: String::new(),
        }
    }
}

impl fmt::Display for ArticleNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.base, self.suffix)
    }
}

impl FromStr for ArticleNumber {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let caps = ARTICLE_NUMBER_PATTERN
            .captures(trimmed)
            .ok_or_else(|| ParseError::InvalidArticleNumber(s.to_string()))?;

        let base: u32 = caps[1]
            .parse()
            .map_err(|_| ParseError::InvalidArticleNumber(s.to_string()))?;

        Ok(Self::new(base, &caps[2]))
    }
}

impl From<ArticleNumber> for String {
    fn from(number: ArticleNumber) -> Self {
        number.to_string()
    }
}

impl TryFrom<String> for ArticleNumber {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// The amendment operation an article-level unit represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AmendmentType {
    /// Plain article, no amendment markers.
    #[serde(rename = "tetap")]
    Unchanged,

    /// Modified article ("diubah").
    #[serde(rename = "diubah")]
    Modified,

    /// Deleted article ("dihapus").
    #[serde(rename = "dihapus")]
    Deleted,

    /// Inserted article ("disisipkan").
    #[serde(rename = "disisipkan")]
    Inserted,
}

impl AmendmentType {
    /// Get the Indonesian marker string used in flattened metadata.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unchanged => "tetap",
            Self::Modified => "diubah",
            Self::Deleted => "dihapus",
            Self::Inserted => "disisipkan",
        }
    }
}

/// A normalized lowercase keyword from the controlled concept vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConceptTag(String);

impl ConceptTag {
    /// Create a tag, normalizing to lowercase.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into().to_lowercase())
    }

    /// The tag keyword.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConceptTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A contiguous article-level span of source text produced by the segmenter.
///
/// Transient: consumed by the classifier and assembler within the same
/// parse pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawUnit {
    /// The article number from the heading line.
    pub number: ArticleNumber,

    /// Text on the heading line after the article number. May be empty.
    pub heading_clause: String,

    /// Unit text: the heading clause (when present) plus all following
    /// lines up to the next heading.
    pub body: String,

    /// Section label in force at the heading line (e.g., "BAB X ...").
    pub section_label: String,

    /// 1-based inclusive source line range.
    pub line_range: (usize, usize),
}

impl RawUnit {
    /// Unit text after the heading clause (the trailing body lines).
    #[must_use]
    pub fn trailing_body(&self) -> &str {
        if self.heading_clause.is_empty() {
            &self.body
        } else {
            self.body
                .strip_prefix(self.heading_clause.as_str())
                .map(str::trim_start)
                .unwrap_or(&self.body)
        }
    }
}

/// The assembled output unit, immutable after assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegalRecord {
    /// Identifier of the regulation this record belongs to.
    pub regulation_id: String,

    /// Article number, unique within the regulation.
    pub article_number: ArticleNumber,

    /// Amendment operation this unit represents.
    pub amendment_type: AmendmentType,

    /// Article being amended, when one could be resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amended_article_ref: Option<ArticleNumber>,

    /// Trimmed article text. Never empty.
    pub body_text: String,

    /// Matched concept tags (set semantics, deterministic order).
    pub concepts: BTreeSet<ConceptTag>,

    /// Chapter/section context (e.g., "BAB IX HUBUNGAN KERJA").
    pub section_label: String,

    /// 1-based inclusive source line range.
    pub source_line_range: (usize, usize),
}

impl LegalRecord {
    /// Number of whitespace-separated words in the body text.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.body_text.split_whitespace().count()
    }
}
