//! Article segmentation for Indonesian statute text.
//!
//! Splits raw statute text into article-level units on "Pasal <number>"
//! headings. Only headings that begin a line (after trimming) open a new
//! unit; article references embedded mid-sentence stay in the surrounding
//! body. Chapter headings (BAB/Bagian/Paragraf) update the running section
//! label without opening units.

use std::sync::LazyLock;

use regex::Regex;

use crate::anomaly::{Anomaly, AnomalyKind};
use crate::config::DEFAULT_SECTION_LABEL;
use crate::types::{ArticleNumber, RawUnit};

/// Article heading at line start. Markdown heading prefixes are accepted
/// because harvested statute text is often markdown-flavoured
/// ("#### Pasal 81").
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static HEADING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:#{1,6}\s*)?Pasal\s+(\d{1,4})([A-Za-z]{0,3})\b\s*[.:]?\s*(.*)$")
        .expect("valid regex")
});

/// A line that opens with the Pasal keyword at all (used to detect
/// malformed headings that carry no article number).
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PASAL_LINE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:#{1,6}\s*)?Pasal(\s|$)").expect("valid regex"));

/// Chapter-level headings that set the section context for later articles.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static CHAPTER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:#{1,6}\s*)?(BAB\s+[IVXLCDM]+\b.*|Bagian\s+\S.*|Paragraf\s+\S.*)$")
        .expect("valid regex")
});

/// Builder accumulating one unit's lines until the next heading.
struct UnitBuilder {
    number: ArticleNumber,
    heading_clause: String,
    section_label: String,
    start_line: usize,
    end_line: usize,
    body_lines: Vec<String>,
}

impl UnitBuilder {
    fn new(
        number: ArticleNumber,
        heading_clause: String,
        section_label: String,
        line: usize,
    ) -> Self {
        Self {
            number,
            heading_clause,
            section_label,
            start_line: line,
            end_line: line,
            body_lines: Vec::new(),
        }
    }

    fn push_line(&mut self, line: &str, line_no: usize) {
        self.body_lines.push(line.trim_end().to_string());
        self.end_line = line_no;
    }

    fn finish(self) -> RawUnit {
        let mut parts: Vec<String> = Vec::new();
        if !self.heading_clause.is_empty() {
            parts.push(self.heading_clause.clone());
        }
        parts.extend(self.body_lines);

        // Trailing blank lines before the next heading are not part of the
        // unit; leading/trailing whitespace goes with them.
        let body = parts.join("\n").trim().to_string();

        RawUnit {
            number: self.number,
            heading_clause: self.heading_clause,
            body,
            section_label: self.section_label,
            line_range: (self.start_line, self.end_line),
        }
    }
}

/// Split statute text into article-level units.
///
/// Returns the ordered units plus any recoverable anomalies (currently
/// only malformed headings). Empty input yields an empty unit list, not an
/// error. Text before the first article heading (preamble, considerans) is
/// skipped.
#[must_use]
pub fn segment(text: &str) -> (Vec<RawUnit>, Vec<Anomaly>) {
    let mut units: Vec<RawUnit> = Vec::new();
    let mut anomalies: Vec<Anomaly> = Vec::new();
    let mut section_label = DEFAULT_SECTION_LABEL.to_string();
    let mut current: Option<UnitBuilder> = None;

    for (idx, raw_line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim();

        if let Some(caps) = HEADING_PATTERN.captures(line) {
            match parse_heading_number(&caps[1], &caps[2]) {
                Some(number) => {
                    if let Some(builder) = current.take() {
                        units.push(builder.finish());
                    }
                    let clause = caps[3].trim().to_string();
                    current = Some(UnitBuilder::new(
                        number,
                        clause,
                        section_label.clone(),
                        line_no,
                    ));
                }
                None => {
                    record_malformed_heading(line, line_no, &mut anomalies);
                    if let Some(builder) = &mut current {
                        builder.push_line(raw_line, line_no);
                    }
                }
            }
        } else if !line.is_empty() && PASAL_LINE_PATTERN.is_match(line) {
            record_malformed_heading(line, line_no, &mut anomalies);
            if let Some(builder) = &mut current {
                builder.push_line(raw_line, line_no);
            }
        } else if let Some(caps) = CHAPTER_PATTERN.captures(line) {
            section_label = caps[1].trim().to_string();
        } else if let Some(builder) = &mut current {
            builder.push_line(raw_line, line_no);
        }
        // Lines before the first heading are preamble and are skipped.
    }

    if let Some(builder) = current.take() {
        units.push(builder.finish());
    }

    (units, anomalies)
}

/// Parse the captured heading number, rejecting overflowing bases.
fn parse_heading_number(base: &str, suffix: &str) -> Option<ArticleNumber> {
    let base: u32 = base.parse().ok()?;
    Some(ArticleNumber::new(base, suffix))
}

fn record_malformed_heading(line: &str, line_no: usize, anomalies: &mut Vec<Anomaly>) {
    tracing::warn!(
        line = line_no,
        text = %line,
        "Article heading without a number, keeping as body text"
    );
    anomalies.push(
        Anomaly::new(
            AnomalyKind::MalformedHeading,
            format!("heading without article number: '{line}'"),
        )
        .with_line(line_no),
    );
}
