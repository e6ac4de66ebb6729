//! Concept tagging against a controlled employment-law vocabulary.
//!
//! Matching is case-insensitive over whitespace-normalized text. Every
//! surface form matches on token boundaries: single-word forms (PKWT, PHK,
//! UMK) match whole tokens, multi-word forms match as phrases. The curated
//! vocabulary deliberately avoids bare common words ("upah", "pekerja"):
//! those appear in nearly every article and would tag everything.

use std::collections::BTreeSet;

use crate::types::ConceptTag;

/// One vocabulary entry: a tag plus its surface forms.
#[derive(Debug, Clone)]
struct VocabularyEntry {
    tag: ConceptTag,
    forms: Vec<String>,
}

/// A controlled vocabulary mapping concept tags to surface forms.
///
/// Read-only once built; safe to share across parallel per-regulation
/// parse runs.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    entries: Vec<VocabularyEntry>,
}

impl Vocabulary {
    /// Create an empty vocabulary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tag with its surface forms.
    ///
    /// Forms are normalized (lowercased, whitespace collapsed) at
    /// registration so matching is a plain comparison later.
    pub fn register(
        &mut self,
        tag: impl Into<String>,
        forms: impl IntoIterator<Item = impl AsRef<str>>,
    ) {
        let forms = forms
            .into_iter()
            .map(|form| normalize(form.as_ref()))
            .filter(|form| !form.is_empty())
            .collect();

        self.entries.push(VocabularyEntry {
            tag: ConceptTag::new(tag),
            forms,
        });
    }

    /// Number of registered tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no tags are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Scan text and return every tag whose surface form appears.
    ///
    /// Returns the empty set when nothing matches, never an error.
    #[must_use]
    pub fn tag(&self, text: &str) -> BTreeSet<ConceptTag> {
        let normalized = format!(" {} ", normalize(text));

        self.entries
            .iter()
            .filter(|entry| {
                entry
                    .forms
                    .iter()
                    .any(|form| normalized.contains(&format!(" {form} ")))
            })
            .map(|entry| entry.tag.clone())
            .collect()
    }

    /// The built-in controlled vocabulary for Indonesian employment law.
    ///
    /// Covers contract types, termination, wages, working time, unions,
    /// dispute resolution, and social security, in both abbreviated and
    /// spelled-out forms.
    #[must_use]
    pub fn employment_law() -> Self {
        let mut vocabulary = Self::new();

        vocabulary.register("pkwt", ["pkwt", "perjanjian kerja waktu tertentu"]);
        vocabulary.register("pkwtt", ["pkwtt", "perjanjian kerja waktu tidak tertentu"]);
        vocabulary.register("phk", ["phk", "pemutusan hubungan kerja"]);
        vocabulary.register(
            "pesangon",
            ["pesangon", "uang pesangon", "uang penghargaan masa kerja"],
        );
        vocabulary.register(
            "upah_minimum",
            [
                "upah minimum",
                "ump",
                "umk",
                "upah minimum provinsi",
                "upah minimum kabupaten",
            ],
        );
        vocabulary.register("lembur", ["lembur", "kerja lembur", "upah lembur"]);
        vocabulary.register("thr", ["thr", "tunjangan hari raya"]);
        vocabulary.register("alih_daya", ["alih daya", "outsourcing"]);
        vocabulary.register("serikat_pekerja", ["serikat pekerja", "serikat buruh"]);
        vocabulary.register("pkb", ["pkb", "perjanjian kerja bersama"]);
        vocabulary.register("mogok_kerja", ["mogok kerja"]);
        vocabulary.register("tka", ["tka", "tenaga kerja asing"]);
        vocabulary.register("k3", ["k3", "keselamatan dan kesehatan kerja"]);
        vocabulary.register("jaminan_sosial", ["jaminan sosial", "bpjs", "jamsostek"]);
        vocabulary.register(
            "phi",
            [
                "perselisihan hubungan industrial",
                "pengadilan hubungan industrial",
            ],
        );
        vocabulary.register("mediasi", ["mediasi"]);
        vocabulary.register("konsiliasi", ["konsiliasi"]);
        vocabulary.register("arbitrase", ["arbitrase"]);
        vocabulary.register("pelatihan_kerja", ["pelatihan kerja", "balai latihan kerja"]);
        vocabulary.register("waktu_kerja", ["waktu kerja", "jam kerja"]);
        vocabulary.register("cuti", ["cuti"]);

        vocabulary
    }
}

/// Lowercase and collapse every non-alphanumeric run into a single space.
fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.extend(c.to_lowercase());
        } else {
            pending_space = true;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("PKWT."), "pkwt");
        assert_eq!(normalize("  Alih-Daya  "), "alih daya");
        assert_eq!(normalize("upah   minimum"), "upah minimum");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_tag_abbreviation() {
        let vocabulary = Vocabulary::employment_law();
        let tags = vocabulary.tag("Ketentuan tambahan mengenai PKWT.");

        assert_eq!(tags.len(), 1);
        assert!(tags.contains(&ConceptTag::new("pkwt")));
    }

    #[test]
    fn test_tag_multi_word_phrase() {
        let vocabulary = Vocabulary::employment_law();
        let tags = vocabulary.tag(
            "Pemutusan hubungan kerja hanya dapat dilakukan setelah perundingan.",
        );

        assert!(tags.contains(&ConceptTag::new("phk")));
    }

    #[test]
    fn test_tag_common_words_do_not_match() {
        let vocabulary = Vocabulary::employment_law();
        // "pekerja" and "upah" alone are not vocabulary forms
        let tags = vocabulary.tag("Setiap pekerja berhak atas upah layak.");

        assert!(tags.is_empty());
    }

    #[test]
    fn test_tag_abbreviation_inside_word_does_not_match() {
        let vocabulary = Vocabulary::employment_law();
        // "ump" must not fire inside "umpamanya"
        let tags = vocabulary.tag("Umpamanya ketentuan ini berlaku.");

        assert!(tags.is_empty());
    }

    #[test]
    fn test_tag_phrase_with_punctuation_and_case() {
        let vocabulary = Vocabulary::employment_law();
        let tags = vocabulary.tag("UPAH MINIMUM, sebagaimana dimaksud, ditetapkan gubernur.");

        assert!(tags.contains(&ConceptTag::new("upah_minimum")));
    }

    #[test]
    fn test_tag_multiple_concepts() {
        let vocabulary = Vocabulary::employment_law();
        let tags = vocabulary.tag(
            "Dalam hal PHK, pengusaha wajib membayar uang pesangon dan THR yang terutang.",
        );

        assert!(tags.contains(&ConceptTag::new("phk")));
        assert!(tags.contains(&ConceptTag::new("pesangon")));
        assert!(tags.contains(&ConceptTag::new("thr")));
        assert_eq!(tags.len(), 3);
    }

    #[test]
    fn test_tag_empty_text() {
        let vocabulary = Vocabulary::employment_law();
        assert!(vocabulary.tag("").is_empty());
    }

    #[test]
    fn test_tag_set_semantics_no_duplicates() {
        let vocabulary = Vocabulary::employment_law();
        // Both forms of the same tag present: still one tag
        let tags = vocabulary.tag("PKWT adalah perjanjian kerja waktu tertentu.");

        assert_eq!(tags.len(), 1);
    }

    #[test]
    fn test_register_custom_vocabulary() {
        let mut vocabulary = Vocabulary::new();
        assert!(vocabulary.is_empty());

        vocabulary.register("magang", ["pemagangan", "peserta magang"]);
        assert_eq!(vocabulary.len(), 1);

        let tags = vocabulary.tag("Penyelenggaraan pemagangan diatur lebih lanjut.");
        assert!(tags.contains(&ConceptTag::new("magang")));
    }
}
