// Copyright 2026 circuits-feed contributors
// SPDX-License-Identifier: Apache-2.0

//! Title/description splitting and text cleanup for raw candidates.
//!
//! Blob candidates are split on a citation token ("Surname et al., 2024")
//! when there is one, else on the first early sentence boundary, else not
//! at all. The heuristics are best-effort; ambiguous blobs end up entirely
//! in the title.

use crate::acquisition::encoding::clean_text;
use crate::types::{RawCandidate, SplitCandidate};
use regex::Regex;
use std::sync::OnceLock;

/// A sentence boundary only splits the blob if it starts this early.
pub const SENTENCE_SPLIT_WINDOW: usize = 150;

fn citation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b\p{Lu}[\p{L}'’\-]*\s+et\s+al\.,?\s*\d{4}\b")
            .expect("citation regex is valid")
    })
}

fn sentence_boundary_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?]\s+\p{Lu}").expect("sentence regex is valid"))
}

/// Split a cleaned blob into `(title, description)`.
pub fn split_blob(blob: &str) -> (String, String) {
    if let Some(m) = citation_re().find(blob) {
        return split_at(blob, m.end());
    }

    if let Some(m) = sentence_boundary_re().find(blob) {
        if blob[..m.start()].chars().count() < SENTENCE_SPLIT_WINDOW {
            // keep the punctuation mark with the title
            return split_at(blob, m.start() + 1);
        }
    }

    (blob.trim().to_string(), String::new())
}

fn split_at(blob: &str, idx: usize) -> (String, String) {
    let (title, rest) = blob.split_at(idx);
    (title.trim().to_string(), rest.trim().to_string())
}

/// Clean a raw candidate, splitting it first if its strategy yields a blob.
///
/// An empty title is replaced by the URL.
pub fn split_candidate(raw: RawCandidate) -> SplitCandidate {
    let (title, description) = if raw.origin_strategy.yields_blob() {
        split_blob(&clean_text(&raw.raw_title))
    } else {
        (clean_text(&raw.raw_title), clean_text(&raw.raw_description))
    };

    let title = if title.is_empty() {
        raw.url.to_string()
    } else {
        title
    };

    SplitCandidate {
        url: raw.url,
        title,
        description,
        strategy: raw.origin_strategy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StrategyKind;
    use url::Url;

    fn raw(kind: StrategyKind, title: &str, description: &str) -> RawCandidate {
        RawCandidate {
            url: Url::parse("https://example.com/2024/item/").unwrap(),
            raw_title: title.to_string(),
            raw_description: description.to_string(),
            origin_strategy: kind,
        }
    }

    #[test]
    fn test_citation_split() {
        let (title, desc) = split_blob(
            "Attention Heads Smith et al., 2024 A study of attention patterns in transformers.",
        );
        assert_eq!(title, "Attention Heads Smith et al., 2024");
        assert_eq!(desc, "A study of attention patterns in transformers.");
    }

    #[test]
    fn test_citation_without_comma_and_trailing_nothing() {
        let (title, desc) = split_blob("Circuit Tracing Ameisen et al. 2025");
        assert_eq!(title, "Circuit Tracing Ameisen et al. 2025");
        assert_eq!(desc, "");
    }

    #[test]
    fn test_sentence_boundary_split() {
        let (title, desc) =
            split_blob("Interpretability Dreams. An informal note on future goals for the field.");
        assert_eq!(title, "Interpretability Dreams.");
        assert_eq!(desc, "An informal note on future goals for the field.");
    }

    #[test]
    fn test_sentence_boundary_too_late_is_ignored() {
        let long_title = "word ".repeat(40);
        let blob = format!("{}end. Then more", long_title.trim());
        let (title, desc) = split_blob(&blob);
        assert_eq!(title, blob);
        assert_eq!(desc, "");
    }

    #[test]
    fn test_no_pattern_keeps_whole_blob() {
        let (title, desc) = split_blob("a lowercase blob. with no capital after the stop");
        assert_eq!(title, "a lowercase blob. with no capital after the stop");
        assert_eq!(desc, "");
    }

    #[test]
    fn test_split_candidate_cleans_blob() {
        let split = split_candidate(raw(
            StrategyKind::PaperCitationPattern,
            "\n  Attention Heads \n Smith et al., 2024\n  A study &amp; more.  ",
            "",
        ));
        assert_eq!(split.title, "Attention Heads Smith et al., 2024");
        assert_eq!(split.description, "A study & more.");
    }

    #[test]
    fn test_split_candidate_leaves_card_text_unsplit() {
        let split = split_candidate(raw(
            StrategyKind::CardPattern,
            " Toy Models. Of Superposition ",
            " cafÃ© notes ",
        ));
        assert_eq!(split.title, "Toy Models. Of Superposition");
        assert_eq!(split.description, "café notes");
    }

    #[test]
    fn test_fallback_title_is_url() {
        let split = split_candidate(raw(StrategyKind::YearLinkPattern, "   ", ""));
        assert_eq!(split.title, "https://example.com/2024/item/");
        let split = split_candidate(raw(StrategyKind::PaperCitationPattern, "", ""));
        assert_eq!(split.title, "https://example.com/2024/item/");
    }
}
