//! Vocabulary matching over free text and extracted keywords.
//!
//! Both detectors walk the fixed vocabularies in order and return the first
//! hit, so ties resolve by list position.

use cura_core::vocab::{CONDITIONS, COUNTRIES, GLOBAL_COUNTRY, UNKNOWN_CONDITION};

/// Detected condition and country names, always from the fixed vocabularies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    pub condition: &'static str,
    pub country: &'static str,
}

/// Match full vocabulary names as case-insensitive substrings of `text`.
#[must_use]
pub fn detect_fallback(text: &str) -> Detection {
    let text = text.to_lowercase();
    let condition = CONDITIONS
        .iter()
        .find(|c| text.contains(&c.to_lowercase()))
        .copied()
        .unwrap_or(UNKNOWN_CONDITION);
    Detection {
        condition,
        country: find_country(&text, &[]),
    }
}

/// Match using API keywords plus the text.
///
/// A condition matches on the first word of its name ("breast" for
/// "Breast Cancer"), found in any keyword or in the text.
#[must_use]
pub fn detect_with_keywords(keywords: &[String], text: &str) -> Detection {
    let text = text.to_lowercase();
    let keywords: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();

    let condition = CONDITIONS
        .iter()
        .find(|c| {
            let lowered = c.to_lowercase();
            let first = lowered.split(' ').next().unwrap_or_default();
            keywords.iter().any(|k| k.contains(first)) || text.contains(first)
        })
        .copied()
        .unwrap_or(UNKNOWN_CONDITION);

    Detection {
        condition,
        country: find_country(&text, &keywords),
    }
}

/// `text` and `keywords` must already be lowercased.
fn find_country(text: &str, keywords: &[String]) -> &'static str {
    COUNTRIES
        .iter()
        .find(|c| {
            let lowered = c.to_lowercase();
            keywords.iter().any(|k| k.contains(&lowered)) || text.contains(&lowered)
        })
        .copied()
        .unwrap_or(GLOBAL_COUNTRY)
}
