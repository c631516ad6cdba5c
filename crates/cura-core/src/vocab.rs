//! Fixed vocabulary for condition/country detection.
//!
//! Order matters: detection returns the first entry that matches.

/// Conditions recognized by text analysis.
pub const CONDITIONS: &[&str] = &[
    "Breast Cancer",
    "Heart Disease",
    "Diabetes",
    "Glioma",
    "Lung Cancer",
    "Leukemia",
    "Brain Tumor",
    "Alzheimer’s Disease",
    "Parkinson’s Disease",
    "Prostate Cancer",
];

/// Countries recognized by text analysis.
pub const COUNTRIES: &[&str] = &["India", "USA", "UK", "Germany", "China"];

/// Returned when no condition matches.
pub const UNKNOWN_CONDITION: &str = "Unknown";

/// Returned when no country matches.
pub const GLOBAL_COUNTRY: &str = "Global";
