//! Locale tag normalization.
//!
//! Documents arrive tagged with arbitrary locale strings (`en`, `nl_NL`,
//! `fr-CA`). Everything downstream keys on the two-letter, lower-cased
//! prefix of that tag.

/// The language every index supports without a stemmer plugin.
pub const BASELINE_LANGUAGE: &str = "en";

/// Normalize a locale tag to its two-letter language code.
///
/// Takes the first two characters and lower-cases them. Tags shorter than
/// two characters are returned lower-cased as-is.
///
/// # Example
///
/// ```
/// use sift_core::normalize_language;
///
/// assert_eq!(normalize_language("nl_NL"), "nl");
/// assert_eq!(normalize_language("FR"), "fr");
/// ```
pub fn normalize_language(locale: &str) -> String {
    locale
        .trim()
        .chars()
        .take(2)
        .flat_map(char::to_lowercase)
        .collect()
}

/// Normalize an optional locale, defaulting to [`BASELINE_LANGUAGE`].
pub fn language_or_baseline(locale: Option<&str>) -> String {
    match locale {
        Some(l) if !l.trim().is_empty() => normalize_language(l),
        _ => BASELINE_LANGUAGE.to_string(),
    }
}
