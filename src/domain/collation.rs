//! Locale-aware ordering for Portuguese place names.
//!
//! Byte order puts every accented capital after `Z`, so "Éden" would land
//! behind "Vitória". Names are instead compared in three passes, the way a
//! collator with default strength does it: base letters first, then
//! accents, then case. Raw code points break any remaining tie so the
//! ordering is total.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use super::models::City;

/// Compares two names the way `pt-BR` readers expect them ordered.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use ufcities::domain::compare_names;
///
/// assert_eq!(compare_names("Éden", "Vitória"), Ordering::Less);
/// assert_eq!(compare_names("abadia", "Abadia"), Ordering::Less);
/// ```
pub fn compare_names(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| accented(a).cmp(&accented(b)))
        .then_with(|| case_pattern(a).cmp(&case_pattern(b)))
        .then_with(|| a.cmp(b))
}

/// Sorts cities by name in place. The sort is stable, so cities sharing a
/// name keep the order the API returned them in.
pub fn sort_cities(cities: &mut [City]) {
    cities.sort_by(|a, b| compare_names(&a.name, &b.name));
}

fn base_letters(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

// Unaccented letters sort ahead of their accented forms: "e" < "e\u{301}".
fn accented(s: &str) -> String {
    s.nfd().flat_map(char::to_lowercase).collect()
}

fn case_pattern(s: &str) -> Vec<bool> {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(char::is_uppercase)
        .collect()
}
