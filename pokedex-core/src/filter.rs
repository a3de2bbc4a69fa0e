//! Name index primitives: collation, filtering, pagination.
//!
//! The collation approximates an English locale compare at base
//! sensitivity: names are decomposed, accents are dropped and letters are
//! folded to lower case, so names that differ only by case or accent
//! compare equal. Punctuation and symbols sort before digits, digits before
//! letters. Every sort here is stable, which makes the relative order of
//! such equal names depend on their order going in.

use std::cmp::Ordering;
use std::collections::HashSet;

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Compare two names at base strength: case and accents are ignored.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    primary_weights(a).cmp(primary_weights(b))
}

fn primary_weights(name: &str) -> impl Iterator<Item = (u8, char)> + '_ {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(|c| (char_class(c), c))
}

/// Script-independent ordering class: separators, then digits, then letters.
fn char_class(c: char) -> u8 {
    if c.is_alphabetic() {
        2
    } else if c.is_numeric() {
        1
    } else {
        0
    }
}

/// Stable sort by [`compare_names`].
pub fn sort_names(names: &mut [String]) {
    names.sort_by(|a, b| compare_names(a, b));
}

/// Keep names whose lower-cased form contains the trimmed, lower-cased term.
///
/// An absent or blank term keeps every name. Input order is preserved.
pub fn filter_names(names: &[String], term: Option<&str>) -> Vec<String> {
    let needle = match term.map(str::trim).filter(|t| !t.is_empty()) {
        Some(t) => t.to_lowercase(),
        None => return names.to_vec(),
    };

    names
        .iter()
        .filter(|name| name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Slice out 1-based page `page` of `page_size` names.
///
/// A page beyond the end yields an empty vec rather than an error.
pub fn paginate(names: &[String], page: u32, page_size: u32) -> Vec<String> {
    let page = page.max(1) as usize;
    let page_size = page_size.max(1) as usize;

    let start = (page - 1).saturating_mul(page_size);
    if start >= names.len() {
        return Vec::new();
    }
    let end = start.saturating_add(page_size).min(names.len());
    names[start..end].to_vec()
}

/// Drop exact duplicates, keeping the first occurrence.
///
/// Case variants are distinct names and are all kept.
pub fn dedup_names(names: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(names.len());
    names
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect()
}
