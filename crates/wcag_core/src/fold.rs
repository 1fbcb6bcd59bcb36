//! Case-insensitive matching over Unicode text.
//!
//! Folding maps every char through `char::to_lowercase`. Match offsets are
//! always reported against the original, unfolded text so callers can slice
//! it directly.

use std::ops::Range;

/// Fold a string for case-insensitive comparison.
pub fn fold(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Whether `haystack` contains the already-folded `needle`.
///
/// An empty needle is contained in every string.
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    fold(haystack).contains(needle)
}

/// Locate the first occurrence of the already-folded `needle` in `haystack`.
///
/// Returns the byte range in `haystack`. The range always starts and ends on
/// char boundaries of the original text, even when folding changed byte
/// lengths.
pub fn find_folded(haystack: &str, needle: &str) -> Option<Range<usize>> {
    if needle.is_empty() {
        return None;
    }

    let mut folded = String::with_capacity(haystack.len());
    // origin[i] = byte offset of the original char that produced folded byte i
    let mut origin: Vec<usize> = Vec::with_capacity(haystack.len());
    for (idx, ch) in haystack.char_indices() {
        for lower in ch.to_lowercase() {
            let before = folded.len();
            folded.push(lower);
            origin.resize(origin.len() + (folded.len() - before), idx);
        }
    }

    let start = folded.find(needle)?;
    let end = start + needle.len();
    let first = origin[start];
    let last = origin[end - 1];
    let last_len = haystack[last..].chars().next().map_or(0, char::len_utf8);
    Some(first..last + last_len)
}
