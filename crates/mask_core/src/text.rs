//! Character-level text utilities for masked input handling.
//!
//! Masked values are addressed by character position (not byte offset),
//! because that is how host text controls report their selection. These
//! helpers translate between the two and extract the digit payload of
//! arbitrary user input.

use std::borrow::Cow;

/// Number of characters (Unicode scalar values) in `s`.
#[inline]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Convert a character position into a byte offset into `s`.
///
/// Positions beyond the end of the string clamp to `s.len()`, so the
/// result is always a valid char boundary.
///
/// # Examples
///
/// ```
/// use mask_core::byte_offset;
///
/// let s = "a€b"; // '€' is 3 bytes
/// assert_eq!(byte_offset(s, 0), 0);
/// assert_eq!(byte_offset(s, 1), 1);
/// assert_eq!(byte_offset(s, 2), 4);
/// assert_eq!(byte_offset(s, 3), 5);
/// assert_eq!(byte_offset(s, 100), 5);
/// ```
pub fn byte_offset(s: &str, char_pos: usize) -> usize {
    s.char_indices()
        .nth(char_pos)
        .map(|(idx, _)| idx)
        .unwrap_or(s.len())
}

/// Returns `true` for the characters a phone mask accepts as digits.
///
/// Only ASCII `0-9` count; other Unicode decimal digits are treated like
/// any other non-digit and dropped.
#[inline]
pub fn is_mask_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

/// Strip every non-digit character from `s`.
///
/// # Examples
///
/// ```
/// use mask_core::only_digits;
///
/// assert_eq!(only_digits("(555) 123-4567"), "5551234567");
/// assert_eq!(only_digits("abc-def"), "");
/// ```
pub fn only_digits(s: &str) -> String {
    s.chars().filter(|c| is_mask_digit(*c)).collect()
}

/// Like [`only_digits`], keeping at most the first `max` digits.
pub fn take_digits(s: &str, max: usize) -> String {
    s.chars().filter(|c| is_mask_digit(*c)).take(max).collect()
}

/// Count the digit characters in `s`.
#[inline]
pub fn digit_count(s: &str) -> usize {
    s.chars().filter(|c| is_mask_digit(*c)).count()
}

/// Filter a string to remove newlines (CR and LF), for single-line inputs.
///
/// Returns a `Cow::Borrowed` if the string contains no newlines (fast path),
/// or a `Cow::Owned` with newlines removed.
///
/// # Examples
///
/// ```
/// use mask_core::filter_single_line;
///
/// assert_eq!(filter_single_line("555"), "555");
/// assert_eq!(filter_single_line("555\n123"), "555123");
/// assert_eq!(filter_single_line("a\r\nb"), "ab");
/// ```
pub fn filter_single_line(s: &str) -> Cow<'_, str> {
    if !s.contains('\n') && !s.contains('\r') {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.chars().filter(|c| *c != '\n' && *c != '\r').collect())
}

/// Replace the characters in `start..end` (character positions) with `with`.
///
/// Out-of-range positions are clamped to the end of `value`.
pub(crate) fn splice_chars(value: &str, start: usize, end: usize, with: &str) -> String {
    let a = byte_offset(value, start);
    let b = byte_offset(value, end.max(start));
    let mut out = String::with_capacity(value.len() - (b - a) + with.len());
    out.push_str(&value[..a]);
    out.push_str(with);
    out.push_str(&value[b..]);
    out
}
