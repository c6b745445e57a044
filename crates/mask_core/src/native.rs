//! Emulation of a native single-line text control.
//!
//! Host toolkits apply key presses to their own copy of the text and then
//! report the resulting full string. This module reproduces those rules so
//! key-level input (tests, scripted demos, fuzzing) can be turned into the
//! raw strings [`MaskedEditor::handle_change`](crate::MaskedEditor::handle_change)
//! expects.

use crate::selection::SelectionRange;
use crate::text::{char_len, filter_single_line, splice_chars};

/// A key-level edit as a native control would receive it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostEdit<'a> {
    /// Typed or pasted text; replaces the selection if there is one.
    Insert(&'a str),
    /// Delete the character before the caret, or the selection.
    Backspace,
    /// Delete the character after the caret, or the selection.
    Delete,
}

/// Apply `edit` to `value` the way a native single-line control does.
///
/// Returns the full text the control would report, or `None` when the
/// edit leaves the text untouched (backspace at the start, delete at the
/// end, inserting nothing into an empty selection). Controls do not fire
/// change events in those cases.
///
/// # Examples
///
/// ```
/// use mask_core::{HostEdit, SelectionRange, apply_host_edit};
///
/// let raw = apply_host_edit("(555)", SelectionRange::collapsed(4), HostEdit::Backspace);
/// assert_eq!(raw.as_deref(), Some("(55)"));
///
/// let raw = apply_host_edit("(555)", SelectionRange::new(1, 4), HostEdit::Insert("9"));
/// assert_eq!(raw.as_deref(), Some("(9)"));
/// ```
pub fn apply_host_edit(value: &str, selection: SelectionRange, edit: HostEdit<'_>) -> Option<String> {
    let len = char_len(value);
    let sel = selection.clamped(len);

    match edit {
        HostEdit::Insert(text) => {
            let text = filter_single_line(text);
            if text.is_empty() && sel.is_empty() {
                return None;
            }
            Some(splice_chars(value, sel.start, sel.end, &text))
        }
        HostEdit::Backspace => {
            if !sel.is_empty() {
                return Some(splice_chars(value, sel.start, sel.end, ""));
            }
            if sel.start == 0 {
                return None;
            }
            Some(splice_chars(value, sel.start - 1, sel.start, ""))
        }
        HostEdit::Delete => {
            if !sel.is_empty() {
                return Some(splice_chars(value, sel.start, sel.end, ""));
            }
            if sel.start >= len {
                return None;
            }
            Some(splice_chars(value, sel.start, sel.start + 1, ""))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = "(555) 123-4567 ";

    #[test]
    fn insert_at_caret() {
        let raw = apply_host_edit(FULL, SelectionRange::collapsed(6), HostEdit::Insert("0"));
        assert_eq!(raw.as_deref(), Some("(555) 0123-4567 "));
    }

    #[test]
    fn insert_strips_line_breaks() {
        let raw = apply_host_edit("()", SelectionRange::collapsed(1), HostEdit::Insert("55\r\n5"));
        assert_eq!(raw.as_deref(), Some("(555)"));
    }

    #[test]
    fn insert_replaces_selection() {
        let raw = apply_host_edit(FULL, SelectionRange::new(0, 15), HostEdit::Insert("9"));
        assert_eq!(raw.as_deref(), Some("9"));
    }

    #[test]
    fn empty_insert_deletes_selection_only() {
        assert_eq!(
            apply_host_edit(FULL, SelectionRange::collapsed(3), HostEdit::Insert("")),
            None
        );
        assert_eq!(
            apply_host_edit("(555)", SelectionRange::new(1, 3), HostEdit::Insert("")).as_deref(),
            Some("(5)")
        );
    }

    #[test]
    fn backspace_removes_previous_char() {
        let raw = apply_host_edit(FULL, SelectionRange::collapsed(5), HostEdit::Backspace);
        assert_eq!(raw.as_deref(), Some("(555 123-4567 "));
    }

    #[test]
    fn backspace_at_start_is_a_no_op() {
        assert_eq!(
            apply_host_edit(FULL, SelectionRange::collapsed(0), HostEdit::Backspace),
            None
        );
    }

    #[test]
    fn delete_removes_next_char() {
        let raw = apply_host_edit(FULL, SelectionRange::collapsed(1), HostEdit::Delete);
        assert_eq!(raw.as_deref(), Some("(55) 123-4567 "));
        assert_eq!(
            apply_host_edit(FULL, SelectionRange::collapsed(15), HostEdit::Delete),
            None
        );
    }

    #[test]
    fn selection_wins_over_single_char_deletion() {
        let raw = apply_host_edit(FULL, SelectionRange::new(10, 14), HostEdit::Backspace);
        assert_eq!(raw.as_deref(), Some("(555) 123- "));
        let raw = apply_host_edit(FULL, SelectionRange::new(10, 14), HostEdit::Delete);
        assert_eq!(raw.as_deref(), Some("(555) 123- "));
    }

    #[test]
    fn out_of_range_selection_is_clamped() {
        let raw = apply_host_edit("(5)", SelectionRange::collapsed(40), HostEdit::Backspace);
        assert_eq!(raw.as_deref(), Some("(5"));
    }
}
