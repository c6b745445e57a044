//! Shared helpers for masked-editing tests: caret rendering, line diffs and
//! golden edit fixtures.

pub mod golden;

use mask_core::EditorState;

/// Render a masked value with `|` at the caret.
///
/// `"(555)    -     "` with the caret at 6 renders as `"(555) |   -     "`.
pub fn render_caret(state: &EditorState) -> String {
    let caret = state.caret();
    let mut out = String::with_capacity(state.value.len() + 1);
    let mut placed = false;
    for (pos, ch) in state.value.chars().enumerate() {
        if pos == caret {
            out.push('|');
            placed = true;
        }
        out.push(ch);
    }
    if !placed {
        out.push('|');
    }
    out
}

/// Make control characters visible in failure messages.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out
}

/// Describe the first mismatching line between two transcripts.
///
/// Returns an empty string when both match.
pub fn diff_lines(expected: &[String], actual: &[String]) -> String {
    use std::fmt::Write;

    let missing = "<missing>";
    let max = expected.len().max(actual.len());
    let mut out = String::new();

    let mismatch = (0..max).find(|&i| expected.get(i) != actual.get(i));
    let Some(i) = mismatch else {
        return out;
    };

    let start = i.saturating_sub(2);
    let end = (i + 3).min(max);
    let _ = writeln!(
        &mut out,
        "first mismatch at step {} (showing {}..={}):",
        i + 1,
        start + 1,
        end
    );
    for step in start..end {
        let left = expected.get(step).map(String::as_str).unwrap_or(missing);
        let right = actual.get(step).map(String::as_str).unwrap_or(missing);
        let marker = if step == i { ">" } else { " " };
        let _ = writeln!(&mut out, "{marker} {:>4}  expected: \"{left}\"", step + 1);
        let _ = writeln!(&mut out, "{marker} {:>4}    actual: \"{right}\"", step + 1);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use mask_core::SelectionRange;

    #[test]
    fn render_caret_marks_position() {
        let state = EditorState {
            value: "(555)    -     ".into(),
            selection: SelectionRange::collapsed(6),
        };
        assert_eq!(render_caret(&state), "(555) |   -     ");

        let end = state.with_selection(SelectionRange::collapsed(15));
        assert_eq!(render_caret(&end), "(555)    -     |");
    }

    #[test]
    fn diff_lines_points_at_first_mismatch() {
        let expected = vec!["a".to_string(), "b".to_string()];
        let actual = vec!["a".to_string(), "c".to_string(), "d".to_string()];
        let diff = diff_lines(&expected, &actual);
        assert!(diff.starts_with("first mismatch at step 2"));
        assert!(diff.contains("expected: \"b\""));
        assert!(diff.contains("actual: \"d\""));
        assert!(diff_lines(&expected, &expected).is_empty());
    }

    #[test]
    fn escape_text_shows_line_breaks() {
        assert_eq!(escape_text("5\n5\""), "5\\n5\\\"");
    }
}
