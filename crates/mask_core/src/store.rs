//! Central store for masked field values, carets and host selections.
//!
//! The store is UI-agnostic: it does not render or measure anything. Hosts
//! either forward the raw text their control reports ([`apply_change`]) or
//! forward key-level edits, which the store runs through the native control
//! emulation before remasking.
//!
//! [`apply_change`]: MaskedInputStore::apply_change

use crate::editor::{EditorState, MaskedEditor};
use crate::id::FieldId;
use crate::native::{HostEdit, apply_host_edit};
use crate::selection::SelectionRange;
use crate::text::char_len;
use std::collections::HashMap;

/// Per-field state.
#[derive(Clone, Debug)]
struct FieldState {
    /// Last state produced by the editor (or the host's caret movement).
    editor: EditorState,

    /// Selection anchor set by shift-movement or select-all.
    ///
    /// When `Some(anchor)`, the host selection is
    /// `min(anchor, caret)..max(anchor, caret)`.
    anchor: Option<usize>,

    /// Monotonic revision counter, incremented when the value changes.
    value_rev: u64,
}

impl FieldState {
    fn new(editor: EditorState) -> Self {
        Self {
            editor,
            anchor: None,
            value_rev: 0,
        }
    }

    fn caret(&self) -> usize {
        self.editor.selection.end
    }

    fn host_selection(&self) -> SelectionRange {
        let caret = self.caret();
        SelectionRange::new(self.anchor.unwrap_or(caret), caret)
    }
}

/// Store of masked phone fields for one form.
///
/// Every field shares the store's [`MaskedEditor`], so a form with a
/// personal and a business number keeps both under the same layout.
///
/// # Example
///
/// ```
/// use mask_core::{FieldId, MaskedInputStore};
///
/// let mut store = MaskedInputStore::default();
/// let phone = FieldId::new(1);
///
/// store.ensure_initial(phone, "");
/// store.insert_text(phone, "555");
/// store.insert_text(phone, "1234567");
///
/// assert_eq!(store.get(phone), Some("(555) 123-4567 "));
/// assert_eq!(store.digits(phone).as_deref(), Some("5551234567"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct MaskedInputStore {
    editor: MaskedEditor,
    fields: HashMap<FieldId, FieldState>,
}

impl MaskedInputStore {
    pub fn new(editor: MaskedEditor) -> Self {
        Self {
            editor,
            fields: HashMap::new(),
        }
    }

    #[inline]
    pub fn editor(&self) -> &MaskedEditor {
        &self.editor
    }

    /// Returns `true` if an entry exists for this field.
    pub fn has(&self, id: FieldId) -> bool {
        self.fields.contains_key(&id)
    }

    /// Masked value of the field, if any.
    pub fn get(&self, id: FieldId) -> Option<&str> {
        self.fields.get(&id).map(|f| f.editor.value())
    }

    pub fn caret(&self, id: FieldId) -> Option<usize> {
        self.fields.get(&id).map(FieldState::caret)
    }

    /// Non-empty host selection, if one is active.
    pub fn selection(&self, id: FieldId) -> Option<SelectionRange> {
        self.fields
            .get(&id)
            .map(FieldState::host_selection)
            .filter(|sel| !sel.is_empty())
    }

    /// Last editor state: masked value plus collapsed caret.
    pub fn state(&self, id: FieldId) -> Option<&EditorState> {
        self.fields.get(&id).map(|f| &f.editor)
    }

    /// Digits currently held by the field.
    pub fn digits(&self, id: FieldId) -> Option<String> {
        self.fields.get(&id).map(|f| self.editor.unmasked(&f.editor))
    }

    pub fn is_complete(&self, id: FieldId) -> bool {
        self.fields
            .get(&id)
            .is_some_and(|f| self.editor.is_complete(&f.editor))
    }

    /// Monotonic revision counter for the field's value.
    pub fn value_revision(&self, id: FieldId) -> u64 {
        self.fields.get(&id).map(|f| f.value_rev).unwrap_or(0)
    }

    /// Ensure an entry exists; if missing, seeds it from a stored number.
    pub fn ensure_initial(&mut self, id: FieldId, stored: &str) {
        if self.fields.contains_key(&id) {
            return;
        }
        let editor = self.editor.state_for(stored);
        self.fields.insert(id, FieldState::new(editor));
    }

    /// Overwrite the field from a stored number (any formatting).
    pub fn set(&mut self, id: FieldId, stored: &str) {
        let next = self.editor.state_for(stored);
        match self.fields.get_mut(&id) {
            Some(field) => commit(field, next),
            None => {
                self.fields.insert(id, FieldState::new(next));
            }
        }
    }

    /// Back to the blank template with the caret on the first slot.
    pub fn reset(&mut self, id: FieldId) {
        let blank = self.editor.empty_state();
        if let Some(field) = self.fields.get_mut(&id) {
            log::debug!(target: "mask.store", "reset {id}");
            commit(field, blank);
        }
    }

    /// Drop the field's entry. Returns `true` if it existed.
    pub fn remove(&mut self, id: FieldId) -> bool {
        self.fields.remove(&id).is_some()
    }

    /// Drop every field, e.g. when the owning form unmounts.
    pub fn clear(&mut self) {
        log::debug!(target: "mask.store", "clear {} fields", self.fields.len());
        self.fields.clear();
    }

    /// Called when a field gains focus: clamps the caret, clears selection.
    pub fn focus(&mut self, id: FieldId) {
        if let Some(field) = self.fields.get_mut(&id) {
            clamp_field(field);
            field.anchor = None;
        }
    }

    pub fn blur(&mut self, id: FieldId) {
        if let Some(field) = self.fields.get_mut(&id) {
            clamp_field(field);
            field.anchor = None;
        }
    }

    /// Remask after the host control reported `raw` as its full text.
    ///
    /// The host selection at the time of the edit is the prior caret.
    pub fn apply_change(&mut self, id: FieldId, raw: &str) {
        let field = field_entry(&mut self.fields, &self.editor, id);
        clamp_field(field);
        let prior = field
            .editor
            .clone()
            .with_selection(field.host_selection());
        let next = self.editor.handle_change(raw, &prior);
        commit(field, next);
    }

    /// Insert typed or pasted text at the caret (one change event).
    pub fn insert_text(&mut self, id: FieldId, s: &str) {
        self.host_edit(id, HostEdit::Insert(s));
    }

    /// Backspace key: deletes the selection or the character before the caret.
    pub fn backspace(&mut self, id: FieldId) {
        self.host_edit(id, HostEdit::Backspace);
    }

    /// Delete key: deletes the selection or the character after the caret.
    pub fn delete(&mut self, id: FieldId) {
        self.host_edit(id, HostEdit::Delete);
    }

    /// Move the caret left by one character.
    ///
    /// If `selecting` is true, extends/modifies the selection.
    pub fn move_caret_left(&mut self, id: FieldId, selecting: bool) {
        let field = self.field_mut(id);
        clamp_field(field);
        if let (false, Some(sel)) = (selecting, non_empty(field.host_selection())) {
            place_caret(field, sel.start, false);
            return;
        }
        let caret = field.caret().saturating_sub(1);
        place_caret(field, caret, selecting);
    }

    /// Move the caret right by one character.
    ///
    /// If `selecting` is true, extends/modifies the selection.
    pub fn move_caret_right(&mut self, id: FieldId, selecting: bool) {
        let field = self.field_mut(id);
        clamp_field(field);
        if let (false, Some(sel)) = (selecting, non_empty(field.host_selection())) {
            place_caret(field, sel.end, false);
            return;
        }
        let caret = field.caret() + 1;
        place_caret(field, caret, selecting);
    }

    pub fn move_caret_to_start(&mut self, id: FieldId, selecting: bool) {
        let field = self.field_mut(id);
        place_caret(field, 0, selecting);
    }

    pub fn move_caret_to_end(&mut self, id: FieldId, selecting: bool) {
        let field = self.field_mut(id);
        let end = char_len(field.editor.value());
        place_caret(field, end, selecting);
    }

    /// Select the whole masked value.
    pub fn select_all(&mut self, id: FieldId) {
        let field = self.field_mut(id);
        place_caret(field, 0, false);
        let end = char_len(field.editor.value());
        place_caret(field, end, true);
    }

    /// Set the caret to a specific character position.
    ///
    /// If `selecting` is true, extends/modifies the selection.
    pub fn set_caret(&mut self, id: FieldId, caret: usize, selecting: bool) {
        let field = self.field_mut(id);
        place_caret(field, caret, selecting);
    }

    fn field_mut(&mut self, id: FieldId) -> &mut FieldState {
        field_entry(&mut self.fields, &self.editor, id)
    }

    fn host_edit(&mut self, id: FieldId, edit: HostEdit<'_>) {
        let field = field_entry(&mut self.fields, &self.editor, id);
        clamp_field(field);
        let selection = field.host_selection();
        let Some(raw) = apply_host_edit(field.editor.value(), selection, edit) else {
            return;
        };
        let prior = field.editor.clone().with_selection(selection);
        let next = self.editor.handle_change(&raw, &prior);
        commit(field, next);
    }
}

// --- Internal helper functions ---

fn field_entry<'a>(
    fields: &'a mut HashMap<FieldId, FieldState>,
    editor: &MaskedEditor,
    id: FieldId,
) -> &'a mut FieldState {
    fields
        .entry(id)
        .or_insert_with(|| FieldState::new(editor.empty_state()))
}

fn non_empty(sel: SelectionRange) -> Option<SelectionRange> {
    (!sel.is_empty()).then_some(sel)
}

fn place_caret(field: &mut FieldState, caret: usize, selecting: bool) {
    let caret = caret.min(char_len(field.editor.value()));

    if selecting {
        if field.anchor.is_none() {
            field.anchor = Some(field.caret());
        }
    } else {
        field.anchor = None;
    }
    field.editor.selection = SelectionRange::collapsed(caret);

    // A collapsed selection should not leave a sticky anchor behind.
    if field.anchor == Some(caret) {
        field.anchor = None;
    }
}

fn clamp_field(field: &mut FieldState) {
    let len = char_len(field.editor.value());
    field.editor.selection = field.editor.selection.clamped(len);
    if let Some(a) = field.anchor {
        field.anchor = Some(a.min(len));
    }
}

fn commit(field: &mut FieldState, next: EditorState) {
    if next.value != field.editor.value {
        field.value_rev = field.value_rev.wrapping_add(1);
    }
    field.editor = next;
    field.anchor = None;
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLANK: &str = "(   )    -     ";
    const FULL: &str = "(555) 123-4567 ";

    fn store_with(stored: &str) -> (MaskedInputStore, FieldId) {
        let mut store = MaskedInputStore::default();
        let id = FieldId::new(1);
        store.ensure_initial(id, stored);
        store.focus(id);
        (store, id)
    }

    #[test]
    fn ensure_initial_seeds_once() {
        let (mut store, id) = store_with("5551234567");
        assert_eq!(store.get(id), Some(FULL));
        assert_eq!(store.caret(id), Some(14));

        store.ensure_initial(id, "");
        assert_eq!(store.get(id), Some(FULL));
    }

    #[test]
    fn typing_digit_by_digit_matches_the_editor() {
        let (mut store, id) = store_with("");
        assert_eq!(store.get(id), Some(BLANK));
        assert_eq!(store.caret(id), Some(1));

        for ch in ["5", "5", "5"] {
            store.insert_text(id, ch);
        }
        assert_eq!(store.get(id), Some("(555)    -     "));
        assert_eq!(store.caret(id), Some(6));

        for ch in "1234567".chars() {
            store.insert_text(id, &ch.to_string());
        }
        assert_eq!(store.get(id), Some(FULL));
        assert_eq!(store.caret(id), Some(14));
        assert!(store.is_complete(id));
    }

    #[test]
    fn backspace_on_special_caret_clears_previous_slot() {
        let (mut store, id) = store_with("5551234567");
        store.set_caret(id, 5, false);
        store.backspace(id);
        assert_eq!(store.get(id), Some("(551) 234-567  "));
        assert_eq!(store.caret(id), Some(3));
    }

    #[test]
    fn backspace_at_start_changes_nothing() {
        let (mut store, id) = store_with("5551234567");
        store.move_caret_to_start(id, false);
        let rev = store.value_revision(id);
        store.backspace(id);
        assert_eq!(store.get(id), Some(FULL));
        assert_eq!(store.caret(id), Some(0));
        assert_eq!(store.value_revision(id), rev);
    }

    #[test]
    fn backspace_right_after_area_code_is_absorbed() {
        // After the third digit the caret jumps to 6; a native backspace there
        // removes the separator space, which carries no digit.
        let (mut store, id) = store_with("555");
        assert_eq!(store.caret(id), Some(6));
        store.backspace(id);
        assert_eq!(store.get(id), Some("(555)    -     "));
        assert_eq!(store.caret(id), Some(6));
    }

    #[test]
    fn shift_left_selection_then_backspace() {
        let (mut store, id) = store_with("5551234567");
        for _ in 0..4 {
            store.move_caret_left(id, true);
        }
        assert_eq!(store.selection(id), Some(SelectionRange::new(10, 14)));

        store.backspace(id);
        assert_eq!(store.get(id), Some("(555) 123-     "));
        assert_eq!(store.caret(id), Some(9));
        assert_eq!(store.selection(id), None);
    }

    #[test]
    fn select_all_then_type_replaces_number() {
        let (mut store, id) = store_with("5551234567");
        store.select_all(id);
        assert_eq!(store.selection(id), Some(SelectionRange::new(0, 15)));

        store.insert_text(id, "9");
        assert_eq!(store.get(id), Some("(9  )    -     "));
        assert_eq!(store.caret(id), Some(2));
    }

    #[test]
    fn arrow_without_shift_collapses_selection_to_its_edge() {
        let (mut store, id) = store_with("5551234567");
        store.set_caret(id, 2, false);
        store.set_caret(id, 7, true);
        store.move_caret_left(id, false);
        assert_eq!(store.caret(id), Some(2));
        assert_eq!(store.selection(id), None);

        store.set_caret(id, 7, true);
        store.move_caret_right(id, false);
        assert_eq!(store.caret(id), Some(7));
    }

    #[test]
    fn shift_right_extends_selection_and_blur_drops_it() {
        let (mut store, id) = store_with("5551234567");
        store.set_caret(id, 2, false);
        for _ in 0..3 {
            store.move_caret_right(id, true);
        }
        assert_eq!(store.selection(id), Some(SelectionRange::new(2, 5)));
        assert_eq!(store.caret(id), Some(5));

        store.blur(id);
        assert_eq!(store.selection(id), None);
        assert_eq!(store.caret(id), Some(5));
        assert_eq!(store.get(id), Some(FULL));

        // A fresh shift-right after blur anchors at the current caret.
        store.move_caret_right(id, true);
        assert_eq!(store.selection(id), Some(SelectionRange::new(5, 6)));
    }

    #[test]
    fn caret_moves_are_clamped_to_the_mask() {
        let (mut store, id) = store_with("");
        store.move_caret_to_end(id, false);
        assert_eq!(store.caret(id), Some(15));
        store.move_caret_right(id, false);
        assert_eq!(store.caret(id), Some(15));
        store.set_caret(id, 99, false);
        assert_eq!(store.caret(id), Some(15));
        store.move_caret_to_start(id, false);
        store.move_caret_left(id, false);
        assert_eq!(store.caret(id), Some(0));
    }

    #[test]
    fn apply_change_uses_host_selection_as_prior_caret() {
        let (mut store, id) = store_with("5551234567");
        store.set_caret(id, 4, false);
        store.apply_change(id, "(55) 123-4567 ");
        assert_eq!(store.get(id), Some("(551) 234-567  "));
        assert_eq!(store.caret(id), Some(3));
    }

    #[test]
    fn revision_tracks_value_changes_only() {
        let (mut store, id) = store_with("");
        assert_eq!(store.value_revision(id), 0);

        store.insert_text(id, "5");
        assert_eq!(store.value_revision(id), 1);

        // Letters are dropped, so the value does not change.
        store.insert_text(id, "x");
        assert_eq!(store.value_revision(id), 1);

        store.reset(id);
        assert_eq!(store.get(id), Some(BLANK));
        assert_eq!(store.value_revision(id), 2);
    }

    #[test]
    fn fields_are_independent() {
        let mut store = MaskedInputStore::default();
        let personal = FieldId::new(1);
        let business = FieldId::new(2);
        store.ensure_initial(personal, "555");
        store.ensure_initial(business, "(800) 555-0100");

        store.set_caret(personal, 4, false);
        store.backspace(personal);
        assert_eq!(store.digits(personal).as_deref(), Some("55"));
        assert_eq!(store.digits(business).as_deref(), Some("8005550100"));

        assert!(store.remove(personal));
        assert!(!store.has(personal));
        store.clear();
        assert!(!store.has(business));
        assert_eq!(store.get(business), None);
    }

    #[test]
    fn set_overwrites_existing_value() {
        let (mut store, id) = store_with("555");
        store.set(id, "555-867-5309");
        assert_eq!(store.get(id), Some("(555) 867-5309 "));
        assert_eq!(store.caret(id), Some(14));
        assert_eq!(store.value_revision(id), 1);
    }
}
