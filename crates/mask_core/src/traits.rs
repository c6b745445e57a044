//! Host-facing trait over masked field stores.
//!
//! Screens, scripted runners and test harnesses drive masked fields through
//! this trait so they do not depend on [`MaskedInputStore`] directly.
//!
//! ```ignore
//! fn on_phone_changed(store: &mut impl MaskedFieldStore, widget: u32, text: &str) {
//!     let id = FieldId::new(widget);
//!     store.apply_change(id, text);
//!     let state = store.state(id).unwrap();
//!     // Write `state.value` and `state.selection` back into the control.
//! }
//! ```

use crate::editor::EditorState;
use crate::id::FieldId;
use crate::selection::SelectionRange;
use crate::store::MaskedInputStore;

pub trait MaskedFieldStore {
    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Ensure a field exists; if missing, seed it from a stored number.
    fn ensure_initial(&mut self, id: FieldId, stored: &str);

    /// Overwrite a field from a stored number.
    fn set(&mut self, id: FieldId, stored: &str);

    /// Blank the field and put the caret on the first slot.
    fn reset(&mut self, id: FieldId);

    fn focus(&mut self, id: FieldId);

    fn blur(&mut self, id: FieldId);

    // =========================================================================
    // Editing
    // =========================================================================

    /// The host control reported `raw` as its full text.
    fn apply_change(&mut self, id: FieldId, raw: &str);

    fn insert_text(&mut self, id: FieldId, s: &str);

    fn backspace(&mut self, id: FieldId);

    fn delete(&mut self, id: FieldId);

    // =========================================================================
    // Caret & selection
    // =========================================================================

    fn move_caret_left(&mut self, id: FieldId, selecting: bool);

    fn move_caret_right(&mut self, id: FieldId, selecting: bool);

    fn move_caret_to_start(&mut self, id: FieldId, selecting: bool);

    fn move_caret_to_end(&mut self, id: FieldId, selecting: bool);

    fn select_all(&mut self, id: FieldId);

    fn set_caret(&mut self, id: FieldId, caret: usize, selecting: bool);

    // =========================================================================
    // Read-only
    // =========================================================================

    fn state(&self, id: FieldId) -> Option<&EditorState>;

    fn selection(&self, id: FieldId) -> Option<SelectionRange>;

    /// Digits to persist for the field.
    fn digits(&self, id: FieldId) -> Option<String>;
}

impl MaskedFieldStore for MaskedInputStore {
    #[inline]
    fn ensure_initial(&mut self, id: FieldId, stored: &str) {
        MaskedInputStore::ensure_initial(self, id, stored)
    }

    #[inline]
    fn set(&mut self, id: FieldId, stored: &str) {
        MaskedInputStore::set(self, id, stored)
    }

    #[inline]
    fn reset(&mut self, id: FieldId) {
        MaskedInputStore::reset(self, id)
    }

    #[inline]
    fn focus(&mut self, id: FieldId) {
        MaskedInputStore::focus(self, id)
    }

    #[inline]
    fn blur(&mut self, id: FieldId) {
        MaskedInputStore::blur(self, id)
    }

    #[inline]
    fn apply_change(&mut self, id: FieldId, raw: &str) {
        MaskedInputStore::apply_change(self, id, raw)
    }

    #[inline]
    fn insert_text(&mut self, id: FieldId, s: &str) {
        MaskedInputStore::insert_text(self, id, s)
    }

    #[inline]
    fn backspace(&mut self, id: FieldId) {
        MaskedInputStore::backspace(self, id)
    }

    #[inline]
    fn delete(&mut self, id: FieldId) {
        MaskedInputStore::delete(self, id)
    }

    #[inline]
    fn move_caret_left(&mut self, id: FieldId, selecting: bool) {
        MaskedInputStore::move_caret_left(self, id, selecting)
    }

    #[inline]
    fn move_caret_right(&mut self, id: FieldId, selecting: bool) {
        MaskedInputStore::move_caret_right(self, id, selecting)
    }

    #[inline]
    fn move_caret_to_start(&mut self, id: FieldId, selecting: bool) {
        MaskedInputStore::move_caret_to_start(self, id, selecting)
    }

    #[inline]
    fn move_caret_to_end(&mut self, id: FieldId, selecting: bool) {
        MaskedInputStore::move_caret_to_end(self, id, selecting)
    }

    #[inline]
    fn select_all(&mut self, id: FieldId) {
        MaskedInputStore::select_all(self, id)
    }

    #[inline]
    fn set_caret(&mut self, id: FieldId, caret: usize, selecting: bool) {
        MaskedInputStore::set_caret(self, id, caret, selecting)
    }

    #[inline]
    fn state(&self, id: FieldId) -> Option<&EditorState> {
        MaskedInputStore::state(self, id)
    }

    #[inline]
    fn selection(&self, id: FieldId) -> Option<SelectionRange> {
        MaskedInputStore::selection(self, id)
    }

    #[inline]
    fn digits(&self, id: FieldId) -> Option<String> {
        MaskedInputStore::digits(self, id)
    }
}
