//! The masked editor: remasks raw text-control output after every edit.
//!
//! Hosts with a controlled text input forward every change event here as
//! the full string the control now holds, together with the state they
//! displayed before the edit. The editor answers with a new masked value
//! and a caret, which the host writes back into the control in one step.

use crate::selection::SelectionRange;
use crate::template::{MaskTemplate, SLOT_PLACEHOLDER};
use crate::text::{char_len, digit_count, only_digits, take_digits};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Masked value plus caret, as displayed by the host control.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorState {
    pub value: String,
    pub selection: SelectionRange,
}

impl EditorState {
    /// Blank template with the caret on the first digit slot.
    pub fn empty(template: &MaskTemplate) -> Self {
        Self {
            value: template.blank().to_string(),
            selection: SelectionRange::collapsed(template.first_slot()),
        }
    }

    /// Same value, host-supplied selection.
    ///
    /// Used to describe where the caret sat right before an edit.
    pub fn with_selection(mut self, selection: SelectionRange) -> Self {
        self.selection = selection;
        self
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Caret position (start of the selection).
    #[inline]
    pub fn caret(&self) -> usize {
        self.selection.start
    }

    /// The digits currently held by the mask, left to right.
    pub fn digits(&self) -> String {
        only_digits(&self.value)
    }

    pub fn digit_count(&self) -> usize {
        digit_count(&self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhoneNumberError {
    Incomplete { have: usize, need: usize },
}

impl fmt::Display for PhoneNumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhoneNumberError::Incomplete { have, need } => {
                write!(f, "phone number has {have} of {need} digits")
            }
        }
    }
}

impl std::error::Error for PhoneNumberError {}

/// Remasking editor for one mask layout.
///
/// # Example
///
/// ```
/// use mask_core::MaskedEditor;
///
/// let editor = MaskedEditor::us_phone();
/// let empty = editor.empty_state();
/// assert_eq!(empty.value(), "(   )    -     ");
/// assert_eq!(empty.caret(), 1);
///
/// // The control reports its full text after a paste.
/// let next = editor.handle_change("(555) 123-4567 ext. 9", &empty);
/// assert_eq!(next.value(), "(555) 123-4567 ");
/// assert_eq!(next.caret(), 14);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MaskedEditor {
    template: MaskTemplate,
}

impl MaskedEditor {
    pub fn new(template: MaskTemplate) -> Self {
        Self { template }
    }

    pub fn us_phone() -> Self {
        Self::new(MaskTemplate::us_phone())
    }

    #[inline]
    pub fn template(&self) -> &MaskTemplate {
        &self.template
    }

    pub fn empty_state(&self) -> EditorState {
        EditorState::empty(&self.template)
    }

    /// Compute the state after the control reported `raw` as its new text.
    ///
    /// `prior` is the state displayed before the edit; its selection start
    /// is the caret at the time of the edit. Never fails: any input reduces
    /// to a value that conforms to the template.
    ///
    /// A single-character deletion with the caret on a special (punctuation)
    /// position removes the closest digit left of the caret instead of the
    /// punctuation, and leaves the caret on that slot. Every other edit
    /// keeps the first `slot_count` digits of `raw`, in order.
    pub fn handle_change(&self, raw: &str, prior: &EditorState) -> EditorState {
        let caret = prior.selection.start;
        let is_single_deletion = char_len(raw) + 1 == char_len(&prior.value);

        if is_single_deletion && self.template.is_special(caret) {
            if let Some(slot) = self.template.prev_slot_before(caret) {
                log::trace!(
                    target: "mask.editor",
                    "backspace over literal at {caret}: clearing slot {slot}"
                );
                return self.clear_slot(prior, slot);
            }
        }

        self.remask(raw, prior)
    }

    /// Seed a state from a stored phone number in any formatting.
    ///
    /// The caret lands where it would after pasting `stored` into an empty
    /// field.
    pub fn state_for(&self, stored: &str) -> EditorState {
        self.remask(stored, &self.empty_state())
    }

    /// Digits to persist for `state`.
    pub fn unmasked(&self, state: &EditorState) -> String {
        take_digits(&state.value, self.template.slot_count())
    }

    pub fn is_complete(&self, state: &EditorState) -> bool {
        state.digit_count() >= self.template.slot_count()
    }

    /// Unmasked digits of a fully filled mask.
    ///
    /// # Errors
    ///
    /// Returns [`PhoneNumberError::Incomplete`] when any slot is blank.
    pub fn validate(&self, state: &EditorState) -> Result<String, PhoneNumberError> {
        let digits = self.unmasked(state);
        let need = self.template.slot_count();
        if digits.len() < need {
            return Err(PhoneNumberError::Incomplete {
                have: digits.len(),
                need,
            });
        }
        Ok(digits)
    }

    fn clear_slot(&self, prior: &EditorState, slot: usize) -> EditorState {
        let cleared: String = prior
            .value
            .chars()
            .enumerate()
            .map(|(pos, ch)| if pos == slot { SLOT_PLACEHOLDER } else { ch })
            .collect();
        let digits = take_digits(&cleared, self.template.slot_count());

        EditorState {
            value: self.template.render(&digits),
            selection: SelectionRange::collapsed(slot),
        }
    }

    fn remask(&self, raw: &str, prior: &EditorState) -> EditorState {
        let t = &self.template;
        let digits = take_digits(raw, t.slot_count());
        let count = digits.len();
        let prior_count = prior.digit_count();

        let caret = match count {
            0 => t.first_slot(),
            n => {
                let after_last = t.slots()[n - 1] + 1;
                if n < prior_count {
                    after_last
                } else {
                    // Typing forward skips punctuation the caret would land on.
                    t.next_slot_at_or_after(after_last).unwrap_or(after_last)
                }
            }
        };

        log::trace!(
            target: "mask.editor",
            "remask: {prior_count} -> {count} digits, caret {caret}"
        );

        EditorState {
            value: t.render(&digits),
            selection: SelectionRange::collapsed(caret),
        }
    }
}
