//! # mask_core
//!
//! UI-agnostic masked input editing for phone number fields.
//!
//! Contact and profile forms show phone numbers through a fixed-width mask,
//! `(XXX) XXX-XXXX`. Their text controls report only the full string after
//! each edit, so the mask has to be re-derived on every change together
//! with a caret the host writes back. This crate provides:
//! - [`MaskTemplate`]: the literal/slot layout of a mask
//! - [`MaskedEditor`]: the pure remasking transition over [`EditorState`]
//! - [`MaskedInputStore`]: per-field state for a form, keyed by [`FieldId`]
//! - [`apply_host_edit`]: native single-line control emulation for key-level input
//! - [`MaskRegistry`]: named masks loaded from TOML
//! - [`parse_script`]/[`run_script`]: line-oriented edit scripts
//!
//! ## Design Principles
//!
//! This crate does not depend on any UI toolkit, renderer or backend. All
//! positions are character offsets into the masked value, which is how host
//! controls report selections.
//!
//! ## Integration
//!
//! ```ignore
//! fn on_change_text(store: &mut MaskedInputStore, widget: FieldId, text: &str) -> (String, usize) {
//!     store.apply_change(widget, text);
//!     let state = store.state(widget).unwrap();
//!     (state.value.clone(), state.caret())
//! }
//! ```

mod config;
mod editor;
mod id;
mod native;
mod script;
mod selection;
mod store;
mod template;
mod text;
mod traits;

pub use config::{ConfigError, MaskConfig, MaskEntry, MaskRegistry, US_PHONE};
pub use editor::{EditorState, MaskedEditor, PhoneNumberError};
pub use id::FieldId;
pub use native::{HostEdit, apply_host_edit};
pub use script::{
    MAX_REPEAT, ScriptCommand, ScriptError, parse_line, parse_script, run_command, run_script,
};
pub use selection::SelectionRange;
pub use store::MaskedInputStore;
pub use template::{
    MaskTemplate, MaskTemplateError, PATTERN_SLOT, SLOT_PLACEHOLDER, US_PHONE_PATTERN,
};
pub use traits::MaskedFieldStore;

// Re-export text utilities for hosts that need to translate between the
// character positions used here and byte offsets.
pub use text::{byte_offset, char_len, digit_count, filter_single_line, only_digits, take_digits};
