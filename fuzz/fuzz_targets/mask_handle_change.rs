#![no_main]

use libfuzzer_sys::fuzz_target;
use mask_core::{MaskedEditor, SelectionRange, char_len, take_digits};

// First byte picks the prior caret, second the stored digit count; the rest
// is the raw text the control reports.
fuzz_target!(|data: &[u8]| {
    let [caret, stored, rest @ ..] = data else {
        return;
    };
    let Ok(raw) = std::str::from_utf8(rest) else {
        return;
    };

    let editor = MaskedEditor::us_phone();
    let template = editor.template();
    let prior_digits = &"5551234567"[..usize::from(*stored) % 11];
    let prior = editor
        .state_for(prior_digits)
        .with_selection(SelectionRange::collapsed(usize::from(*caret) % (template.len() + 1)));

    let next = editor.handle_change(raw, &prior);
    assert_eq!(char_len(&next.value), template.len());
    for &pos in template.special_positions() {
        assert_eq!(next.value.chars().nth(pos), template.literal_at(pos));
    }
    assert!(next.caret() <= template.len());

    let again = editor.handle_change(&next.value, &next);
    assert_eq!(again.value, next.value);

    if char_len(raw) + 1 != char_len(&prior.value) {
        assert_eq!(next.digits(), take_digits(raw, template.slot_count()));
    }
});
