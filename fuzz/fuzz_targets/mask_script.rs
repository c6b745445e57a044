#![no_main]

use libfuzzer_sys::fuzz_target;
use mask_core::{FieldId, MaskedInputStore, char_len, parse_script, run_script};

fuzz_target!(|data: &[u8]| {
    let Ok(src) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(commands) = parse_script(src) else {
        return;
    };

    let mut store = MaskedInputStore::default();
    let id = FieldId::new(0);
    store.ensure_initial(id, "");
    run_script(&mut store, id, &commands);

    let Some(state) = store.state(id) else {
        panic!("field disappeared after running a script");
    };
    let len = store.editor().template().len();
    assert_eq!(char_len(&state.value), len);
    assert!(state.selection.end <= len);
    assert!(state.digit_count() <= store.editor().template().slot_count());
});
