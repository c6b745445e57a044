use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use mask_core::{
    EditorState, FieldId, HostEdit, MaskedEditor, MaskedInputStore, SelectionRange,
    apply_host_edit, parse_script, run_script,
};

const NUMBER: &str = "5551234567";

fn make_paste(bytes: usize) -> String {
    let mut clip = String::with_capacity(bytes + 16);
    while clip.len() < bytes {
        clip.push_str("call (555) 123-4567 ext. 89\n");
    }
    clip
}

fn type_number(editor: &MaskedEditor) -> EditorState {
    let mut state = editor.empty_state();
    let mut buf = [0u8; 4];
    for ch in NUMBER.chars() {
        let text: &str = ch.encode_utf8(&mut buf);
        if let Some(raw) = apply_host_edit(&state.value, state.selection, HostEdit::Insert(text)) {
            state = editor.handle_change(&raw, &state);
        }
    }
    state
}

fn bench_handle_change_single_key(c: &mut Criterion) {
    let editor = MaskedEditor::us_phone();
    let prior = editor.state_for("55512");
    let raw = "(555) 128 -     ";
    c.bench_function("bench_handle_change_single_key", |b| {
        b.iter(|| black_box(editor.handle_change(black_box(raw), &prior)));
    });
}

fn bench_handle_change_backspace_literal(c: &mut Criterion) {
    let editor = MaskedEditor::us_phone();
    let prior = editor.state_for(NUMBER).with_selection(SelectionRange::collapsed(5));
    let raw = "(555 123-4567 ";
    c.bench_function("bench_handle_change_backspace_literal", |b| {
        b.iter(|| black_box(editor.handle_change(black_box(raw), &prior)));
    });
}

fn bench_type_full_number(c: &mut Criterion) {
    let editor = MaskedEditor::us_phone();
    c.bench_function("bench_type_full_number", |b| {
        b.iter(|| black_box(type_number(black_box(&editor))));
    });
}

fn bench_paste_large_clipboard(c: &mut Criterion) {
    let editor = MaskedEditor::us_phone();
    let clip = make_paste(256 * 1024);
    c.bench_function("bench_paste_large_clipboard", |b| {
        b.iter(|| {
            let empty = editor.empty_state();
            let raw = apply_host_edit(&empty.value, empty.selection, HostEdit::Insert(&clip))
                .unwrap_or_default();
            black_box(editor.handle_change(black_box(&raw), &empty));
        });
    });
}

fn bench_store_script(c: &mut Criterion) {
    let src = "type 5551234567\ncaret 5\nbackspace 3\nselect-all\npaste \"800 555 0100\"\n";
    let commands = match parse_script(src) {
        Ok(commands) => commands,
        Err(err) => panic!("bench script should parse: {err}"),
    };
    let id = FieldId::new(1);
    c.bench_function("bench_store_script", |b| {
        b.iter_batched(
            MaskedInputStore::default,
            |mut store| {
                run_script(&mut store, id, &commands);
                black_box(store.digits(id));
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_handle_change_single_key,
    bench_handle_change_backspace_literal,
    bench_type_full_number,
    bench_paste_large_clipboard,
    bench_store_script
);
criterion_main!(benches);
