use mask_core::MaskRegistry;
use mask_test_support::golden::{check_case, load_cases, run_case};
use std::fs;
use std::path::{Path, PathBuf};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

fn registry() -> MaskRegistry {
    let path = fixtures_dir().join("masks.toml");
    let src = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read mask config {path:?}: {err}"));
    MaskRegistry::from_toml_str(&src)
        .unwrap_or_else(|err| panic!("failed to load mask config {path:?}: {err}"))
}

fn run_fixture(name: &str) {
    let path = fixtures_dir().join(name);
    let registry = registry();
    let cases = load_cases(&path);

    let mut failures = Vec::new();
    for case in &cases {
        let result = run_case(case, &registry).and_then(|outcome| check_case(case, &outcome));
        if let Err(msg) = result {
            failures.push(msg);
        }
    }

    assert!(
        failures.is_empty(),
        "{} of {} cases in {name} failed:\n\n{}",
        failures.len(),
        cases.len(),
        failures.join("\n\n")
    );
}

#[test]
fn golden_edit_cases() {
    run_fixture("edits.toml");
}

#[test]
fn golden_paste_cases() {
    run_fixture("paste.json");
}
