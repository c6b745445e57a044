//! Golden edit fixtures.
//!
//! A fixture file lists cases; each case seeds one masked field, runs an
//! edit script against it and states the expected value, caret and
//! (optionally) the caret transcript after every script line. Files are TOML
//! or JSON, picked by extension, and share one schema:
//!
//! ```toml
//! format = "mask-edit-cases-v1"
//!
//! [[case]]
//! id = "type-area-code"
//! script = ["type 555"]
//! expect_value = "(555)    -     "
//! expect_caret = 6
//! expect_transcript = ["(555) |   -     "]
//! ```

use crate::{diff_lines, escape_text, render_caret};
use mask_core::{
    EditorState, FieldId, MaskRegistry, MaskedEditor, MaskedInputStore, parse_line, run_command,
};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

pub const EDIT_CASES_FORMAT_V1: &str = "mask-edit-cases-v1";

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct EditCaseFile {
    format: String,
    #[serde(default, rename = "case")]
    cases: Vec<EditCase>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct EditCase {
    pub id: String,
    /// Registry mask name; the registry default when absent.
    #[serde(default)]
    pub mask: Option<String>,
    /// Stored number the field is seeded with.
    #[serde(default)]
    pub initial: String,
    pub script: Vec<String>,
    pub expect_value: String,
    pub expect_caret: usize,
    #[serde(default)]
    pub expect_digits: Option<String>,
    #[serde(default)]
    pub expect_transcript: Option<Vec<String>>,
}

#[derive(Clone, Debug)]
pub struct CaseOutcome {
    pub state: EditorState,
    pub digits: String,
    /// Caret rendering after each script line.
    pub transcript: Vec<String>,
}

/// Load and validate a fixture file. Panics with context on any problem.
pub fn load_cases(path: &Path) -> Vec<EditCase> {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read edit fixture {path:?}: {err}"));

    let file: EditCaseFile = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&content)
            .unwrap_or_else(|err| panic!("failed to parse edit fixture TOML {path:?}: {err}")),
        Some("json") => serde_json::from_str(&content)
            .unwrap_or_else(|err| panic!("failed to parse edit fixture JSON {path:?}: {err}")),
        other => panic!("unsupported edit fixture extension {other:?} for {path:?}"),
    };

    assert_eq!(
        file.format, EDIT_CASES_FORMAT_V1,
        "unsupported edit fixture format in {path:?}"
    );
    validate_cases(&file.cases, path);
    file.cases
}

fn validate_cases(cases: &[EditCase], path: &Path) {
    assert!(!cases.is_empty(), "edit fixture {path:?} has no cases");
    let mut seen = BTreeSet::new();
    for case in cases {
        assert!(
            seen.insert(case.id.as_str()),
            "duplicate case id '{}' in {path:?}",
            case.id
        );
        assert!(
            !case.script.is_empty(),
            "case '{}' in {path:?} has an empty script",
            case.id
        );
        if let Some(transcript) = &case.expect_transcript {
            assert_eq!(
                transcript.len(),
                case.script.len(),
                "case '{}' in {path:?}: transcript must have one entry per script line",
                case.id
            );
        }
    }
}

/// Run `case` against a fresh store using the mask it names.
pub fn run_case(case: &EditCase, registry: &MaskRegistry) -> Result<CaseOutcome, String> {
    let template = match &case.mask {
        Some(name) => registry
            .get(name)
            .ok_or_else(|| format!("unknown mask '{name}'"))?,
        None => registry.default_mask(),
    };
    let mut store = MaskedInputStore::new(MaskedEditor::new(template.clone()));
    let id = FieldId::new(1);
    store.ensure_initial(id, &case.initial);
    store.focus(id);

    let mut transcript = Vec::with_capacity(case.script.len());
    for (idx, line) in case.script.iter().enumerate() {
        let cmd = parse_line(idx + 1, line).map_err(|err| err.to_string())?;
        if let Some(cmd) = cmd {
            run_command(&mut store, id, &cmd);
        }
        let state = store
            .state(id)
            .ok_or_else(|| format!("field vanished after '{line}'"))?;
        transcript.push(render_caret(state));
    }

    let state = store
        .state(id)
        .cloned()
        .ok_or_else(|| "field missing after script".to_string())?;
    let digits = store.digits(id).unwrap_or_default();
    Ok(CaseOutcome {
        state,
        digits,
        transcript,
    })
}

/// Compare an outcome with the case's expectations.
pub fn check_case(case: &EditCase, outcome: &CaseOutcome) -> Result<(), String> {
    let mut problems = Vec::new();

    if outcome.state.value != case.expect_value {
        problems.push(format!(
            "value: expected \"{}\", actual \"{}\"",
            escape_text(&case.expect_value),
            escape_text(&outcome.state.value)
        ));
    }
    if outcome.state.caret() != case.expect_caret {
        problems.push(format!(
            "caret: expected {}, actual {}",
            case.expect_caret,
            outcome.state.caret()
        ));
    }
    match &case.expect_digits {
        Some(digits) if *digits != outcome.digits => problems.push(format!(
            "digits: expected \"{digits}\", actual \"{}\"",
            outcome.digits
        )),
        _ => {}
    }
    if let Some(expected) = &case.expect_transcript {
        let diff = diff_lines(expected, &outcome.transcript);
        if !diff.is_empty() {
            problems.push(diff);
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(format!("case '{}':\n{}", case.id, problems.join("\n")))
    }
}
