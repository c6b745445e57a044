use clap::Parser;
use log::LevelFilter;
use mask_core::{
    ConfigError, EditorState, FieldId, MaskRegistry, MaskedEditor, MaskedInputStore, ScriptError,
    byte_offset, parse_line, run_command,
};
use mimalloc::MiMalloc;
use serde::Serialize;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::fmt;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const FIELD: FieldId = FieldId::new(1);

#[derive(Parser)]
#[command(name = "maskpad")]
#[command(about = "Drive a masked phone number field with an edit script", long_about = None)]
#[command(version)]
struct Cli {
    /// Mask to edit with; defaults to the registry default.
    #[arg(long)]
    mask: Option<String>,

    /// TOML file with extra `[[mask]]` entries.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stored number to seed the field with.
    #[arg(long, default_value = "")]
    initial: String,

    /// Print one JSON object per command instead of the caret view.
    #[arg(long)]
    json: bool,

    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Script file; reads commands from stdin when omitted.
    script: Option<PathBuf>,
}

#[derive(Debug)]
enum AppError {
    Io { path: Option<PathBuf>, source: io::Error },
    Config(ConfigError),
    UnknownMask { name: String, known: Vec<String> },
    Script(ScriptError),
    Json(serde_json::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Io { path: Some(path), source } => {
                write!(f, "{}: {source}", path.display())
            }
            AppError::Io { path: None, source } => write!(f, "i/o error: {source}"),
            AppError::Config(err) => write!(f, "invalid mask config: {err}"),
            AppError::UnknownMask { name, known } => {
                write!(f, "unknown mask '{name}' (known: {})", known.join(", "))
            }
            AppError::Script(err) => write!(f, "{err}"),
            AppError::Json(err) => write!(f, "failed to encode state as JSON: {err}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Io { source, .. } => Some(source),
            AppError::Config(err) => Some(err),
            AppError::Script(err) => Some(err),
            AppError::Json(err) => Some(err),
            AppError::UnknownMask { .. } => None,
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Config(err)
    }
}

impl From<ScriptError> for AppError {
    fn from(err: ScriptError) -> Self {
        AppError::Script(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Json(err)
    }
}

impl From<io::Error> for AppError {
    fn from(source: io::Error) -> Self {
        AppError::Io { path: None, source }
    }
}

#[derive(Serialize)]
struct Snapshot<'a> {
    line: usize,
    value: &'a str,
    caret: usize,
    selection_end: usize,
    digits: String,
    complete: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(&cli) {
        log::error!("{err}");
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if let Err(err) = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("warning: logging disabled: {err}");
    }
}

fn load_registry(path: Option<&PathBuf>) -> Result<MaskRegistry, AppError> {
    let Some(path) = path else {
        return Ok(MaskRegistry::builtin());
    };
    let src = fs::read_to_string(path).map_err(|source| AppError::Io {
        path: Some(path.clone()),
        source,
    })?;
    Ok(MaskRegistry::from_toml_str(&src)?)
}

fn pick_editor(registry: &MaskRegistry, name: Option<&str>) -> Result<MaskedEditor, AppError> {
    let name = name.unwrap_or(registry.default_name());
    let template = registry.get(name).ok_or_else(|| AppError::UnknownMask {
        name: name.to_string(),
        known: registry.names().map(str::to_string).collect(),
    })?;
    log::debug!("editing with mask '{name}' ({} slots)", template.slot_count());
    Ok(MaskedEditor::new(template.clone()))
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let registry = load_registry(cli.config.as_ref())?;
    let editor = pick_editor(&registry, cli.mask.as_deref())?;
    let mut store = MaskedInputStore::new(editor);
    store.ensure_initial(FIELD, &cli.initial);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_state(&mut out, &store, 0, cli.json)?;

    match &cli.script {
        Some(path) => {
            let src = fs::read_to_string(path).map_err(|source| AppError::Io {
                path: Some(path.clone()),
                source,
            })?;
            for (idx, line) in src.lines().enumerate() {
                // Script files stop at the first bad line.
                if let Some(cmd) = parse_line(idx + 1, line)? {
                    run_command(&mut store, FIELD, &cmd);
                    print_state(&mut out, &store, idx + 1, cli.json)?;
                }
            }
        }
        None => {
            for (idx, line) in io::stdin().lock().lines().enumerate() {
                let line = line?;
                match parse_line(idx + 1, &line) {
                    Ok(Some(cmd)) => {
                        run_command(&mut store, FIELD, &cmd);
                        print_state(&mut out, &store, idx + 1, cli.json)?;
                    }
                    Ok(None) => {}
                    Err(err) => log::warn!("{err}"),
                }
            }
        }
    }

    match store.editor().validate(&current(&store)) {
        Ok(digits) => log::info!("complete number: {digits}"),
        Err(err) => log::info!("{err}"),
    }
    Ok(())
}

/// Field state with the host selection, which the editor state keeps collapsed.
fn current(store: &MaskedInputStore) -> EditorState {
    let state = store
        .state(FIELD)
        .cloned()
        .unwrap_or_else(|| store.editor().empty_state());
    match store.selection(FIELD) {
        Some(selection) => state.with_selection(selection),
        None => state,
    }
}

fn print_state(
    out: &mut impl Write,
    store: &MaskedInputStore,
    line: usize,
    json: bool,
) -> Result<(), AppError> {
    let state = current(store);
    if json {
        let snapshot = Snapshot {
            line,
            value: &state.value,
            caret: state.selection.start,
            selection_end: state.selection.end,
            digits: state.digits(),
            complete: store.editor().is_complete(&state),
        };
        let encoded = serde_json::to_string(&snapshot)?;
        writeln!(out, "{encoded}")?;
    } else {
        writeln!(out, "{}", caret_view(&state))?;
    }
    Ok(())
}

/// `[value]` with `|` at a collapsed caret, or the selection bracketed by `{}`.
fn caret_view(state: &EditorState) -> String {
    let sel = state.selection;
    let start = byte_offset(&state.value, sel.start);
    let end = byte_offset(&state.value, sel.end);
    let (head, rest) = state.value.split_at(start);
    let (mid, tail) = rest.split_at(end - start);
    if sel.is_empty() {
        format!("[{head}|{tail}]")
    } else {
        format!("[{head}{{{mid}}}{tail}]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mask_core::SelectionRange;

    #[test]
    fn caret_view_marks_caret_and_selection() {
        let editor = MaskedEditor::us_phone();
        let state = editor.state_for("555");
        assert_eq!(caret_view(&state), "[(555) |   -     ]");

        let selected = state.with_selection(SelectionRange::new(1, 4));
        assert_eq!(caret_view(&selected), "[({555})    -     ]");
    }

    #[test]
    fn unknown_mask_lists_known_names() {
        let registry = MaskRegistry::builtin();
        match pick_editor(&registry, Some("fax")) {
            Err(AppError::UnknownMask { name, known }) => {
                assert_eq!(name, "fax");
                assert_eq!(known, vec!["us_phone".to_string()]);
            }
            other => panic!("expected UnknownMask, got {:?}", other.err()),
        }
    }

    #[test]
    fn json_errors_are_reported_as_json() {
        use std::error::Error as _;

        let source = match serde_json::from_str::<serde_json::Value>("{") {
            Err(err) => err,
            Ok(value) => panic!("expected a JSON error, got {value}"),
        };
        let err = AppError::from(source);
        assert!(matches!(err, AppError::Json(_)));
        assert!(err.to_string().starts_with("failed to encode state as JSON: "));
        assert!(err.source().is_some());
    }

    #[test]
    fn default_mask_is_us_phone() {
        let editor = pick_editor(&MaskRegistry::builtin(), None).unwrap();
        assert_eq!(editor.template().blank(), "(   )    -     ");
    }
}
