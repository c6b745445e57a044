//! Line-oriented edit scripts.
//!
//! Scripts describe key-level input for a single masked field, one command
//! per line. Blank lines and lines starting with `#` are ignored.
//!
//! ```text
//! type 555          # one change event per character
//! paste "123-4567"  # one change event for the whole text
//! left 3
//! backspace
//! raw "(555) 1"     # the control reports this full text
//! ```

use crate::id::FieldId;
use crate::traits::MaskedFieldStore;
use std::fmt;

/// Largest repeat count a `backspace`, `delete` or arrow command accepts.
pub const MAX_REPEAT: usize = 1024;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScriptCommand {
    /// Type each character as its own change event.
    Type(String),
    /// Insert the whole text in one change event.
    Paste(String),
    /// The control reports this full text.
    Raw(String),
    Backspace(usize),
    Delete(usize),
    Left { count: usize, selecting: bool },
    Right { count: usize, selecting: bool },
    Home,
    End,
    SelectAll,
    Caret(usize),
    Select(usize, usize),
    /// Seed the field from a stored number.
    Load(String),
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    UnknownCommand { line: usize, command: String },
    MissingArgument { line: usize, command: &'static str },
    InvalidNumber { line: usize, value: String },
    UnterminatedQuote { line: usize },
    TrailingInput { line: usize, rest: String },
    CountTooLarge { line: usize, count: usize },
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::UnknownCommand { line, command } => {
                write!(f, "line {line}: unknown command '{command}'")
            }
            ScriptError::MissingArgument { line, command } => {
                write!(f, "line {line}: '{command}' needs an argument")
            }
            ScriptError::InvalidNumber { line, value } => {
                write!(f, "line {line}: invalid number '{value}'")
            }
            ScriptError::UnterminatedQuote { line } => {
                write!(f, "line {line}: unterminated quoted string")
            }
            ScriptError::TrailingInput { line, rest } => {
                write!(f, "line {line}: unexpected trailing input '{rest}'")
            }
            ScriptError::CountTooLarge { line, count } => {
                write!(f, "line {line}: repeat count {count} exceeds {MAX_REPEAT}")
            }
        }
    }
}

impl std::error::Error for ScriptError {}

/// Parse one script line. Returns `Ok(None)` for blank and comment lines.
pub fn parse_line(line: usize, src: &str) -> Result<Option<ScriptCommand>, ScriptError> {
    let src = src.trim();
    if src.is_empty() || src.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = match src.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (src, ""),
    };

    let cmd = match word {
        "type" => ScriptCommand::Type(text_arg(line, "type", rest, false)?),
        "paste" => ScriptCommand::Paste(text_arg(line, "paste", rest, false)?),
        "raw" => ScriptCommand::Raw(text_arg(line, "raw", rest, true)?),
        "load" => ScriptCommand::Load(text_arg(line, "load", rest, true)?),
        "backspace" => ScriptCommand::Backspace(count_arg(line, rest)?),
        "delete" => ScriptCommand::Delete(count_arg(line, rest)?),
        "left" => ScriptCommand::Left {
            count: count_arg(line, rest)?,
            selecting: false,
        },
        "right" => ScriptCommand::Right {
            count: count_arg(line, rest)?,
            selecting: false,
        },
        "shift-left" => ScriptCommand::Left {
            count: count_arg(line, rest)?,
            selecting: true,
        },
        "shift-right" => ScriptCommand::Right {
            count: count_arg(line, rest)?,
            selecting: true,
        },
        "home" => no_arg(line, rest, ScriptCommand::Home)?,
        "end" => no_arg(line, rest, ScriptCommand::End)?,
        "select-all" => no_arg(line, rest, ScriptCommand::SelectAll)?,
        "reset" => no_arg(line, rest, ScriptCommand::Reset)?,
        "caret" => {
            let mut args = rest.split_whitespace();
            let pos = number(line, args.next(), "caret")?;
            trailing(line, args)?;
            ScriptCommand::Caret(pos)
        }
        "select" => {
            let mut args = rest.split_whitespace();
            let a = number(line, args.next(), "select")?;
            let b = number(line, args.next(), "select")?;
            trailing(line, args)?;
            ScriptCommand::Select(a, b)
        }
        other => {
            return Err(ScriptError::UnknownCommand {
                line,
                command: other.to_string(),
            });
        }
    };
    Ok(Some(cmd))
}

/// Parse a whole script; line numbers start at 1.
pub fn parse_script(src: &str) -> Result<Vec<ScriptCommand>, ScriptError> {
    let mut out = Vec::new();
    for (idx, line) in src.lines().enumerate() {
        if let Some(cmd) = parse_line(idx + 1, line)? {
            out.push(cmd);
        }
    }
    Ok(out)
}

/// Apply one command to field `id`.
pub fn run_command(store: &mut impl MaskedFieldStore, id: FieldId, cmd: &ScriptCommand) {
    match cmd {
        ScriptCommand::Type(text) => {
            let mut buf = [0u8; 4];
            for ch in text.chars() {
                store.insert_text(id, ch.encode_utf8(&mut buf));
            }
        }
        ScriptCommand::Paste(text) => store.insert_text(id, text),
        ScriptCommand::Raw(text) => store.apply_change(id, text),
        ScriptCommand::Backspace(n) => (0..*n).for_each(|_| store.backspace(id)),
        ScriptCommand::Delete(n) => (0..*n).for_each(|_| store.delete(id)),
        ScriptCommand::Left { count, selecting } => {
            (0..*count).for_each(|_| store.move_caret_left(id, *selecting))
        }
        ScriptCommand::Right { count, selecting } => {
            (0..*count).for_each(|_| store.move_caret_right(id, *selecting))
        }
        ScriptCommand::Home => store.move_caret_to_start(id, false),
        ScriptCommand::End => store.move_caret_to_end(id, false),
        ScriptCommand::SelectAll => store.select_all(id),
        ScriptCommand::Caret(pos) => store.set_caret(id, *pos, false),
        ScriptCommand::Select(a, b) => {
            store.set_caret(id, *a, false);
            store.set_caret(id, *b, true);
        }
        ScriptCommand::Load(stored) => store.set(id, stored),
        ScriptCommand::Reset => store.reset(id),
    }
}

pub fn run_script(store: &mut impl MaskedFieldStore, id: FieldId, cmds: &[ScriptCommand]) {
    for cmd in cmds {
        run_command(store, id, cmd);
    }
}

// --- Argument parsing ---

fn text_arg(
    line: usize,
    command: &'static str,
    rest: &str,
    allow_empty: bool,
) -> Result<String, ScriptError> {
    if let Some(quoted) = rest.strip_prefix('"') {
        let (text, after) = unquote(line, quoted)?;
        if !after.trim().is_empty() && !after.trim_start().starts_with('#') {
            return Err(ScriptError::TrailingInput {
                line,
                rest: after.trim().to_string(),
            });
        }
        if text.is_empty() && !allow_empty {
            return Err(ScriptError::MissingArgument { line, command });
        }
        return Ok(text);
    }

    // Unquoted text runs to the end of the line; `#` starts a comment.
    let text = rest.split('#').next().unwrap_or("").trim_end();
    if text.is_empty() && !allow_empty {
        return Err(ScriptError::MissingArgument { line, command });
    }
    Ok(text.to_string())
}

/// Split `"text" tail` (opening quote already stripped) into text and tail.
fn unquote(line: usize, s: &str) -> Result<(String, &str), ScriptError> {
    let mut out = String::new();
    let mut chars = s.char_indices();
    while let Some((idx, ch)) = chars.next() {
        match ch {
            '"' => return Ok((out, &s[idx + 1..])),
            '\\' => match chars.next() {
                Some((_, 'n')) => out.push('\n'),
                Some((_, 'r')) => out.push('\r'),
                Some((_, 't')) => out.push('\t'),
                Some((_, other)) => out.push(other),
                None => break,
            },
            _ => out.push(ch),
        }
    }
    Err(ScriptError::UnterminatedQuote { line })
}

fn count_arg(line: usize, rest: &str) -> Result<usize, ScriptError> {
    let mut args = rest.split_whitespace().take_while(|w| !w.starts_with('#'));
    let count = match args.next() {
        Some(raw) => parse_number(line, raw)?,
        None => 1,
    };
    if count > MAX_REPEAT {
        return Err(ScriptError::CountTooLarge { line, count });
    }
    trailing(line, args)?;
    Ok(count)
}

fn number(line: usize, arg: Option<&str>, command: &'static str) -> Result<usize, ScriptError> {
    match arg {
        Some(raw) if !raw.starts_with('#') => parse_number(line, raw),
        _ => Err(ScriptError::MissingArgument { line, command }),
    }
}

fn parse_number(line: usize, raw: &str) -> Result<usize, ScriptError> {
    raw.parse().map_err(|_| ScriptError::InvalidNumber {
        line,
        value: raw.to_string(),
    })
}

fn no_arg(line: usize, rest: &str, cmd: ScriptCommand) -> Result<ScriptCommand, ScriptError> {
    trailing(line, rest.split_whitespace())?;
    Ok(cmd)
}

fn trailing<'a>(line: usize, mut args: impl Iterator<Item = &'a str>) -> Result<(), ScriptError> {
    match args.next() {
        Some(word) if !word.starts_with('#') => Err(ScriptError::TrailingInput {
            line,
            rest: word.to_string(),
        }),
        _ => Ok(()),
    }
}
