//! Shell startup-file editing and export-statement rendering.
//!
//! Pure text transformations; callers own reading and writing the file.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::error::ValidationError;

/// Trailing comment appended to every directive this tool writes.
pub const DIRECTIVE_MARKER: &str = "# envmanager";

/// Names a POSIX shell accepts on the left of `export NAME=`.
pub static SHELL_IDENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid regex")
});

/// Statement syntax used when printing variables for a calling shell to `eval`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportSyntax {
    /// `export KEY='value'`
    Posix,
    /// `$env:KEY = 'value'`
    PowerShell,
}

/// Validates that `key` can appear in an `export` directive.
///
/// # Errors
///
/// Returns an error if `key` is not a POSIX shell identifier.
pub fn validate_shell_key(key: &str) -> Result<(), ValidationError> {
    if SHELL_IDENT_RE.is_match(key) {
        Ok(())
    } else {
        Err(ValidationError::NotShellIdentifier(key.to_string()))
    }
}

/// Single-quote `value` for a POSIX shell.
#[must_use]
pub fn quote_posix(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

fn quote_powershell(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Render one statement that sets `key` in the calling shell.
#[must_use]
pub fn export_line(syntax: ExportSyntax, key: &str, value: &str) -> String {
    match syntax {
        ExportSyntax::Posix => format!("export {key}={}", quote_posix(value)),
        ExportSyntax::PowerShell => format!("$env:{key} = {}", quote_powershell(value)),
    }
}

/// The directive written into a startup file for `key`.
#[must_use]
pub fn directive(key: &str, value: &str) -> String {
    format!(
        "{}  {DIRECTIVE_MARKER}",
        export_line(ExportSyntax::Posix, key, value)
    )
}

/// Whether `line` is an `export KEY=...` statement for exactly `key`.
#[must_use]
pub fn is_export_for(line: &str, key: &str) -> bool {
    let Some(rest) = line.trim_start().strip_prefix("export") else {
        return false;
    };
    if !rest.starts_with([' ', '\t']) {
        return false;
    }
    rest.trim_start()
        .strip_prefix(key)
        .is_some_and(|tail| tail.starts_with('='))
}

/// Split one `split_inclusive('\n')` segment into its text and line ending.
fn split_ending(segment: &str) -> (&str, &str) {
    if let Some(text) = segment.strip_suffix("\r\n") {
        (text, "\r\n")
    } else if let Some(text) = segment.strip_suffix('\n') {
        (text, "\n")
    } else {
        (segment, "")
    }
}

/// The newline style of `content`: CRLF when any line uses it.
fn newline_of(content: &str) -> &'static str {
    if content.contains("\r\n") { "\r\n" } else { "\n" }
}

/// Ensure exactly one directive for `key` exists in `content`, holding `value`.
///
/// The first existing directive is replaced in place and later duplicates are
/// dropped. Without a prior directive, one is appended using the file's
/// newline style. Every other line is kept byte for byte.
#[must_use]
pub fn upsert_export(content: &str, key: &str, value: &str) -> String {
    let mut out = String::with_capacity(content.len() + 64);
    let mut replaced = false;
    for segment in content.split_inclusive('\n') {
        let (line, ending) = split_ending(segment);
        if is_export_for(line, key) {
            if !replaced {
                out.push_str(&directive(key, value));
                out.push_str(ending);
                replaced = true;
            }
        } else {
            out.push_str(segment);
        }
    }
    if !replaced {
        let newline = newline_of(content);
        if !out.is_empty() && !out.ends_with('\n') {
            out.push_str(newline);
        }
        out.push_str(&directive(key, value));
        out.push_str(newline);
    }
    out
}

/// Remove every directive for `key`. Returns the new content and whether
/// anything was removed. Other lines keep their exact bytes.
#[must_use]
pub fn remove_export(content: &str, key: &str) -> (String, bool) {
    let mut removed = false;
    let mut out = String::with_capacity(content.len());
    for segment in content.split_inclusive('\n') {
        if is_export_for(split_ending(segment).0, key) {
            removed = true;
        } else {
            out.push_str(segment);
        }
    }
    if removed { (out, true) } else { (content.to_string(), false) }
}

/// Count directives for `key` in `content`.
#[must_use]
pub fn count_exports(content: &str, key: &str) -> usize {
    content.lines().filter(|l| is_export_for(l, key)).count()
}
