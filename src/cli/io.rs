//! JSON and terminal I/O for the CLI
//!
//! - Input: a JSON document or JSON lines on stdin, UTF-8 only
//! - Output: one JSON object per line on stdout
//! - Logs never go to stdout

use std::io::{self, BufRead, Read, Write};

use serde_json::{json, Value};

use super::errors::{CliError, CliResult};
use crate::engine::Warning;

/// Read the whole of stdin as one JSON document
pub fn read_document() -> CliResult<Value> {
    let mut content = String::new();
    io::stdin().lock().read_to_string(&mut content)?;

    if content.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }

    let value: Value = serde_json::from_str(&content)?;
    Ok(value)
}

/// Read request lines from stdin (for the serve command). Blank lines are skipped.
pub fn read_requests() -> impl Iterator<Item = CliResult<String>> {
    let stdin = io::stdin();
    stdin
        .lock()
        .lines()
        .filter(|line| !matches!(line, Ok(l) if l.trim().is_empty()))
        .map(|line| line.map_err(CliError::from))
}

/// Print `prompt` and read one line of input. `None` at end of input.
pub fn prompt_line(prompt: &str) -> CliResult<Option<String>> {
    let mut stdout = io::stdout();
    write!(stdout, "{}", prompt)?;
    stdout.flush()?;

    let mut line = String::new();
    let read = io::stdin().lock().read_line(&mut line)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Success envelope
pub fn success_envelope(data: Value, warnings: &[Warning]) -> Value {
    json!({
        "status": "ok",
        "data": data,
        "warnings": warnings
    })
}

/// Error envelope
pub fn error_envelope(code: &str, message: &str) -> Value {
    json!({
        "status": "error",
        "code": code,
        "message": message
    })
}

/// Write a success response to stdout
pub fn write_response(data: Value, warnings: &[Warning]) -> CliResult<()> {
    write_json(&success_envelope(data, warnings))
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    write_json(&error_envelope(code, message))
}

/// Write one JSON value as a line on stdout
pub fn write_json(value: &Value) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

/// Write plain text to stdout
pub fn write_text(text: &str) -> CliResult<()> {
    let mut stdout = io::stdout();
    writeln!(stdout, "{}", text)?;
    stdout.flush()?;

    Ok(())
}
