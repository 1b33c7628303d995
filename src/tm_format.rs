/*!
 * Translation memory file codec.
 *
 * A TM file holds one row per line: `source→translation→context`. The
 * escape character `¶` protects a following separator, newline or another
 * `¶`, so multi-line dialogue survives as a single row. `\r\n` line endings
 * are accepted on read; files are always written with `\n`.
 */

use std::fs;
use std::path::Path;

use log::debug;

use crate::errors::TmFormatError;

/// Field separator
pub const SEPARATOR: char = '→';

/// Escape character
pub const ESCAPE: char = '¶';

/// One `source→translation→context` row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TmRow {
    pub source: String,
    pub translation: String,
    pub context: String,
}

impl TmRow {
    pub fn new(source: impl Into<String>, translation: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            translation: translation.into(),
            context: context.into(),
        }
    }

    fn from_fields(mut fields: Vec<String>) -> Self {
        fields.resize(3, String::new());
        let mut fields = fields.into_iter();
        Self {
            source: fields.next().unwrap_or_default(),
            translation: fields.next().unwrap_or_default(),
            context: fields.next().unwrap_or_default(),
        }
    }
}

/// Escape a field for writing
pub fn escape_field(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    for c in field.chars() {
        if matches!(c, ESCAPE | SEPARATOR | '\n') {
            out.push(ESCAPE);
        }
        out.push(c);
    }
    out
}

/// Parse TM text into rows
///
/// Fields past the third are ignored, missing ones are empty. Blank lines
/// produce no row.
pub fn parse_tm(text: &str) -> Vec<TmRow> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut rows = Vec::new();
    let mut fields = vec![String::new()];
    let mut escaped = false;
    // Used to drop the `\r` of `\r\n`
    let mut previous: Option<char> = None;

    for c in text.chars() {
        if escaped {
            push_char(&mut fields, c);
            escaped = false;
            previous = Some(c);
            continue;
        }

        match c {
            ESCAPE => {
                escaped = true;
                previous = Some(ESCAPE);
            }
            SEPARATOR => {
                fields.push(String::new());
                previous = None;
            }
            '\n' => {
                if previous == Some('\r') {
                    if let Some(field) = fields.last_mut() {
                        field.pop();
                    }
                }
                finish_row(&mut rows, std::mem::replace(&mut fields, vec![String::new()]));
                previous = None;
            }
            _ => {
                push_char(&mut fields, c);
                previous = Some(c);
            }
        }
    }
    finish_row(&mut rows, fields);

    rows
}

fn push_char(fields: &mut [String], c: char) {
    if let Some(field) = fields.last_mut() {
        field.push(c);
    }
}

fn finish_row(rows: &mut Vec<TmRow>, fields: Vec<String>) {
    if fields.iter().all(String::is_empty) {
        return;
    }
    rows.push(TmRow::from_fields(fields));
}

/// Format rows as TM text; rows with an empty source are skipped
pub fn format_tm(rows: &[TmRow]) -> String {
    let mut out = String::new();
    for row in rows.iter().filter(|r| !r.source.is_empty()) {
        out.push_str(&escape_field(&row.source));
        out.push(SEPARATOR);
        out.push_str(&escape_field(&row.translation));
        out.push(SEPARATOR);
        out.push_str(&escape_field(&row.context));
        out.push('\n');
    }
    out
}

/// Read a TM file; a missing file yields no rows
pub fn read_tm_file(path: &Path) -> Result<Vec<TmRow>, TmFormatError> {
    if !path.exists() {
        debug!("No translation memory at {}", path.display());
        return Ok(Vec::new());
    }
    let text = fs::read_to_string(path).map_err(|source| TmFormatError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let rows = parse_tm(&text);
    debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Write rows to a TM file, replacing it
pub fn write_tm_file(path: &Path, rows: &[TmRow]) -> Result<(), TmFormatError> {
    fs::write(path, format_tm(rows)).map_err(|source| TmFormatError::Io {
        path: path.display().to_string(),
        source,
    })
}
