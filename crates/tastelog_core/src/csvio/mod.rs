//! Generic delimited-text helpers with best-effort numeric coercion.
//!
//! # Responsibility
//! - Read comma-delimited files into in-memory rows of cells.
//! - Write rows back out as UTF-8 with a byte-order marker.
//! - Coerce numeric-looking cells to numbers, by position, in place.
//!
//! # Invariants
//! - Cells that fail numeric coercion are left untouched.
//! - Coercion visits every cell positionally; duplicate values within one
//!   row are coerced independently.
//! - This module is independent of the rating storage layers.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::str::Utf8Error;

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Digits grouped in threes by commas, e.g. `1,000` or `-12,345.67`.
static GROUPED_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d{1,3}(,\d{3})+(\.\d+)?$").expect("valid grouped number regex"));

pub type CsvResult<T> = Result<T, CsvError>;

/// Error for delimited-file reading, decoding and writing.
#[derive(Debug)]
pub enum CsvError {
    /// File could not be opened, read or written.
    Io(std::io::Error),
    /// File bytes are not valid UTF-8.
    Decode(Utf8Error),
    /// Delimited structure could not be parsed.
    Malformed(csv::Error),
}

impl Display for CsvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Decode(err) => write!(f, "file is not valid UTF-8: {err}"),
            Self::Malformed(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CsvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Decode(err) => Some(err),
            Self::Malformed(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for CsvError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<Utf8Error> for CsvError {
    fn from(value: Utf8Error) -> Self {
        Self::Decode(value)
    }
}

impl From<csv::Error> for CsvError {
    fn from(value: csv::Error) -> Self {
        Self::Malformed(value)
    }
}

/// One delimited cell, either raw text or a coerced number.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
}

impl Cell {
    /// Creates a text cell.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Returns the numeric value when this cell has been coerced.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(_) => None,
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(value) => f.write_str(value),
            Self::Number(value) => write!(f, "{value}"),
        }
    }
}

/// Reads a comma-delimited UTF-8 file into rows of text cells.
///
/// A leading byte-order marker is tolerated and stripped. Rows may have
/// differing lengths; no header convention is applied.
pub fn read_rows(path: impl AsRef<Path>) -> CsvResult<Vec<Vec<Cell>>> {
    let bytes = fs::read(path)?;
    let content = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes);
    let text = std::str::from_utf8(content)?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(Cell::text).collect());
    }

    Ok(rows)
}

/// Writes rows comma-delimited to `path` as UTF-8 with a byte-order marker.
///
/// Overwrites any existing file.
pub fn write_rows(path: impl AsRef<Path>, rows: &[Vec<Cell>]) -> CsvResult<()> {
    let mut file = File::create(path)?;
    file.write_all(UTF8_BOM)?;

    let mut writer = csv::Writer::from_writer(file);
    for row in rows {
        writer.write_record(row.iter().map(Cell::to_string))?;
    }
    writer.flush()?;

    Ok(())
}

/// Attempts to convert every cell to a number, in place.
///
/// Well-formed thousands separators are removed before parsing. Cells that
/// do not parse as a decimal are left untouched. Iteration is positional,
/// so duplicate text values within a row are each coerced independently.
pub fn coerce_numeric(rows: &mut [Vec<Cell>]) {
    for row in rows.iter_mut() {
        for cell in row.iter_mut() {
            let parsed = match cell {
                Cell::Text(text) => parse_numeric_text(text),
                Cell::Number(_) => continue,
            };
            if let Some(value) = parsed {
                *cell = Cell::Number(value);
            }
        }
    }
}

fn parse_numeric_text(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if GROUPED_NUMBER_RE.is_match(trimmed) {
        trimmed.replace(',', "").parse().ok()
    } else {
        trimmed.parse().ok()
    }
}
