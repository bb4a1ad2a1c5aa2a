//! Spreadsheet cells, ranges and the data-source capability.
//!
//! The league workbook is read through [`SheetSource`], which exposes the two
//! read operations the reports need:
//! - `row_data`: cell values together with their text colour
//! - `values`: plain values only
//!
//! Ranges are addressed in A1 notation, `'<sheet>'!<from>[:<to>]`.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ============================================================================
// Cell values
// ============================================================================

/// The effective value of a single cell
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// True for missing cells and for cells holding only whitespace
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Numeric reading of the cell; numeric text is accepted
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<u32> for CellValue {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

/// Text foreground colour, components in `0.0..=1.0`.
///
/// Components left out by the spreadsheet API are zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rgb {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const RED: Rgb = Rgb::new(1.0, 0.0, 0.0);

    pub const fn new(red: f32, green: f32, blue: f32) -> Self {
        Self { red, green, blue }
    }

    fn channel(value: f32) -> u8 {
        (value.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    /// 8-bit channels, as shown in the spreadsheet UI
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        (
            Self::channel(self.red),
            Self::channel(self.green),
            Self::channel(self.blue),
        )
    }

    /// Compare at 8-bit channel precision
    pub fn approx_eq(self, other: Rgb) -> bool {
        self.to_rgb8() == other.to_rgb8()
    }
}

/// A cell as returned by a row-data read
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "CellRepr")]
pub struct Cell {
    pub value: CellValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground: Option<Rgb>,
}

/// Accepts either a bare scalar or `{ "value": .., "foreground": {..} }`
#[derive(Deserialize)]
#[serde(untagged)]
enum CellRepr {
    Full {
        #[serde(default)]
        value: CellValue,
        #[serde(default)]
        foreground: Option<Rgb>,
    },
    Bare(CellValue),
}

impl From<CellRepr> for Cell {
    fn from(repr: CellRepr) -> Self {
        match repr {
            CellRepr::Full { value, foreground } => Self { value, foreground },
            CellRepr::Bare(value) => Self { value, foreground: None },
        }
    }
}

impl Cell {
    pub fn new(value: impl Into<CellValue>) -> Self {
        Self {
            value: value.into(),
            foreground: None,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Set the text colour
    pub fn colored(mut self, color: Rgb) -> Self {
        self.foreground = Some(color);
        self
    }
}

/// One spreadsheet row of formatted cells
pub type RowData = Vec<Cell>;

// ============================================================================
// A1 ranges
// ============================================================================

/// Convert a 0-based column index to letters (0 -> A, 25 -> Z, 26 -> AA)
pub fn column_letter(index: u32) -> String {
    let mut result = String::new();
    let mut n = index;
    loop {
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    result
}

/// One end of an A1 range. Either part may be open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellRef {
    /// 0-based column
    pub column: Option<u32>,
    /// 1-based row
    pub row: Option<u32>,
}

impl CellRef {
    pub const fn new(column: Option<u32>, row: Option<u32>) -> Self {
        Self { column, row }
    }

    pub const fn cell(column: u32, row: u32) -> Self {
        Self::new(Some(column), Some(row))
    }

    pub const fn column(column: u32) -> Self {
        Self::new(Some(column), None)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(column) = self.column {
            f.write_str(&column_letter(column))?;
        }
        if let Some(row) = self.row {
            write!(f, "{}", row)?;
        }
        Ok(())
    }
}

/// A rectangular range on a named sheet
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheetRange {
    pub sheet: String,
    pub start: CellRef,
    pub end: Option<CellRef>,
}

impl SheetRange {
    pub fn new(sheet: impl Into<String>, start: CellRef, end: Option<CellRef>) -> Self {
        Self {
            sheet: sheet.into(),
            start,
            end,
        }
    }

    /// Whole columns, e.g. `'Sheet'!A:D`
    pub fn columns(sheet: impl Into<String>, first: u32, last: u32) -> Self {
        Self::new(sheet, CellRef::column(first), Some(CellRef::column(last)))
    }

    /// Fixed rectangle, e.g. `'Sheet'!F3:N8`
    pub fn block(sheet: impl Into<String>, first: CellRef, last: CellRef) -> Self {
        Self::new(sheet, first, Some(last))
    }

    /// First row covered (1-based)
    pub fn first_row(&self) -> u32 {
        self.start.row.unwrap_or(1)
    }

    /// Last row covered, `None` when unbounded
    pub fn last_row(&self) -> Option<u32> {
        match self.end {
            Some(end) => end.row,
            None => self.start.row,
        }
    }

    /// First column covered (0-based)
    pub fn first_column(&self) -> u32 {
        self.start.column.unwrap_or(0)
    }

    /// Last column covered, `None` when unbounded
    pub fn last_column(&self) -> Option<u32> {
        match self.end {
            Some(end) => end.column,
            None => self.start.column,
        }
    }
}

impl fmt::Display for SheetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'!{}", self.sheet, self.start)?;
        if let Some(end) = self.end {
            write!(f, ":{}", end)?;
        }
        Ok(())
    }
}

// ============================================================================
// Source capability
// ============================================================================

/// Read access to the league workbook
pub trait SheetSource {
    /// Formatted row data: values plus text colour
    fn row_data(&self, range: &SheetRange) -> Result<Vec<RowData>, SourceError>;

    /// Plain values, row-major
    fn values(&self, range: &SheetRange) -> Result<Vec<Vec<CellValue>>, SourceError>;
}

impl<T: SheetSource + ?Sized> SheetSource for &T {
    fn row_data(&self, range: &SheetRange) -> Result<Vec<RowData>, SourceError> {
        (**self).row_data(range)
    }

    fn values(&self, range: &SheetRange) -> Result<Vec<Vec<CellValue>>, SourceError> {
        (**self).values(range)
    }
}

/// Data-source error
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Malformed source data: {0}")]
    Format(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn column_letter_boundaries() {
        assert_eq!(column_letter(0), "A");
        assert_eq!(column_letter(5), "F");
        assert_eq!(column_letter(13), "N");
        assert_eq!(column_letter(25), "Z");
        assert_eq!(column_letter(26), "AA");
        assert_eq!(column_letter(701), "ZZ");
    }

    #[test]
    fn range_display() {
        let range = SheetRange::columns("14U Girls", 0, 3);
        assert_eq!(range.to_string(), "'14U Girls'!A:D");

        let range = SheetRange::block("10U Boys", CellRef::cell(5, 3), CellRef::cell(13, 8));
        assert_eq!(range.to_string(), "'10U Boys'!F3:N8");

        let range = SheetRange::new("S", CellRef::cell(0, 1), Some(CellRef::column(0)));
        assert_eq!(range.to_string(), "'S'!A1:A");
    }

    #[test]
    fn range_bounds() {
        let range = SheetRange::new("S", CellRef::cell(0, 1), Some(CellRef::column(0)));
        assert_eq!(range.first_row(), 1);
        assert_eq!(range.last_row(), None);
        assert_eq!(range.first_column(), 0);
        assert_eq!(range.last_column(), Some(0));

        let single = SheetRange::new("S", CellRef::cell(2, 4), None);
        assert_eq!(single.last_row(), Some(4));
        assert_eq!(single.last_column(), Some(2));
    }

    #[test]
    fn empty_detection() {
        assert!(CellValue::Empty.is_empty());
        assert!(CellValue::text("  ").is_empty());
        assert!(!CellValue::Number(0.0).is_empty());
        assert!(!CellValue::text("HOME").is_empty());
    }

    #[test]
    fn numeric_text_is_a_number() {
        assert_eq!(CellValue::text(" 5.5 ").as_number(), Some(5.5));
        assert_eq!(CellValue::Number(3.0).as_number(), Some(3.0));
        assert_eq!(CellValue::text("Team 1").as_number(), None);
        assert_eq!(CellValue::Empty.as_number(), None);
    }

    #[test]
    fn colour_comparison_uses_8bit_channels() {
        assert!(Rgb::new(0.999, 0.001, 0.0).approx_eq(Rgb::RED));
        assert!(!Rgb::BLACK.approx_eq(Rgb::RED));
    }

    #[test]
    fn cells_deserialize_from_scalars_and_objects() {
        let row: RowData = serde_json::from_str(
            r#"["Team 1 (Smith)", 1, null, {"value": "Team 2", "foreground": {"red": 1.0}}, {}]"#,
        )
        .unwrap();

        assert_eq!(row[0], Cell::new("Team 1 (Smith)"));
        assert_eq!(row[1], Cell::new(1.0));
        assert_eq!(row[2], Cell::empty());
        assert_eq!(row[3], Cell::new("Team 2").colored(Rgb::RED));
        assert_eq!(row[4], Cell::empty());
    }
}
