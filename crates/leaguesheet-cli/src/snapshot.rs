//! Workbook snapshot: a JSON export of the league spreadsheet.
//!
//! ```json
//! {
//!   "spreadsheet_id": "1AbC",
//!   "sheets": {
//!     "12U Boys": [
//!       ["ROUND 6: 10/11"],
//!       ["HOME", "HG", "AG", "AWAY"],
//!       [{ "value": "Lions (Ortiz)", "foreground": { "red": 1.0 } }, 2, 1, "Tigers (Reed)"]
//!     ]
//!   }
//! }
//! ```
//!
//! Reads behave like the spreadsheet values API: the result is clipped to the
//! requested range, and trailing empty cells and rows are dropped.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use leaguesheet_core::{CellValue, RowData, SheetRange, SheetSource, SourceError};

#[derive(Debug, Default, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub spreadsheet_id: Option<String>,
    pub sheets: BTreeMap<String, Vec<RowData>>,
}

/// [`SheetSource`] over a loaded snapshot
#[derive(Debug, Default)]
pub struct SnapshotSource {
    snapshot: Snapshot,
}

impl SnapshotSource {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let text = std::fs::read_to_string(path)?;
        let source = Self::from_json(&text)?;
        debug!(
            path = %path.display(),
            sheets = source.snapshot.sheets.len(),
            "loaded workbook snapshot"
        );
        Ok(source)
    }

    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        serde_json::from_str(json)
            .map(Self::new)
            .map_err(|e| SourceError::Format(e.to_string()))
    }

    pub fn spreadsheet_id(&self) -> Option<&str> {
        self.snapshot.spreadsheet_id.as_deref()
    }

    /// Sheet names match exactly, then ignoring ASCII case
    fn sheet(&self, name: &str) -> Result<&[RowData], SourceError> {
        let sheets = &self.snapshot.sheets;
        sheets
            .get(name)
            .or_else(|| {
                sheets
                    .iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(name))
                    .map(|(_, rows)| rows)
            })
            .map(Vec::as_slice)
            .ok_or_else(|| SourceError::SheetNotFound(name.to_string()))
    }
}

/// Cut `rows` down to `range`, dropping trailing empties
fn clip(rows: &[RowData], range: &SheetRange) -> Result<Vec<RowData>, SourceError> {
    let first_row = range.first_row() as usize;
    let first_column = range.first_column() as usize;
    if let Some(last) = range.last_row() {
        if (last as usize) < first_row {
            return Err(SourceError::InvalidRange(range.to_string()));
        }
    }
    if let Some(last) = range.last_column() {
        if (last as usize) < first_column {
            return Err(SourceError::InvalidRange(range.to_string()));
        }
    }

    let row_end = range
        .last_row()
        .map_or(rows.len(), |last| (last as usize).min(rows.len()));
    let row_start = first_row.saturating_sub(1).min(row_end);

    let mut clipped: Vec<RowData> = rows[row_start..row_end]
        .iter()
        .map(|row| {
            let end = range
                .last_column()
                .map_or(row.len(), |last| (last as usize + 1).min(row.len()));
            let start = first_column.min(end);
            let mut cells = row[start..end].to_vec();
            while cells.last().is_some_and(|cell| cell.value.is_empty()) {
                cells.pop();
            }
            cells
        })
        .collect();

    while clipped.last().is_some_and(Vec::is_empty) {
        clipped.pop();
    }
    Ok(clipped)
}

impl SheetSource for SnapshotSource {
    fn row_data(&self, range: &SheetRange) -> Result<Vec<RowData>, SourceError> {
        clip(self.sheet(&range.sheet)?, range)
    }

    fn values(&self, range: &SheetRange) -> Result<Vec<Vec<CellValue>>, SourceError> {
        Ok(self
            .row_data(range)?
            .into_iter()
            .map(|row| row.into_iter().map(|cell| cell.value).collect())
            .collect())
    }
}
