//! Standings parser.
//!
//! Each round block carries its ranked statistics beside the games, in
//! columns F..N, one team per row starting two rows below the round header:
//!
//! | F | G | H | I | J | K | L | M | N |
//! |---|---|---|---|---|---|---|---|---|
//! | team | games | wins | losses | draws | points | ref points | total | rank |
//!
//! This layout is maintained by hand in the workbook and is treated as a
//! fixed external schema.

use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::{debug, info, warn};

use leaguesheet_core::{
    column_letter, CellRef, CellValue, Division, Round, SheetRange, SheetSource, StandingsRow,
};

use crate::notation::{is_round_header, RoundHeader};
use crate::{ExtractError, SUBHEADER_MARKER};

/// Column F
pub const STATS_FIRST_COLUMN: u32 = 5;
/// Column N
pub const STATS_LAST_COLUMN: u32 = 13;
/// Header row plus subheader row
const ROWS_BELOW_HEADER: u32 = 2;

static EMPTY: CellValue = CellValue::Empty;

/// Where the round for the report date sits in column A
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundLocation {
    /// 0-based row index of the header
    pub header_index: usize,
    pub round: Round,
}

/// Standings of the round matching the report date
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundStandings {
    pub round: Round,
    pub rows: Vec<StandingsRow>,
}

/// Find the first header in column A dated `target`
pub fn locate_round(column: &[String], target: NaiveDate) -> Option<RoundLocation> {
    column
        .iter()
        .enumerate()
        .filter(|(_, value)| !value.trim().is_empty())
        .find_map(|(header_index, value)| {
            let round = RoundHeader::parse(value)?.round_in(target.year())?;
            (round.date == target).then_some(RoundLocation {
                header_index,
                round,
            })
        })
}

/// Rows in one round block, as counted in column A
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TeamCount {
    /// The first block is closed by the next round header
    Exact(usize),
    /// Column A ended first. Trailing blank filler rows are not returned by
    /// the source, so the block may hold more teams than counted.
    AtLeast(usize),
}

/// Rows in one round block, counted below the first round header.
///
/// Every block has one row per team (game rows plus blank filler rows), so
/// the first block's size holds for all rounds. Rows above the first header,
/// such as a sheet title, are not part of any block.
pub fn count_teams(column: &[String]) -> TeamCount {
    let mut in_block = false;
    let mut teams = 0;
    for value in column {
        let header = is_round_header(value);
        if header || value.trim() == SUBHEADER_MARKER {
            if teams > 0 {
                return TeamCount::Exact(teams);
            }
            in_block |= header;
            continue;
        }
        if in_block {
            teams += 1;
        }
    }
    TeamCount::AtLeast(teams)
}

/// Statistics block for the round whose header is at `header_index`.
///
/// An open count reads to the bottom of the sheet.
pub fn statistics_range(sheet: &str, header_index: usize, teams: TeamCount) -> SheetRange {
    let first_row = header_index as u32 + 1 + ROWS_BELOW_HEADER;
    let last = match teams {
        TeamCount::Exact(n) => {
            CellRef::cell(STATS_LAST_COLUMN, first_row + (n as u32).saturating_sub(1))
        }
        TeamCount::AtLeast(_) => CellRef::column(STATS_LAST_COLUMN),
    };
    SheetRange::new(sheet, CellRef::cell(STATS_FIRST_COLUMN, first_row), Some(last))
}

/// Leading rows of an open-ended block that name a team
fn team_rows(mut block: Vec<Vec<CellValue>>) -> Vec<Vec<CellValue>> {
    if let Some(end) = block
        .iter()
        .position(|row| row.first().map_or(true, CellValue::is_empty))
    {
        block.truncate(end);
    }
    block
}

/// Convert a statistics block into standings rows.
///
/// `first_row` is the sheet row of the block's first line, for error
/// reporting. Rows with an empty team cell are skipped.
pub fn rows_from_values(
    block: &[Vec<CellValue>],
    first_row: u32,
) -> Result<Vec<StandingsRow>, ExtractError> {
    let mut standings = Vec::with_capacity(block.len());

    for (offset, values) in block.iter().enumerate() {
        let sheet_row = first_row + offset as u32;
        let cell = StatCells {
            values,
            sheet_row,
        };

        let team = cell.get(0).to_string().trim().to_string();
        if team.is_empty() {
            debug!(row = sheet_row, "skipping standings row without team");
            continue;
        }

        standings.push(StandingsRow {
            team,
            games_played: cell.integer(1)?,
            wins: cell.integer(2)?,
            losses: cell.integer(3)?,
            draws: cell.integer(4)?,
            game_points: cell.integer(5)?,
            referee_points: cell.decimal(6)?,
            total_points: cell.decimal(7)?,
            rank: cell.integer(8)?,
        });
    }

    Ok(standings)
}

/// One statistics row with its sheet position
struct StatCells<'a> {
    values: &'a [CellValue],
    sheet_row: u32,
}

impl StatCells<'_> {
    fn get(&self, idx: usize) -> &CellValue {
        self.values.get(idx).unwrap_or(&EMPTY)
    }

    fn invalid(&self, idx: usize) -> ExtractError {
        ExtractError::InvalidCell {
            row: self.sheet_row,
            column: column_letter(STATS_FIRST_COLUMN + idx as u32),
            value: self.get(idx).to_string(),
        }
    }

    fn integer(&self, idx: usize) -> Result<u32, ExtractError> {
        let value = self.get(idx);
        if value.is_empty() {
            return Ok(0);
        }
        match value.as_number() {
            Some(n) if n >= 0.0 && n.fract() == 0.0 && n <= f64::from(u32::MAX) => Ok(n as u32),
            _ => Err(self.invalid(idx)),
        }
    }

    fn decimal(&self, idx: usize) -> Result<Decimal, ExtractError> {
        let parsed = match self.get(idx) {
            CellValue::Empty => Some(Decimal::ZERO),
            CellValue::Number(n) => Decimal::from_f64(*n),
            CellValue::Text(s) if s.trim().is_empty() => Some(Decimal::ZERO),
            CellValue::Text(s) => Decimal::from_str(s.trim()).ok(),
            CellValue::Bool(_) => None,
        };
        parsed.ok_or_else(|| self.invalid(idx))
    }
}

/// Reads a division's standings through a [`SheetSource`]
pub struct StandingsExtractor<S> {
    source: S,
    date: NaiveDate,
}

impl<S: SheetSource> StandingsExtractor<S> {
    pub fn new(source: S, date: NaiveDate) -> Self {
        Self { source, date }
    }

    /// Column A from the first row down
    pub fn column_range(division: &Division) -> SheetRange {
        SheetRange::new(
            division.name.trim(),
            CellRef::cell(0, 1),
            Some(CellRef::column(0)),
        )
    }

    pub fn extract(&self, division: &Division) -> Result<RoundStandings, ExtractError> {
        let sheet = division.name.trim();
        let column: Vec<String> = self
            .source
            .values(&Self::column_range(division))?
            .into_iter()
            .map(|row| row.first().map(ToString::to_string).unwrap_or_default())
            .collect();

        let location =
            locate_round(&column, self.date).ok_or_else(|| ExtractError::RoundNotFound {
                sheet: sheet.to_string(),
                date: self.date,
            })?;
        let teams = count_teams(&column);
        debug!(
            division = %division,
            header_row = location.header_index + 1,
            round = location.round.number,
            teams = ?teams,
            "located standings block"
        );

        let range = statistics_range(sheet, location.header_index, teams);
        let mut block = self.source.values(&range)?;
        if matches!(teams, TeamCount::AtLeast(_)) {
            block = team_rows(block);
        }
        let rows = rows_from_values(&block, range.first_row())?;
        if rows.is_empty() {
            warn!(division = %division, range = %range, "no team rows found");
        }
        info!(division = %division, range = %range, teams = rows.len(), "extracted standings");

        Ok(RoundStandings {
            round: location.round,
            rows,
        })
    }
}
