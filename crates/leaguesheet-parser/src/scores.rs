//! Scores sheet parser.
//!
//! A division's scores sheet lists rounds one after another in columns A:D:
//!
//! ```text
//! ROUND 2: 9/13
//! HOME             | HG | AG | AWAY
//! Team 1 (Smith)   | 1  | 0  | Team 2 (Jones)
//! Team 3 (Chan)    |    |    | Team 4 (Kirilenko)     <- result unknown
//! <blank>                                             <- bye / placeholder
//! ROUND 3: 9/20
//! ...
//! ```
//!
//! Friendlies are marked by the home team's text colour.

use chrono::{Datelike, NaiveDate};
use tracing::{debug, info};

use leaguesheet_core::{
    CellValue, Division, GameScore, Rgb, Round, RowData, SheetRange, SheetSource,
};

use crate::notation::RoundHeader;
use crate::{ExtractError, SUBHEADER_MARKER};

const HOME_SCORE_COLUMN: usize = 1;
const AWAY_SCORE_COLUMN: usize = 2;
const AWAY_TEAM_COLUMN: usize = 3;

/// Games of the round matching the report date
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoundScores {
    /// The matched round, `None` if no header carries the report date
    pub round: Option<Round>,
    pub games: Vec<GameScore>,
}

/// Collect the games of the round dated `target`.
///
/// Scanning stops at the first round header that follows at least one
/// collected game, so at most one round is returned.
pub fn parse_round_scores(rows: &[RowData], target: NaiveDate, friendly_color: Rgb) -> RoundScores {
    let mut games = Vec::new();
    let mut current: Option<Round> = None;

    for (idx, row) in rows.iter().enumerate() {
        let Some(first) = row.first() else {
            continue;
        };
        let text = first.value.to_string();

        if let Some(header) = RoundHeader::parse(&text) {
            if !games.is_empty() {
                break;
            }
            current = header
                .round_in(target.year())
                .filter(|round| round.date == target);
            debug!(row = idx + 1, header = %text, matched = current.is_some(), "round header");
            continue;
        }

        let Some(round) = current else {
            continue; // earlier round
        };
        if text.trim() == SUBHEADER_MARKER || first.value.is_empty() {
            continue;
        }

        games.push(game_from_row(row, round, friendly_color));
    }

    RoundScores {
        round: current,
        games,
    }
}

fn game_from_row(row: &RowData, round: Round, friendly_color: Rgb) -> GameScore {
    let value = |idx: usize| row.get(idx).map(|cell| &cell.value);
    let blank = |idx: usize| value(idx).map_or(true, CellValue::is_empty);

    let home_score = value(HOME_SCORE_COLUMN).and_then(score_value);
    let away_score = value(AWAY_SCORE_COLUMN).and_then(score_value);
    let friendly = row[0]
        .foreground
        .is_some_and(|color| color.approx_eq(friendly_color));

    GameScore {
        round: round.number,
        date: round.date,
        home_team: row[0].value.to_string(),
        away_team: value(AWAY_TEAM_COLUMN).map(ToString::to_string).unwrap_or_default(),
        home_score,
        away_score,
        unknown: blank(HOME_SCORE_COLUMN) && blank(AWAY_SCORE_COLUMN),
        friendly,
    }
}

fn score_value(value: &CellValue) -> Option<u32> {
    value
        .as_number()
        .filter(|n| *n >= 0.0 && n.is_finite())
        .map(|n| n.round() as u32)
}

/// Reads a division's scores sheet through a [`SheetSource`]
pub struct ScoresExtractor<S> {
    source: S,
    date: NaiveDate,
    friendly_color: Rgb,
}

impl<S: SheetSource> ScoresExtractor<S> {
    pub fn new(source: S, date: NaiveDate) -> Self {
        Self {
            source,
            date,
            friendly_color: Rgb::RED,
        }
    }

    /// Text colour marking friendlies (red by default)
    pub fn friendly_color(mut self, color: Rgb) -> Self {
        self.friendly_color = color;
        self
    }

    /// Columns A:D of the division's sheet
    pub fn range(division: &Division) -> SheetRange {
        SheetRange::columns(division.name.trim(), 0, AWAY_TEAM_COLUMN as u32)
    }

    pub fn extract(&self, division: &Division) -> Result<RoundScores, ExtractError> {
        let range = Self::range(division);
        let rows = self.source.row_data(&range)?;
        let scores = parse_round_scores(&rows, self.date, self.friendly_color);

        match scores.round {
            Some(round) => info!(
                division = %division,
                round = round.number,
                games = scores.games.len(),
                "extracted scores"
            ),
            None => info!(division = %division, date = %self.date, "no round for date"),
        }
        Ok(scores)
    }
}
