//! # leaguesheet-parser
//!
//! Parsers for the league workbook.
//!
//! This crate provides:
//! - Round header notation (pest grammar)
//! - Scores parser: the games of the round matching a report date
//! - Standings parser: the ranked statistics block of that round
//! - Extractors binding the parsers to a [`SheetSource`](leaguesheet_core::SheetSource)
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use leaguesheet_core::{Cell, Rgb};
//! use leaguesheet_parser::parse_round_scores;
//!
//! let rows = vec![
//!     vec![Cell::new("ROUND 3: 9/20")],
//!     vec![Cell::new("HOME"), Cell::new("HG"), Cell::new("AG"), Cell::new("AWAY")],
//!     vec![Cell::new("Team 1 (Smith)"), Cell::new(2.0), Cell::new(1.0), Cell::new("Team 2 (Jones)")],
//! ];
//!
//! let date = NaiveDate::from_ymd_opt(2025, 9, 20).unwrap();
//! let scores = parse_round_scores(&rows, date, Rgb::RED);
//! assert_eq!(scores.round.unwrap().number, 3);
//! assert_eq!(scores.games[0].home_score, Some(2));
//! ```

pub mod notation;
pub mod scores;
pub mod standings;

pub use notation::{is_round_header, parse_round_header, RoundHeader};
pub use scores::{parse_round_scores, RoundScores, ScoresExtractor};
pub use standings::{
    count_teams, locate_round, rows_from_values, statistics_range, RoundLocation,
    RoundStandings, StandingsExtractor, TeamCount,
};

use chrono::NaiveDate;
use leaguesheet_core::SourceError;
use thiserror::Error;

/// First-column text of the row under each round header
pub const SUBHEADER_MARKER: &str = "HOME";

/// Error reading a division's report data
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("No round header dated {date} in sheet '{sheet}'")]
    RoundNotFound { sheet: String, date: NaiveDate },

    #[error("Invalid value {value:?} in cell {column}{row}")]
    InvalidCell {
        row: u32,
        column: String,
        value: String,
    },
}
