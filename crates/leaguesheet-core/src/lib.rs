//! # leaguesheet-core
//!
//! Core domain model and traits for the leaguesheet report generator.
//!
//! This crate provides:
//! - Domain types: `GameScore`, `StandingsRow`, `Division`, `Round`
//! - Spreadsheet access: `SheetSource`, `Cell`, `SheetRange`
//! - Core traits: `Renderer`
//! - Source errors: `SourceError`
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use leaguesheet_core::{GameScore, Round, StandingsRow};
//! use rust_decimal::Decimal;
//!
//! let round = Round::new(3, NaiveDate::from_ymd_opt(2025, 9, 20).unwrap());
//! let game = GameScore::new(round, "Team 1 (Smith)", "Team 2 (Jones)").score(1, 0);
//! assert!(!game.unknown);
//!
//! let row = StandingsRow::new("Team 1", 1)
//!     .record(3, 3, 0, 0)
//!     .points(9, Decimal::new(55, 1), Decimal::new(145, 1));
//! assert_eq!(row.wins, 3);
//! ```

pub mod sheet;

pub use sheet::{
    column_letter, Cell, CellRef, CellValue, Rgb, RowData, SheetRange,
    SheetSource, SourceError,
};

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Round
// ============================================================================

/// One scheduled week of games
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// Sequential round number, starting at 1
    pub number: u32,
    /// Calendar date the round is played
    pub date: NaiveDate,
}

impl Round {
    pub const fn new(number: u32, date: NaiveDate) -> Self {
        Self { number, date }
    }
}

// ============================================================================
// Game scores
// ============================================================================

/// Result of a single game within a round
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameScore {
    pub round: u32,
    pub date: NaiveDate,
    /// Home team as written in the sheet, coach suffix included
    pub home_team: String,
    pub away_team: String,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    /// Score unknown or game cancelled
    pub unknown: bool,
    /// Exhibition game, not counted in standings
    pub friendly: bool,
}

impl GameScore {
    /// Create a game with no recorded score
    pub fn new(round: Round, home_team: impl Into<String>, away_team: impl Into<String>) -> Self {
        Self {
            round: round.number,
            date: round.date,
            home_team: home_team.into(),
            away_team: away_team.into(),
            home_score: None,
            away_score: None,
            unknown: true,
            friendly: false,
        }
    }

    /// Record the final score
    pub fn score(mut self, home: u32, away: u32) -> Self {
        self.home_score = Some(home);
        self.away_score = Some(away);
        self.unknown = false;
        self
    }

    /// Mark as a friendly
    pub fn friendly(mut self) -> Self {
        self.friendly = true;
        self
    }

    pub fn is_cancelled(&self) -> bool {
        self.unknown
    }
}

// ============================================================================
// Standings
// ============================================================================

/// One team's line in the round standings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsRow {
    pub team: String,
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub game_points: u32,
    pub referee_points: Decimal,
    pub total_points: Decimal,
    pub rank: u32,
}

impl StandingsRow {
    pub fn new(team: impl Into<String>, rank: u32) -> Self {
        Self {
            team: team.into(),
            games_played: 0,
            wins: 0,
            losses: 0,
            draws: 0,
            game_points: 0,
            referee_points: Decimal::ZERO,
            total_points: Decimal::ZERO,
            rank,
        }
    }

    /// Set games played, wins, losses and draws
    pub fn record(mut self, games_played: u32, wins: u32, losses: u32, draws: u32) -> Self {
        self.games_played = games_played;
        self.wins = wins;
        self.losses = losses;
        self.draws = draws;
        self
    }

    /// Set game, referee and total points
    pub fn points(mut self, game: u32, referee: Decimal, total: Decimal) -> Self {
        self.game_points = game;
        self.referee_points = referee;
        self.total_points = total;
        self
    }
}

// ============================================================================
// Divisions
// ============================================================================

/// Guaranteed playoff places when a division does not configure its own
pub const DEFAULT_PLAYOFF_SLOTS: u32 = 1;

/// An age/gender bracket: one sheet in, one report of each kind out
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Division {
    /// Sheet name, also used in output file names
    pub name: String,
    /// Guaranteed playoff places
    pub playoff_slots: u32,
}

impl Division {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            playoff_slots: DEFAULT_PLAYOFF_SLOTS,
        }
    }

    pub fn playoff_slots(mut self, slots: u32) -> Self {
        self.playoff_slots = slots;
        self
    }

    /// Look up a built-in division by name, or create one with default slots
    pub fn named(name: &str) -> Self {
        let name = name.trim();
        default_divisions()
            .into_iter()
            .find(|d| d.name.eq_ignore_ascii_case(name))
            .unwrap_or_else(|| Self::new(name))
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// The league's divisions, in processing order.
///
/// 10U brackets have two guaranteed playoff places; older brackets give one
/// place to the tournament winner, leaving one from the standings.
pub fn default_divisions() -> Vec<Division> {
    vec![
        Division::new("10U Boys").playoff_slots(2),
        Division::new("10U Girls").playoff_slots(2),
        Division::new("12U Boys"),
        Division::new("12U Girls"),
        Division::new("14U Boys"),
        Division::new("14U Girls"),
    ]
}

// ============================================================================
// Dates and names
// ============================================================================

/// The Saturday strictly before `today`
pub fn last_saturday(today: NaiveDate) -> NaiveDate {
    let days_back = i64::from(today.weekday().num_days_from_sunday()) + 1;
    today - Duration::days(days_back)
}

/// Drop a trailing parenthetical and the space before it.
///
/// `"Team 5 (Nkunku)"` becomes `"Team 5"`.
pub fn strip_parenthetical(name: &str) -> &str {
    match name.find('(') {
        Some(idx) => name[..idx].trim_end(),
        None => name,
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// What a report is being produced for
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundContext {
    pub division: Division,
    /// Target report date
    pub date: NaiveDate,
    /// Round matched for `date`, if any
    pub round: Option<Round>,
}

impl RoundContext {
    pub fn new(division: Division, date: NaiveDate) -> Self {
        Self {
            division,
            date,
            round: None,
        }
    }

    pub fn with_round(mut self, round: Option<Round>) -> Self {
        self.round = round;
        self
    }

    /// Current round number, 0 when no round was matched
    pub fn round_number(&self) -> u32 {
        self.round.map_or(0, |r| r.number)
    }
}

/// Output rendering
pub trait Renderer {
    /// Report data, e.g. `[GameScore]`
    type Input: ?Sized;
    type Output;

    /// Render report data for one division
    fn render(&self, context: &RoundContext, data: &Self::Input) -> Self::Output;
}

// ============================================================================
// Tests
// ============================================================================
