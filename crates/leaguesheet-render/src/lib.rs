//! # leaguesheet-render
//!
//! HTML fragments for the league website.
//!
//! This crate provides:
//! - Scores table: one row per game, coach suffixes dropped
//! - Standings table: ranked rows with tie marks and playoff highlighting
//! - Playoff policy and ranking, usable without rendering
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use leaguesheet_core::{Division, GameScore, Renderer, Round, RoundContext};
//! use leaguesheet_render::ScoresHtmlRenderer;
//!
//! let round = Round::new(3, NaiveDate::from_ymd_opt(2025, 9, 20).unwrap());
//! let context = RoundContext::new(Division::named("12U Boys"), round.date).with_round(Some(round));
//! let games = vec![GameScore::new(round, "Team 5 (Nkunku)", "Team 6 (Saka)").score(2, 0)];
//!
//! let html = ScoresHtmlRenderer::new().render(&context, &games);
//! assert!(html.contains("<td class=\"home\">Team 5</td>"));
//! ```

pub mod html;
pub mod ranking;
pub mod scores;
pub mod standings;

pub use html::{html_escape, HtmlBuilder};
pub use ranking::{rank_standings, PlayoffPolicy, RankedRow};
pub use scores::ScoresHtmlRenderer;
pub use standings::{format_points, StandingsHtmlRenderer};

use std::fmt;

/// The two fragments produced per division
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReportKind {
    Scores,
    Standings,
}

impl ReportKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportKind::Scores => "scores",
            ReportKind::Standings => "standings",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output file name, e.g. `"12U Boys scores.html"`
pub fn report_file_name(division: &str, kind: ReportKind) -> String {
    format!("{} {}.html", division.trim(), kind)
}
