//! Standings order, tie marks and playoff qualification.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use leaguesheet_core::{RoundContext, StandingsRow};

/// When and how guaranteed playoff places are awarded
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayoffPolicy {
    /// Places are only shown from this round on
    pub min_round: u32,
    /// Teams below this many referee points cannot qualify
    pub min_referee_points: Decimal,
}

impl Default for PlayoffPolicy {
    fn default() -> Self {
        Self {
            min_round: 6,
            min_referee_points: Decimal::from(5),
        }
    }
}

impl PlayoffPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_round(mut self, round: u32) -> Self {
        self.min_round = round;
        self
    }

    pub fn min_referee_points(mut self, points: Decimal) -> Self {
        self.min_referee_points = points;
        self
    }

    /// Whether qualification is evaluated at all for this round
    pub fn applies(&self, context: &RoundContext) -> bool {
        context.round_number() >= self.min_round
    }
}

/// A standings row in display order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RankedRow<'a> {
    pub row: &'a StandingsRow,
    /// 0-based display position
    pub position: usize,
    /// Shares its rank with an adjacent row
    pub tied: bool,
    pub playoffs: bool,
}

impl RankedRow<'_> {
    /// Rank as displayed, `T`-prefixed when tied
    pub fn rank_label(&self) -> String {
        if self.tied {
            format!("T{}", self.row.rank)
        } else {
            self.row.rank.to_string()
        }
    }

    /// Row class: playoff highlight and alternating stripe
    pub fn css_class(&self) -> Option<&'static str> {
        let alt = self.position % 2 == 1;
        match (self.playoffs, alt) {
            (true, false) => Some("playoffs"),
            (true, true) => Some("playoffs-alt"),
            (false, true) => Some("alt"),
            (false, false) => None,
        }
    }
}

/// Ascending rank, ties broken by team name
pub fn compare_rows(a: &StandingsRow, b: &StandingsRow) -> Ordering {
    a.rank.cmp(&b.rank).then_with(|| a.team.cmp(&b.team))
}

/// Order rows, mark ties and award playoff places.
///
/// Places go to rows in display order that meet the referee-point minimum,
/// until the division's slots are used. A row tied on rank with a row that
/// already qualified also qualifies, so a tie is never split.
pub fn rank_standings<'a>(
    rows: &'a [StandingsRow],
    context: &RoundContext,
    policy: &PlayoffPolicy,
) -> Vec<RankedRow<'a>> {
    let mut sorted: Vec<&StandingsRow> = rows.iter().collect();
    sorted.sort_by(|a, b| compare_rows(a, b));

    let evaluate = policy.applies(context);
    let slots = context.division.playoff_slots as usize;
    let mut qualified_ranks: Vec<u32> = Vec::new();
    let mut awarded = 0usize;

    let mut ranked = Vec::with_capacity(sorted.len());
    for (position, row) in sorted.iter().enumerate() {
        let tied_prev = position > 0 && sorted[position - 1].rank == row.rank;
        let tied_next = sorted.get(position + 1).is_some_and(|next| next.rank == row.rank);

        let mut playoffs = false;
        if evaluate && row.referee_points >= policy.min_referee_points {
            if awarded < slots {
                awarded += 1;
                qualified_ranks.push(row.rank);
                playoffs = true;
            } else if qualified_ranks.contains(&row.rank) {
                playoffs = true;
            }
        }

        ranked.push(RankedRow {
            row,
            position,
            tied: tied_prev || tied_next,
            playoffs,
        });
    }
    ranked
}
