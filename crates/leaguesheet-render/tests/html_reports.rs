//! Tests for the scores and standings HTML reports

use chrono::NaiveDate;
use leaguesheet_core::{Division, GameScore, Renderer, Round, RoundContext, StandingsRow};
use leaguesheet_render::{
    rank_standings, report_file_name, PlayoffPolicy, ReportKind, ScoresHtmlRenderer,
    StandingsHtmlRenderer,
};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn context(division: &str, round: u32) -> RoundContext {
    let round = Round::new(round, date(2025, 10, 18));
    RoundContext::new(Division::named(division), round.date).with_round(Some(round))
}

fn six_teams(first_referee_points: Decimal) -> Vec<StandingsRow> {
    (1..=6)
        .rev()
        .map(|rank| {
            let referee = if rank == 1 { first_referee_points } else { dec!(6) };
            StandingsRow::new(format!("Team {}", rank), rank)
                .record(7, 7 - rank, rank - 1, 0)
                .points(3 * (7 - rank), referee, referee + Decimal::from(3 * (7 - rank)))
        })
        .collect()
}

/// Class attribute of each body row, in order
fn row_classes(html: &str) -> Vec<String> {
    let body = &html[html.find("<tbody>").unwrap()..];
    body.lines()
        .map(str::trim)
        .filter(|line| line.starts_with("<tr"))
        .map(|line| {
            line.strip_prefix("<tr class=\"")
                .and_then(|rest| rest.strip_suffix("\">"))
                .unwrap_or("")
                .to_string()
        })
        .collect()
}

// ============================================================================
// Standings
// ============================================================================

#[test]
fn leader_with_enough_referee_points_is_highlighted() {
    let html = StandingsHtmlRenderer::new()
        .render(&context("12U Girls", 6), &six_teams(dec!(6.0)));
    assert_eq!(
        row_classes(&html),
        vec!["playoffs", "alt", "", "alt", "", "alt"]
    );
}

#[test]
fn leader_short_of_referee_points_passes_place_down() {
    let html = StandingsHtmlRenderer::new()
        .render(&context("12U Girls", 6), &six_teams(dec!(4.5)));
    assert_eq!(
        row_classes(&html),
        vec!["", "playoffs-alt", "", "alt", "", "alt"]
    );
    assert!(html.contains("<td>4.5</td>"));
}

#[test]
fn ten_u_divisions_have_two_places() {
    let rows = six_teams(dec!(6));
    let ranked = rank_standings(&rows, &context("10U Boys", 8), &PlayoffPolicy::default());
    let qualified: Vec<&str> = ranked
        .iter()
        .filter(|r| r.playoffs)
        .map(|r| r.row.team.as_str())
        .collect();
    assert_eq!(qualified, vec!["Team 1", "Team 2"]);
}

#[test]
fn policy_thresholds_are_configurable() {
    let policy = PlayoffPolicy::new().min_round(1).min_referee_points(dec!(7));
    let html = StandingsHtmlRenderer::new()
        .policy(policy)
        .render(&context("14U Boys", 2), &six_teams(dec!(7)));
    assert_eq!(row_classes(&html)[0], "playoffs");

    let html = StandingsHtmlRenderer::new()
        .render(&context("14U Boys", 2), &six_teams(dec!(7)));
    assert_eq!(row_classes(&html)[0], "");
}

#[test]
fn rank_ties_marked_in_body() {
    let rows = vec![
        StandingsRow::new("Delta", 3),
        StandingsRow::new("Alpha", 1),
        StandingsRow::new("Charlie", 2),
        StandingsRow::new("Bravo", 2),
    ];
    let html = StandingsHtmlRenderer::new()
        .render(&context("12U Boys", 2), &rows);

    let order: Vec<usize> = ["Alpha", "Bravo", "Charlie", "Delta"]
        .iter()
        .map(|team| html.find(&format!("<td>{}</td>", team)).unwrap())
        .collect();
    assert!(order.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(html.matches("<td>T2</td>").count(), 2);
    assert!(html.contains("<td>1</td>\n      <td>Alpha</td>"));
}

// ============================================================================
// Scores
// ============================================================================

#[test]
fn scores_one_row_per_game_in_order() {
    let round = Round::new(6, date(2025, 10, 18));
    let games: Vec<GameScore> = (0..3)
        .map(|g| {
            GameScore::new(
                round,
                format!("Team {} (Home)", g * 2 + 1),
                format!("Team {} (Away)", g * 2 + 2),
            )
            .score(g, 2)
        })
        .collect();

    let html = ScoresHtmlRenderer::new()
        .render(&context("14U Girls", 6), &games);
    assert_eq!(html.matches("<tr>").count(), 3);
    let first = html.find("Team 1").unwrap();
    let last = html.find("Team 5").unwrap();
    assert!(first < last);
    assert!(html.contains("<td class=\"score\">2&ndash;2</td>"));
}

#[test]
fn team_names_are_escaped() {
    let round = Round::new(1, date(2025, 9, 6));
    let games = vec![GameScore::new(round, "Smith & Sons", "<Rovers>").score(1, 0)];
    let html = ScoresHtmlRenderer::new()
        .render(&context("12U Boys", 1), &games);
    assert!(html.contains("Smith &amp; Sons"));
    assert!(html.contains("&lt;Rovers&gt;"));
}

#[test]
fn report_file_names() {
    assert_eq!(
        report_file_name("14U Girls", ReportKind::Standings),
        "14U Girls standings.html"
    );
    assert_eq!(ReportKind::Scores.to_string(), "scores");
}
