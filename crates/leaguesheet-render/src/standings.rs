//! Standings table renderer.

use rust_decimal::{Decimal, RoundingStrategy};

use leaguesheet_core::{Renderer, RoundContext, StandingsRow};

use crate::html::{html_escape, HtmlBuilder};
use crate::ranking::{rank_standings, PlayoffPolicy, RankedRow};

/// Column widths in pixels: rank, team, then the seven statistics
const COLUMN_WIDTHS: [u32; 9] = [45, 257, 45, 45, 45, 45, 45, 45, 45];

const HEADINGS_BEFORE_REF: [&str; 7] = [
    "Rank",
    "Team name",
    "Games",
    "Wins",
    "Losses",
    "Draws",
    "Points",
];
const REF_HEADING: &str = "Ref points";
const TOTAL_HEADING: &str = "Total";

/// Renders a division's ranked standings as an HTML table
#[derive(Clone, Debug, Default)]
pub struct StandingsHtmlRenderer {
    pub policy: PlayoffPolicy,
    /// Page explaining referee points, linked from the column heading
    pub referee_points_href: Option<String>,
}

impl StandingsHtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn policy(mut self, policy: PlayoffPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn referee_points_href(mut self, href: impl Into<String>) -> Self {
        self.referee_points_href = Some(href.into());
        self
    }

    fn write_head(&self, b: &mut HtmlBuilder) {
        b.element("colgroup", &[], |b| {
            for width in COLUMN_WIDTHS {
                let width = width.to_string();
                b.void("col", &[("width", width.as_str())]);
            }
        });

        b.element("thead", &[], |b| {
            b.element("tr", &[], |b| {
                for heading in HEADINGS_BEFORE_REF {
                    b.leaf("th", &[], heading);
                }
                match &self.referee_points_href {
                    Some(href) => {
                        let link = format!(
                            "<a href=\"{}\"><strong>{}</strong></a>",
                            html_escape(href),
                            REF_HEADING
                        );
                        b.leaf_raw("th", &[], &link);
                    }
                    None => {
                        b.leaf("th", &[], REF_HEADING);
                    }
                }
                b.leaf("th", &[], TOTAL_HEADING);
            });
        });
    }

    fn write_row(b: &mut HtmlBuilder, ranked: &RankedRow<'_>) {
        let row = ranked.row;
        let attrs: Vec<(&str, &str)> = ranked
            .css_class()
            .map(|c| vec![("class", c)])
            .unwrap_or_default();

        b.element("tr", &attrs, |b| {
            b.leaf("td", &[], &ranked.rank_label())
                .leaf("td", &[], &row.team)
                .leaf("td", &[], &row.games_played.to_string())
                .leaf("td", &[], &row.wins.to_string())
                .leaf("td", &[], &row.losses.to_string())
                .leaf("td", &[], &row.draws.to_string())
                .leaf("td", &[], &row.game_points.to_string())
                .leaf("td", &[], &format_points(row.referee_points))
                .leaf("td", &[], &format_points(row.total_points));
        });
    }
}

impl Renderer for StandingsHtmlRenderer {
    type Input = [StandingsRow];
    type Output = String;

    fn render(&self, context: &RoundContext, rows: &[StandingsRow]) -> String {
        let ranked = rank_standings(rows, context, &self.policy);

        let mut html = HtmlBuilder::new();
        html.element("table", &[("class", "standings")], |b| {
            self.write_head(b);
            b.element("tbody", &[], |b| {
                for row in &ranked {
                    Self::write_row(b, row);
                }
            });
        });
        html.finish()
    }
}

/// Points as displayed: whole numbers without a decimal point, anything else
/// with exactly one decimal digit
pub fn format_points(points: Decimal) -> String {
    let mut shown = if points.fract().is_zero() {
        let mut whole = points.trunc();
        whole.rescale(0);
        whole
    } else {
        let mut tenths = points.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
        tenths.rescale(1);
        tenths
    };
    if shown.is_zero() {
        shown.set_sign_positive(true);
    }
    shown.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use leaguesheet_core::{Division, Round};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn context(round: u32) -> RoundContext {
        let date = NaiveDate::from_ymd_opt(2025, 10, 11).unwrap();
        RoundContext::new(Division::new("14U Girls"), date)
            .with_round(Some(Round::new(round, date)))
    }

    #[test]
    fn points_formatting() {
        assert_eq!(format_points(dec!(6.0)), "6");
        assert_eq!(format_points(dec!(6)), "6");
        assert_eq!(format_points(dec!(5.5)), "5.5");
        assert_eq!(format_points(dec!(12.50)), "12.5");
        assert_eq!(format_points(dec!(4.25)), "4.3");
        assert_eq!(format_points(dec!(0)), "0");
        assert_eq!(format_points(dec!(-1.5)), "-1.5");
    }

    #[test]
    fn heading_link_is_optional() {
        let plain = StandingsHtmlRenderer::new().render(&context(1), &[]);
        assert!(plain.contains("<th>Ref points</th>"));

        let linked = StandingsHtmlRenderer::new()
            .referee_points_href("/Default.aspx?tabid=855285")
            .render(&context(1), &[]);
        assert!(linked.contains(
            "<th><a href=\"/Default.aspx?tabid=855285\"><strong>Ref points</strong></a></th>"
        ));
    }

    #[test]
    fn ties_and_playoffs_in_markup() {
        let rows = vec![
            StandingsRow::new("Bravo", 1).points(9, dec!(5.0), dec!(14)),
            StandingsRow::new("Alpha", 1).points(9, dec!(6.5), dec!(15.5)),
            StandingsRow::new("Charlie", 3).points(3, dec!(7), dec!(10)),
        ];
        let html = StandingsHtmlRenderer::new().render(&context(6), &rows);

        let alpha = html.find("Alpha").unwrap();
        let bravo = html.find("Bravo").unwrap();
        assert!(alpha < bravo);
        assert_eq!(html.matches("<td>T1</td>").count(), 2);
        assert!(html.contains("<tr class=\"playoffs\">"));
        assert!(html.contains("<tr class=\"playoffs-alt\">"));
        assert!(html.contains("<td>15.5</td>"));
    }

    #[test]
    fn full_table() {
        let rows = vec![
            StandingsRow::new("Team 2", 2)
                .record(6, 3, 2, 1)
                .points(10, dec!(5.5), dec!(15.5)),
            StandingsRow::new("Team 1", 1)
                .record(6, 5, 1, 0)
                .points(15, dec!(6.0), dec!(21.0)),
        ];
        let html = StandingsHtmlRenderer::new()
            .referee_points_href("/refs")
            .render(&context(6), &rows);
        insta::assert_snapshot!(html, @r#"
        <table class="standings">
          <colgroup>
            <col width="45">
            <col width="257">
            <col width="45">
            <col width="45">
            <col width="45">
            <col width="45">
            <col width="45">
            <col width="45">
            <col width="45">
          </colgroup>
          <thead>
            <tr>
              <th>Rank</th>
              <th>Team name</th>
              <th>Games</th>
              <th>Wins</th>
              <th>Losses</th>
              <th>Draws</th>
              <th>Points</th>
              <th><a href="/refs"><strong>Ref points</strong></a></th>
              <th>Total</th>
            </tr>
          </thead>
          <tbody>
            <tr class="playoffs">
              <td>1</td>
              <td>Team 1</td>
              <td>6</td>
              <td>5</td>
              <td>1</td>
              <td>0</td>
              <td>15</td>
              <td>6</td>
              <td>21</td>
            </tr>
            <tr class="alt">
              <td>2</td>
              <td>Team 2</td>
              <td>6</td>
              <td>3</td>
              <td>2</td>
              <td>1</td>
              <td>10</td>
              <td>5.5</td>
              <td>15.5</td>
            </tr>
          </tbody>
        </table>
        "#);
    }

    #[test]
    fn rendering_is_idempotent() {
        let rows = vec![
            StandingsRow::new("B", 2).points(3, dec!(5), dec!(8)),
            StandingsRow::new("A", 1).points(6, dec!(5), dec!(11)),
        ];
        let renderer = StandingsHtmlRenderer::new();
        assert_eq!(
            renderer.render(&context(7), &rows),
            renderer.render(&context(7), &rows)
        );
    }
}
