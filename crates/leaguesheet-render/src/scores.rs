//! Scores table renderer.

use leaguesheet_core::{strip_parenthetical, GameScore, Renderer, RoundContext};

use crate::html::HtmlBuilder;

/// Renders a division's games for one round as an HTML table
#[derive(Clone, Debug)]
pub struct ScoresHtmlRenderer {
    /// Text shown in place of an unknown or cancelled score
    pub unknown_label: String,
    /// Markup between home and away goals
    pub separator: String,
}

impl Default for ScoresHtmlRenderer {
    fn default() -> Self {
        Self {
            unknown_label: "unknown".into(),
            separator: "&ndash;".into(),
        }
    }
}

impl ScoresHtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unknown_label(mut self, label: impl Into<String>) -> Self {
        self.unknown_label = label.into();
        self
    }

    /// Score cell markup
    fn score_html(&self, game: &GameScore) -> String {
        if game.unknown {
            return crate::html::html_escape(&self.unknown_label);
        }
        let side = |score: Option<u32>| score.map_or_else(|| "?".to_string(), |s| s.to_string());
        format!(
            "{}{}{}",
            side(game.home_score),
            self.separator,
            side(game.away_score)
        )
    }
}

/// `cancelled` and `friendly`, space-joined, or nothing
pub fn row_class(game: &GameScore) -> Option<String> {
    let mut classes = Vec::new();
    if game.unknown {
        classes.push("cancelled");
    }
    if game.friendly {
        classes.push("friendly");
    }
    (!classes.is_empty()).then(|| classes.join(" "))
}

impl Renderer for ScoresHtmlRenderer {
    type Input = [GameScore];
    type Output = String;

    fn render(&self, _context: &RoundContext, games: &[GameScore]) -> String {
        let mut html = HtmlBuilder::new();
        html.element("table", &[("class", "scores")], |b| {
            b.element("tbody", &[], |b| {
                for game in games {
                    let class = row_class(game);
                    let attrs: Vec<(&str, &str)> = class
                        .as_deref()
                        .map(|c| vec![("class", c)])
                        .unwrap_or_default();
                    b.element("tr", &attrs, |b| {
                        b.leaf("td", &[("class", "home")], strip_parenthetical(&game.home_team))
                            .leaf_raw("td", &[("class", "score")], &self.score_html(game))
                            .leaf("td", &[("class", "away")], strip_parenthetical(&game.away_team));
                    });
                }
            });
        });
        html.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use leaguesheet_core::{Division, Round};
    use pretty_assertions::assert_eq;

    fn round() -> Round {
        Round::new(3, NaiveDate::from_ymd_opt(2025, 9, 20).unwrap())
    }

    fn context() -> RoundContext {
        RoundContext::new(Division::new("12U Boys"), round().date).with_round(Some(round()))
    }

    #[test]
    fn score_cell_variants() {
        let renderer = ScoresHtmlRenderer::new();
        let played = GameScore::new(round(), "A", "B").score(2, 1);
        assert_eq!(renderer.score_html(&played), "2&ndash;1");

        let unknown = GameScore::new(round(), "A", "B");
        assert_eq!(renderer.score_html(&unknown), "unknown");

        let mut one_sided = GameScore::new(round(), "A", "B").score(3, 0);
        one_sided.away_score = None;
        assert_eq!(renderer.score_html(&one_sided), "3&ndash;?");
    }

    #[test]
    fn row_classes() {
        let played = GameScore::new(round(), "A", "B").score(0, 0);
        assert_eq!(row_class(&played), None);
        assert_eq!(row_class(&played.clone().friendly()), Some("friendly".into()));

        let cancelled = GameScore::new(round(), "A", "B");
        assert_eq!(row_class(&cancelled), Some("cancelled".into()));
        assert_eq!(
            row_class(&cancelled.friendly()),
            Some("cancelled friendly".into())
        );
    }

    #[test]
    fn coach_suffix_is_stripped() {
        let games = vec![GameScore::new(round(), "Team 5 (Nkunku)", "Team 6 (Saka)").score(1, 1)];
        let html = ScoresHtmlRenderer::new().render(&context(), &games);
        assert!(html.contains("<td class=\"home\">Team 5</td>"));
        assert!(html.contains("<td class=\"away\">Team 6</td>"));
        assert!(!html.contains("Nkunku"));
    }

    #[test]
    fn custom_unknown_label_is_escaped() {
        let games = vec![GameScore::new(round(), "A", "B")];
        let html = ScoresHtmlRenderer::new()
            .unknown_label("<tbd>")
            .render(&context(), &games);
        assert!(html.contains("<td class=\"score\">&lt;tbd&gt;</td>"));
    }

    #[test]
    fn full_table() {
        let games = vec![
            GameScore::new(round(), "Team 1 (Smith)", "Team 2 (Jones)").score(2, 1),
            GameScore::new(round(), "Team 3 (Lee)", "Team 4 (Diaz)"),
            GameScore::new(round(), "Team 5 (Nkunku)", "Team 6 (Saka)")
                .score(0, 3)
                .friendly(),
        ];
        let html = ScoresHtmlRenderer::new().render(&context(), &games);
        insta::assert_snapshot!(html, @r#"
        <table class="scores">
          <tbody>
            <tr>
              <td class="home">Team 1</td>
              <td class="score">2&ndash;1</td>
              <td class="away">Team 2</td>
            </tr>
            <tr class="cancelled">
              <td class="home">Team 3</td>
              <td class="score">unknown</td>
              <td class="away">Team 4</td>
            </tr>
            <tr class="friendly">
              <td class="home">Team 5</td>
              <td class="score">0&ndash;3</td>
              <td class="away">Team 6</td>
            </tr>
          </tbody>
        </table>
        "#);
    }

    #[test]
    fn rendering_is_idempotent() {
        let games = vec![GameScore::new(round(), "A", "B").score(4, 2)];
        let renderer = ScoresHtmlRenderer::new();
        assert_eq!(
            renderer.render(&context(), &games),
            renderer.render(&context(), &games)
        );
    }

    #[test]
    fn no_games() {
        let html = ScoresHtmlRenderer::new().render(&context(), &[]);
        assert_eq!(html, "<table class=\"scores\">\n  <tbody>\n  </tbody>\n</table>\n");
    }
}
