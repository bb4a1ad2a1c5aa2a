//! Per-division report generation.
//!
//! Each division runs scores then standings, fetch to write, before the next
//! division starts. The round matched by the scores step decides playoff
//! highlighting in the standings of the same division.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{error, info, warn};

use leaguesheet_core::{Division, Renderer, RoundContext, SheetSource};
use leaguesheet_parser::{ExtractError, ScoresExtractor, StandingsExtractor};
use leaguesheet_render::{report_file_name, ReportKind, ScoresHtmlRenderer, StandingsHtmlRenderer};

use crate::config::AppSettings;
use crate::output::ReportWriter;

/// Outcome of a whole run
#[derive(Debug, Default)]
pub struct RunSummary {
    pub written: Vec<PathBuf>,
    /// Divisions whose processing stopped on an error
    pub failed: Vec<String>,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct Pipeline<'a, S> {
    settings: &'a AppSettings,
    source: S,
    writer: ReportWriter,
    scores: ScoresHtmlRenderer,
    standings: StandingsHtmlRenderer,
}

impl<'a, S: SheetSource> Pipeline<'a, S> {
    pub fn new(settings: &'a AppSettings, source: S) -> Self {
        let mut standings = StandingsHtmlRenderer::new().policy(settings.policy.clone());
        standings.referee_points_href = settings.referee_points_href.clone();

        Self {
            settings,
            source,
            writer: ReportWriter::new(&settings.output_path, settings.date),
            scores: ScoresHtmlRenderer::new(),
            standings,
        }
    }

    pub fn run(&self) -> RunSummary {
        let mut summary = RunSummary::default();
        for division in &self.settings.divisions {
            match self.run_division(division) {
                Ok(mut written) => summary.written.append(&mut written),
                Err(err) => {
                    error!(division = %division, "{:#}", err);
                    summary.failed.push(division.name.clone());
                }
            }
        }
        summary
    }

    fn run_division(&self, division: &Division) -> Result<Vec<PathBuf>> {
        let date = self.settings.date;
        let mut context = RoundContext::new(division.clone(), date);
        let mut written = Vec::new();

        if self.settings.scores {
            let scores = ScoresExtractor::new(&self.source, date)
                .friendly_color(self.settings.friendly_color)
                .extract(division)
                .with_context(|| format!("Failed to read scores for {}", division))?;
            if scores.round.is_none() {
                warn!(division = %division, date = %date, "no round on this date, scores table is empty");
            }
            context.round = scores.round;

            let html = self.scores.render(&context, &scores.games);
            written.push(
                self.writer
                    .write(&report_file_name(&division.name, ReportKind::Scores), &html)?,
            );
        }

        if self.settings.standings {
            let standings = match StandingsExtractor::new(&self.source, date).extract(division) {
                Ok(standings) => standings,
                Err(err @ ExtractError::RoundNotFound { .. }) => {
                    warn!(division = %division, "{}, skipping standings", err);
                    return Ok(written);
                }
                Err(err) => {
                    return Err(err)
                        .with_context(|| format!("Failed to read standings for {}", division))
                }
            };
            if context.round.is_none() {
                context.round = Some(standings.round);
            }

            let html = self.standings.render(&context, &standings.rows);
            written.push(
                self.writer
                    .write(&report_file_name(&division.name, ReportKind::Standings), &html)?,
            );
        }

        info!(division = %division, files = written.len(), "division done");
        Ok(written)
    }
}
