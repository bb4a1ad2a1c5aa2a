//! Run settings: command line over config file over built-in defaults.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use leaguesheet_core::{default_divisions, last_saturday, Division, Rgb};
use leaguesheet_render::PlayoffPolicy;

use crate::Cli;

/// Looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "leaguesheet.toml";
pub const DEFAULT_SNAPSHOT_FILE: &str = "league.json";
pub const DEFAULT_REFEREE_POINTS_HREF: &str = "/Default.aspx?tabid=855285";

/// `leaguesheet.toml`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Expected spreadsheet id of the workbook snapshot
    pub sheet_id: Option<String>,
    pub snapshot_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    /// Text colour marking friendlies
    pub friendly_color: Option<Rgb>,
    /// Link on the Ref points heading; empty for none
    pub referee_points_href: Option<String>,
    pub playoffs: PlayoffSection,
}

/// `[playoffs]`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PlayoffSection {
    #[serde(flatten)]
    pub policy: PlayoffPolicy,
    /// Guaranteed places per division name
    pub slots: BTreeMap<String, u32>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// `--config`, else `leaguesheet.toml` if present, else defaults
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.is_file() {
                    Self::load(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

/// Everything one run needs
#[derive(Clone, Debug, PartialEq)]
pub struct AppSettings {
    pub date: NaiveDate,
    pub divisions: Vec<Division>,
    pub scores: bool,
    pub standings: bool,
    pub sheet_id: Option<String>,
    pub snapshot_path: PathBuf,
    pub output_path: PathBuf,
    pub friendly_color: Rgb,
    pub referee_points_href: Option<String>,
    pub policy: PlayoffPolicy,
}

impl AppSettings {
    /// Merge command line and config file; `today` anchors the default date
    pub fn resolve(cli: &Cli, file: FileConfig, today: NaiveDate) -> Self {
        let requested: Vec<&str> = cli
            .divisions
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .collect();
        let mut divisions = if requested.is_empty() {
            default_divisions()
        } else {
            requested.into_iter().map(Division::named).collect()
        };
        for division in &mut divisions {
            if let Some(slots) = slots_for(&file.playoffs.slots, &division.name) {
                division.playoff_slots = slots;
            }
        }

        let referee_points_href = match file.referee_points_href {
            Some(href) if href.trim().is_empty() => None,
            Some(href) => Some(href),
            None => Some(DEFAULT_REFEREE_POINTS_HREF.to_string()),
        };

        Self {
            date: cli.date.unwrap_or_else(|| last_saturday(today)),
            divisions,
            scores: !cli.no_scores,
            standings: !cli.no_standings,
            sheet_id: file.sheet_id,
            snapshot_path: cli
                .snapshot
                .clone()
                .or(file.snapshot_path)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_FILE)),
            output_path: cli
                .output
                .clone()
                .or(file.output_path)
                .unwrap_or_else(|| PathBuf::from(".")),
            friendly_color: file.friendly_color.unwrap_or(Rgb::RED),
            referee_points_href,
            policy: file.playoffs.policy,
        }
    }

    /// "scores", "standings" or "scores and standings"
    pub fn report_kinds(&self) -> String {
        let mut kinds = Vec::new();
        if self.scores {
            kinds.push("scores");
        }
        if self.standings {
            kinds.push("standings");
        }
        kinds.join(" and ")
    }

    /// The line announcing a run
    pub fn summary(&self) -> String {
        let names: Vec<&str> = self.divisions.iter().map(|d| d.name.as_str()).collect();
        format!(
            "Creating {} for {} for the following divisions: {}",
            self.report_kinds(),
            self.date.format("%-m/%-d"),
            names.join(", ")
        )
    }
}

fn slots_for(slots: &BTreeMap<String, u32>, division: &str) -> Option<u32> {
    slots
        .iter()
        .find(|(name, _)| name.trim().eq_ignore_ascii_case(division))
        .map(|(_, n)| *n)
}
