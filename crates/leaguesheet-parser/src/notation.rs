//! Round header notation, parsed with pest.

use chrono::NaiveDate;
use pest::Parser;
use pest_derive::Parser;

use leaguesheet_core::Round;

#[derive(Parser)]
#[grammar = "notation.pest"]
pub struct NotationParser;

/// A `ROUND <n>: <month>/<day>` header as written in the sheet.
///
/// The year is not part of the cell; it comes from the report date.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundHeader {
    pub number: u32,
    pub month: u32,
    pub day: u32,
}

impl RoundHeader {
    /// Find a round header anywhere in `text`
    pub fn parse(text: &str) -> Option<Self> {
        let header = NotationParser::parse(Rule::round_header, text).ok()?.next()?;
        let tag = header
            .into_inner()
            .find(|pair| pair.as_rule() == Rule::round_tag)?;

        let (mut number, mut month, mut day) = (None, None, None);
        for part in tag.into_inner() {
            match part.as_rule() {
                Rule::round_number => number = part.as_str().parse().ok(),
                Rule::month => month = part.as_str().parse().ok(),
                Rule::day => day = part.as_str().parse().ok(),
                _ => {}
            }
        }

        Some(Self {
            number: number?,
            month: month?,
            day: day?,
        })
    }

    /// Calendar date of the round in `year`; `None` for impossible dates
    pub fn date_in(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
    }

    pub fn round_in(&self, year: i32) -> Option<Round> {
        self.date_in(year).map(|date| Round::new(self.number, date))
    }
}

/// True if the cell text carries a round header
pub fn is_round_header(text: &str) -> bool {
    RoundHeader::parse(text).is_some()
}

/// Round number and date from a header cell, dated in `year`
pub fn parse_round_header(text: &str, year: i32) -> Option<Round> {
    RoundHeader::parse(text)?.round_in(year)
}
