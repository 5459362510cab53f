//! Tender list filtering and dashboard statistics.
//!
//! Deadlines are compared against an injected `now` so the tab and stat
//! logic is deterministic in tests. A deadline that does not parse counts as
//! neither upcoming nor expired.

#[cfg(test)]
#[path = "tenders_test.rs"]
mod tenders_test;

use chrono::{DateTime, NaiveDate, Utc};

use crate::net::types::Tender;

/// Type filter value meaning "no type restriction".
pub const ALL_TYPES: &str = "All";
/// Type options offered by the dashboard filter and the create form.
pub const TENDER_TYPES: [&str; 2] = ["Open", "Limited"];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TenderTab {
    #[default]
    All,
    Upcoming,
    Expired,
}

impl TenderTab {
    pub const ALL: [Self; 3] = [Self::All, Self::Upcoming, Self::Expired];

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All Tenders",
            Self::Upcoming => "Upcoming",
            Self::Expired => "Expired",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TenderFilter {
    pub search: String,
    pub kind: String,
    pub tab: TenderTab,
}

impl Default for TenderFilter {
    fn default() -> Self {
        Self {
            search: String::new(),
            kind: ALL_TYPES.to_owned(),
            tab: TenderTab::All,
        }
    }
}

impl TenderFilter {
    pub fn matches(&self, tender: &Tender, now: DateTime<Utc>) -> bool {
        let needle = self.search.trim().to_lowercase();
        let text_match = needle.is_empty()
            || [&tender.title, &tender.department, &tender.description]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));
        let kind_match = self.kind == ALL_TYPES || tender.kind == self.kind;
        let tab_match = match self.tab {
            TenderTab::All => true,
            TenderTab::Upcoming => is_upcoming(tender, now),
            TenderTab::Expired => is_expired(tender, now),
        };
        text_match && kind_match && tab_match
    }

    pub fn apply<'a>(&self, tenders: &'a [Tender], now: DateTime<Utc>) -> Vec<&'a Tender> {
        tenders.iter().filter(|t| self.matches(t, now)).collect()
    }

    /// Type filter options for `tenders`, each flagged when it is the active choice.
    pub fn type_choices(&self, tenders: &[Tender]) -> Vec<(String, bool)> {
        type_options(tenders)
            .into_iter()
            .map(|kind| {
                let selected = kind == self.kind;
                (kind, selected)
            })
            .collect()
    }
}

/// Dashboard counters over the full (unfiltered) list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TenderStats {
    pub active: usize,
    pub expired: usize,
    pub open: usize,
    pub limited: usize,
}

impl TenderStats {
    pub fn compute(tenders: &[Tender], now: DateTime<Utc>) -> Self {
        tenders.iter().fold(Self::default(), |mut stats, tender| {
            if is_upcoming(tender, now) {
                stats.active += 1;
            }
            if is_expired(tender, now) {
                stats.expired += 1;
            }
            match tender.kind.as_str() {
                "Open" => stats.open += 1,
                "Limited" => stats.limited += 1,
                _ => {}
            }
            stats
        })
    }
}

/// Type filter choices: "All", the known types, then any other type in the list.
pub fn type_options(tenders: &[Tender]) -> Vec<String> {
    let mut options: Vec<String> = std::iter::once(ALL_TYPES)
        .chain(TENDER_TYPES)
        .map(str::to_owned)
        .collect();
    for tender in tenders {
        let kind = tender.kind.trim();
        if !kind.is_empty() && !options.iter().any(|o| o == kind) {
            options.push(kind.to_owned());
        }
    }
    options
}

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (UTC midnight).
pub fn parse_deadline(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub fn is_upcoming(tender: &Tender, now: DateTime<Utc>) -> bool {
    parse_deadline(&tender.deadline).is_some_and(|deadline| deadline > now)
}

pub fn is_expired(tender: &Tender, now: DateTime<Utc>) -> bool {
    parse_deadline(&tender.deadline).is_some_and(|deadline| deadline < now)
}

/// Deadline for display (`15 Jun 2030`), or the raw string when unparseable.
pub fn format_deadline(raw: &str) -> String {
    parse_deadline(raw).map_or_else(|| raw.to_owned(), |d| d.format("%d %b %Y").to_string())
}
