use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Months, Utc};

use crate::{ContentType, TermId};

/// Selection of a single taxonomy term, or no restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TermFilter {
    #[default]
    All,
    Only(TermId),
}

impl TermFilter {
    pub fn id(self) -> Option<TermId> {
        match self {
            TermFilter::All => None,
            TermFilter::Only(id) => Some(id),
        }
    }
}

impl fmt::Display for TermFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermFilter::All => f.write_str("all"),
            TermFilter::Only(id) => write!(f, "{id}"),
        }
    }
}

impl FromStr for TermFilter {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
            return Ok(TermFilter::All);
        }
        raw.parse::<TermId>()
            .map(TermFilter::Only)
            .map_err(|_| format!("expected a term id or 'all', got '{raw}'"))
    }
}

/// Publication-date restriction relative to the moment a request is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DateWindow {
    #[default]
    All,
    LastDay,
    LastWeek,
    LastMonth,
    LastYear,
}

impl DateWindow {
    /// Earliest publication time admitted by this window, or `None` for no limit.
    pub fn cutoff(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            DateWindow::All => None,
            DateWindow::LastDay => now.checked_sub_signed(Duration::days(1)),
            DateWindow::LastWeek => now.checked_sub_signed(Duration::days(7)),
            DateWindow::LastMonth => now.checked_sub_months(Months::new(1)),
            DateWindow::LastYear => now.checked_sub_months(Months::new(12)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DateWindow::All => "all",
            DateWindow::LastDay => "day",
            DateWindow::LastWeek => "week",
            DateWindow::LastMonth => "month",
            DateWindow::LastYear => "year",
        }
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateWindow {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(DateWindow::All),
            "day" | "last-day" => Ok(DateWindow::LastDay),
            "week" | "last-week" => Ok(DateWindow::LastWeek),
            "month" | "last-month" => Ok(DateWindow::LastMonth),
            "year" | "last-year" => Ok(DateWindow::LastYear),
            other => Err(format!("unknown date window '{other}'")),
        }
    }
}

/// Active query facets of a view.
///
/// Category, tag, search and date window only take effect for
/// [`ContentType::Posts`]; the custom endpoint only for [`ContentType::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FilterState {
    pub content_type: ContentType,
    pub category: TermFilter,
    pub tag: TermFilter,
    pub search: String,
    pub date_window: DateWindow,
    pub custom_endpoint: String,
}

impl FilterState {
    pub fn new(content_type: ContentType) -> Self {
        Self {
            content_type,
            ..Self::default()
        }
    }

    pub fn post_facets_apply(&self) -> bool {
        self.content_type == ContentType::Posts
    }

    /// Search text that will be sent, if any.
    pub fn search_query(&self) -> Option<&str> {
        let trimmed = self.search.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// Custom endpoint that will be used, if the view is in custom mode and one is set.
    pub fn active_custom_endpoint(&self) -> Option<&str> {
        if self.content_type != ContentType::Custom || self.custom_endpoint.trim().is_empty() {
            return None;
        }
        Some(&self.custom_endpoint)
    }
}
