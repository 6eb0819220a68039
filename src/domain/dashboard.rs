// Dashboard domain model - tabs, reporting periods and session state
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Longest custom range the dashboard will request, in days
pub const MAX_RANGE_DAYS: i64 = 365;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    General,
    Confirmed,
    Vpn,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::General, Tab::Confirmed, Tab::Vpn];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::General => "general",
            Tab::Confirmed => "confirmed",
            Tab::Vpn => "vpn",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::ALL
            .into_iter()
            .find(|tab| tab.as_str() == s)
            .ok_or_else(|| format!("unknown tab: {}", s))
    }
}

/// Why a custom date range was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RangeRejection {
    #[error("start date {from} is after end date {to}")]
    StartAfterEnd { from: NaiveDate, to: NaiveDate },
    #[error("end date {to} is in the future")]
    EndInFuture { to: NaiveDate },
    #[error("range spans {days} days, more than the 365 day limit")]
    TooLong { days: i64 },
}

/// Inclusive custom date range, only constructible through validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    pub fn validate(from: NaiveDate, to: NaiveDate, today: NaiveDate) -> Result<Self, RangeRejection> {
        if from > to {
            return Err(RangeRejection::StartAfterEnd { from, to });
        }
        if to > today {
            return Err(RangeRejection::EndInFuture { to });
        }
        let days = (to - from).num_days();
        if days > MAX_RANGE_DAYS {
            return Err(RangeRejection::TooLong { days });
        }
        Ok(Self { from, to })
    }

    pub fn start(&self) -> NaiveDate {
        self.from
    }

    pub fn end(&self) -> NaiveDate {
        self.to
    }

    pub fn days(&self) -> i64 {
        (self.to - self.from).num_days()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Period {
    #[default]
    Today,
    Week,
    Month,
    Quarter,
    Year,
    Custom(DateRange),
}

impl Period {
    /// Value sent as the `period` query parameter
    pub fn query_value(&self) -> &'static str {
        match self {
            Period::Today => "today",
            Period::Week => "week",
            Period::Month => "month",
            Period::Quarter => "quarter",
            Period::Year => "year",
            Period::Custom(_) => "custom",
        }
    }

    pub fn custom_range(&self) -> Option<DateRange> {
        match self {
            Period::Custom(range) => Some(*range),
            _ => None,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Custom(range) => write!(f, "custom_{}_{}", range.from, range.to),
            preset => f.write_str(preset.query_value()),
        }
    }
}

impl FromStr for Period {
    type Err = String;

    /// Presets only; custom ranges go through `DateRange::validate`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "today" => Ok(Period::Today),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "quarter" => Ok(Period::Quarter),
            "year" => Ok(Period::Year),
            other => Err(format!("unknown period: {}", other)),
        }
    }
}

/// Snapshot of the dashboard session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardState {
    pub tab: Tab,
    pub period: Period,
    pub loading: bool,
}
