use crate::error::{BackdateError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use serde::Serialize;
use std::path::PathBuf;

pub const SCHEMA_VERSION: u32 = 1;

pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_FILE: &str = "README.md";
pub const REMOTE_NAME: &str = "origin";

/// Every generated commit is stamped at this local time of day.
pub fn commit_time() -> NaiveTime {
    NaiveTime::from_hms_opt(20, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// Run parameters, built once from the command line and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub no_weekends: bool,
    pub max_commits_per_day: u32,
    pub frequency_percent: i32,
    pub remote_url: Option<String>,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub days_before: i64,
    pub days_after: i64,
    pub output_dir: PathBuf,
    pub branch: String,
    pub file: String,
    pub dry_run: bool,
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            no_weekends: false,
            max_commits_per_day: 10,
            frequency_percent: 80,
            remote_url: None,
            user_name: None,
            user_email: None,
            days_before: 365,
            days_after: 0,
            output_dir: PathBuf::from("."),
            branch: DEFAULT_BRANCH.to_string(),
            file: DEFAULT_FILE.to_string(),
            dry_run: false,
            json: false,
        }
    }
}

impl Config {
    pub fn identity(&self) -> Identity {
        Identity {
            name: self.user_name.clone(),
            email: self.user_email.clone(),
        }
    }
}

/// Repository-local author identity. Unset fields are left to git's own config.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Inclusive `[start, end]` window, both ends anchored at the same time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    /// Shift `now` (pinned to `at`) back by `days_before` and forward by `days_after`.
    pub fn around(now: NaiveDateTime, at: NaiveTime, days_before: i64, days_after: i64) -> Result<Self> {
        let anchor = now.date().and_time(at);
        let start = shift(anchor, -1, days_before)?;
        let end = shift(anchor, 1, days_after)?;
        Ok(Self { start, end })
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end.date()
    }
}

fn shift(anchor: NaiveDateTime, sign: i64, days: i64) -> Result<NaiveDateTime> {
    let delta = days
        .checked_mul(sign)
        .and_then(TimeDelta::try_days)
        .ok_or_else(|| BackdateError::InvalidRange(format!("{days} days is out of range")))?;
    anchor
        .checked_add_signed(delta)
        .ok_or_else(|| BackdateError::InvalidRange(format!("{days} days from {anchor} is out of range")))
}

#[derive(Debug, Clone)]
pub struct CommitInfo {
    pub id: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository_path: String,
    pub remote: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub commit_count: usize,
    pub active_days: usize,
    pub head: Option<String>,
    pub pushed: bool,
    pub dry_run: bool,
    pub dates: Vec<NaiveDate>,
}
