//! Time window resolution for statistics queries

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};

use crate::error::{StatisticsError, StatisticsResult};
use crate::models::StatsQuery;

const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 2100;
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Creation-time filter applied before aggregating.
///
/// Windows are half-open so a year and the date range spanning the same days
/// select the same records at any timestamp precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    /// No filter
    All,
    /// `[start, end)`
    Between {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl TimeWindow {
    pub fn resolve(query: &StatsQuery) -> StatisticsResult<Self> {
        if let Some(year) = query.year {
            return Self::year(year);
        }

        match (query.start.as_deref(), query.end.as_deref()) {
            (Some(start), Some(end)) => Self::range(parse_day(start)?, parse_day(end)?),
            _ => Ok(TimeWindow::All),
        }
    }

    pub fn year(year: i32) -> StatisticsResult<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(StatisticsError::InvalidYear(year));
        }

        let first = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(StatisticsError::InvalidYear(year))?;
        let next =
            NaiveDate::from_ymd_opt(year + 1, 1, 1).ok_or(StatisticsError::InvalidYear(year))?;

        Ok(TimeWindow::Between {
            start: start_of_day(first),
            end: start_of_day(next),
        })
    }

    /// Whole days from `first` through `last`, ending at the next midnight
    pub fn range(first: NaiveDate, last: NaiveDate) -> StatisticsResult<Self> {
        if first > last {
            return Err(StatisticsError::InvalidRange);
        }
        let after_last = last
            .checked_add_days(Days::new(1))
            .ok_or(StatisticsError::InvalidRange)?;

        Ok(TimeWindow::Between {
            start: start_of_day(first),
            end: start_of_day(after_last),
        })
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        match *self {
            TimeWindow::All => true,
            TimeWindow::Between { start, end } => start <= at && at < end,
        }
    }
}

fn parse_day(raw: &str) -> StatisticsResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| StatisticsError::InvalidDateFormat(raw.to_string()))
}

fn start_of_day(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}
