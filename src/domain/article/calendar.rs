use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Offset, TimeDelta, Utc};

use crate::domain::errors::{DomainError, DomainResult};

/// Interprets editorial dates in the newsroom's local offset.
#[derive(Debug, Clone, Copy)]
pub struct EditorialCalendar {
    offset: FixedOffset,
}

impl Default for EditorialCalendar {
    fn default() -> Self {
        Self::utc()
    }
}

impl EditorialCalendar {
    pub const fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn utc() -> Self {
        Self {
            offset: Utc.fix(),
        }
    }

    pub fn from_offset_minutes(minutes: i32) -> DomainResult<Self> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(Self::new)
            .ok_or_else(|| DomainError::Validation(format!("invalid UTC offset: {minutes} minutes")))
    }

    /// Accepts RFC 3339 timestamps or bare `YYYY-MM-DD` dates (local midnight).
    pub fn parse_instant(&self, raw: &str) -> DomainResult<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
            return Ok(instant.with_timezone(&Utc));
        }
        let day = Self::parse_day(raw)?;
        Ok(self.local_to_utc(day, NaiveTime::MIN))
    }

    /// Inclusive bounds of the local day containing `raw`: 00:00:00.000 to 23:59:59.999.
    pub fn day_bounds(&self, raw: &str) -> DomainResult<(DateTime<Utc>, DateTime<Utc>)> {
        let raw = raw.trim();
        let day = match DateTime::parse_from_rfc3339(raw) {
            Ok(instant) => instant.with_timezone(&self.offset).date_naive(),
            Err(_) => Self::parse_day(raw)?,
        };
        let start = self.local_to_utc(day, NaiveTime::MIN);
        let end = start + TimeDelta::days(1) - TimeDelta::milliseconds(1);
        Ok((start, end))
    }

    fn parse_day(raw: &str) -> DomainResult<NaiveDate> {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| DomainError::Validation(format!("`{raw}` is not a valid date")))
    }

    fn local_to_utc(&self, day: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
        let local = day.and_time(time);
        (local - self.offset).and_utc()
    }
}
