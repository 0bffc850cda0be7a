//! Daily wall-clock schedule and next-trigger arithmetic

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Timezone;
use crate::errors::DomainError;

/// A fixed daily trigger time in a specific timezone
///
/// Immutable once built; hour, minute and zone are validated up front so the
/// trigger computation itself cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSchedule", into = "RawSchedule")]
pub struct Schedule {
    hour: u32,
    minute: u32,
    timezone: Timezone,
}

impl Schedule {
    /// Create a schedule
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSchedule` if `hour > 23` or `minute > 59`.
    pub fn new(hour: u32, minute: u32, timezone: Timezone) -> Result<Self, DomainError> {
        if hour > 23 {
            return Err(DomainError::InvalidSchedule(format!(
                "hour must be 0-23, got {hour}"
            )));
        }
        if minute > 59 {
            return Err(DomainError::InvalidSchedule(format!(
                "minute must be 0-59, got {minute}"
            )));
        }
        Ok(Self {
            hour,
            minute,
            timezone,
        })
    }

    /// Create a schedule from an IANA timezone identifier
    ///
    /// # Errors
    ///
    /// Returns an error if the zone is unknown or the time is out of range.
    pub fn parse(hour: u32, minute: u32, timezone: &str) -> Result<Self, DomainError> {
        Self::new(hour, minute, Timezone::parse(timezone)?)
    }

    /// Trigger hour (0-23)
    #[must_use]
    pub const fn hour(&self) -> u32 {
        self.hour
    }

    /// Trigger minute (0-59)
    #[must_use]
    pub const fn minute(&self) -> u32 {
        self.minute
    }

    /// Zone the wall-clock time is expressed in
    #[must_use]
    pub const fn timezone(&self) -> Timezone {
        self.timezone
    }

    /// Next instant strictly after `now` at which this schedule fires
    #[must_use]
    pub fn next_trigger(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        next_trigger(now, self.hour, self.minute, self.timezone.tz())
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02} {}", self.hour, self.minute, self.timezone)
    }
}

/// Next instant strictly after `now` whose wall-clock time in `tz` is `hour:minute:00`
///
/// Today's candidate is used when it is still ahead of `now`, otherwise the same
/// wall-clock time on the following local date. The local time is resolved
/// through the zone each day, so the result follows daylight-saving changes
/// instead of drifting by the offset difference.
///
/// `hour` and `minute` are expected to be in range; out-of-range values are
/// clamped to 23:59.
#[must_use]
pub fn next_trigger(now: DateTime<Utc>, hour: u32, minute: u32, tz: Tz) -> DateTime<Utc> {
    let time = NaiveTime::from_hms_opt(hour.min(23), minute.min(59), 0).unwrap_or(NaiveTime::MIN);
    let today = now.with_timezone(&tz).date_naive();

    let candidate = resolve_local(tz, today.and_time(time));
    if candidate > now {
        return candidate;
    }

    let tomorrow = today.succ_opt().unwrap_or(NaiveDate::MAX);
    resolve_local(tz, tomorrow.and_time(time))
}

/// Map a local wall-clock time to a UTC instant
///
/// Ambiguous times (clocks going back) resolve to the earlier instant. Times
/// inside a spring-forward gap resolve to the instant one hour later on the
/// wall clock, which is the first moment the requested time has passed.
fn resolve_local(tz: Tz, local: NaiveDateTime) -> DateTime<Utc> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(t) => t.with_timezone(&Utc),
        LocalResult::Ambiguous(a, b) => a.min(b).with_timezone(&Utc),
        LocalResult::None => tz
            .from_local_datetime(&(local + Duration::hours(1)))
            .earliest()
            .map_or_else(
                || Utc.from_utc_datetime(&local),
                |t| t.with_timezone(&Utc),
            ),
    }
}

/// Serialized form of a schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawSchedule {
    hour: u32,
    minute: u32,
    timezone: String,
}

impl TryFrom<RawSchedule> for Schedule {
    type Error = DomainError;

    fn try_from(raw: RawSchedule) -> Result<Self, Self::Error> {
        Self::parse(raw.hour, raw.minute, &raw.timezone)
    }
}

impl From<Schedule> for RawSchedule {
    fn from(schedule: Schedule) -> Self {
        Self {
            hour: schedule.hour,
            minute: schedule.minute,
            timezone: schedule.timezone.as_str().to_string(),
        }
    }
}
