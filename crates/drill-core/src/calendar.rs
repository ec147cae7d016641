//! Calendar-day boundaries for scheduling.
//!
//! Due dates fall on local midnights. The zone defining "local" is explicit so
//! that servers and tests do not depend on the host's time zone.

use crate::error::ValidationError;
use chrono::{
    DateTime, Days, Duration, FixedOffset, Local, NaiveDate, NaiveTime, Offset, TimeZone, Utc,
};

/// Time zone whose midnights delimit days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DayZone {
    /// The host's local time zone.
    #[default]
    Local,
    /// A fixed offset from UTC.
    Fixed(FixedOffset),
}

/// Maps instants to calendar days in one zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Calendar {
    zone: DayZone,
}

impl Calendar {
    pub fn new(zone: DayZone) -> Self {
        Self { zone }
    }

    /// Host-local days.
    pub fn local() -> Self {
        Self::new(DayZone::Local)
    }

    /// Days delimited by UTC midnight.
    pub fn utc() -> Self {
        Self::new(DayZone::Fixed(Utc.fix()))
    }

    /// Days delimited by midnight at `minutes` east of UTC.
    pub fn with_offset_minutes(minutes: i32) -> Result<Self, ValidationError> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(|offset| Self::new(DayZone::Fixed(offset)))
            .ok_or(ValidationError::UtcOffsetOutOfRange { minutes })
    }

    pub fn zone(&self) -> DayZone {
        self.zone
    }

    /// Calendar date containing `instant`.
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        match self.zone {
            DayZone::Local => instant.with_timezone(&Local).date_naive(),
            DayZone::Fixed(offset) => instant.with_timezone(&offset).date_naive(),
        }
    }

    /// First instant of `date`.
    pub fn midnight(&self, date: NaiveDate) -> DateTime<Utc> {
        match self.zone {
            DayZone::Local => first_instant(&Local, date),
            DayZone::Fixed(offset) => first_instant(&offset, date),
        }
    }

    /// First instant of the day containing `now`.
    pub fn start_of_day(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.midnight(self.local_date(now))
    }

    /// Last representable instant of the day containing `now`.
    pub fn end_of_day(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.due_date(now, 1) - Duration::nanoseconds(1)
    }

    /// Midnight starting the day `days` calendar days after the one containing `now`.
    ///
    /// Counted in calendar days rather than 24-hour steps, so DST shifts do not
    /// move due dates off midnight.
    pub fn due_date(&self, now: DateTime<Utc>, days: u64) -> DateTime<Utc> {
        let today = self.local_date(now);
        let target = today.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX);
        self.midnight(target)
    }
}

/// Earliest instant on `date` in `tz`.
///
/// Zones that skip midnight on DST days start those days at the first valid
/// local time.
fn first_instant<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    (0..=24 * 4)
        .filter_map(|quarter| midnight.checked_add_signed(Duration::minutes(15 * quarter)))
        .find_map(|local| tz.from_local_datetime(&local).earliest())
        .map(|instant| instant.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
}
