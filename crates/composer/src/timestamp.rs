//! Dynamic timestamp tokens (`<t:UNIX:STYLE>`) that the chat client expands in
//! each viewer's own time zone.

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use thiserror::Error;

/// Time used when the form leaves the time input empty.
pub const DEFAULT_TIME: &str = "12:00";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimestampError {
    #[error("invalid date `{0}`, expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("invalid time `{0}`, expected HH:MM")]
    InvalidTime(String),
    #[error("{0} does not exist in the selected time zone")]
    NonexistentLocalTime(NaiveDateTime),
    #[error("unknown timestamp style `{0}`, expected one of t, T, d, D, f, F, R")]
    UnknownStyle(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TimestampStyle {
    ShortTime,
    LongTime,
    ShortDate,
    LongDate,
    #[default]
    ShortDateTime,
    LongDateTime,
    Relative,
}

impl TimestampStyle {
    pub const ALL: [TimestampStyle; 7] = [
        TimestampStyle::ShortTime,
        TimestampStyle::LongTime,
        TimestampStyle::ShortDate,
        TimestampStyle::LongDate,
        TimestampStyle::ShortDateTime,
        TimestampStyle::LongDateTime,
        TimestampStyle::Relative,
    ];

    pub fn code(self) -> char {
        match self {
            TimestampStyle::ShortTime => 't',
            TimestampStyle::LongTime => 'T',
            TimestampStyle::ShortDate => 'd',
            TimestampStyle::LongDate => 'D',
            TimestampStyle::ShortDateTime => 'f',
            TimestampStyle::LongDateTime => 'F',
            TimestampStyle::Relative => 'R',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        Self::ALL.into_iter().find(|style| style.code() == code)
    }

    pub fn label(self) -> &'static str {
        match self {
            TimestampStyle::ShortTime => "Short Time",
            TimestampStyle::LongTime => "Long Time",
            TimestampStyle::ShortDate => "Short Date",
            TimestampStyle::LongDate => "Long Date",
            TimestampStyle::ShortDateTime => "Short Date/Time",
            TimestampStyle::LongDateTime => "Long Date/Time",
            TimestampStyle::Relative => "Relative Time",
        }
    }

    pub fn example(self) -> &'static str {
        match self {
            TimestampStyle::ShortTime => "16:20",
            TimestampStyle::LongTime => "16:20:30",
            TimestampStyle::ShortDate => "20/04/2021",
            TimestampStyle::LongDate => "20 April 2021",
            TimestampStyle::ShortDateTime => "20 April 2021 16:20",
            TimestampStyle::LongDateTime => "Tuesday, 20 April 2021 16:20",
            TimestampStyle::Relative => "2 months ago",
        }
    }

    /// What a viewer at `now` sees in place of a token for `instant`.
    pub fn render<Tz>(self, instant: &DateTime<Tz>, now: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let pattern = match self {
            TimestampStyle::ShortTime => "%H:%M",
            TimestampStyle::LongTime => "%H:%M:%S",
            TimestampStyle::ShortDate => "%d/%m/%Y",
            TimestampStyle::LongDate => "%-d %B %Y",
            TimestampStyle::ShortDateTime => "%-d %B %Y %H:%M",
            TimestampStyle::LongDateTime => "%A, %-d %B %Y %H:%M",
            TimestampStyle::Relative => {
                return relative(instant.timestamp() - now.timestamp());
            }
        };
        instant.format(pattern).to_string()
    }
}

impl fmt::Display for TimestampStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for TimestampStyle {
    type Err = TimestampError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut chars = raw.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(code), None) => {
                Self::from_code(code).ok_or_else(|| TimestampError::UnknownStyle(raw.to_string()))
            }
            _ => Err(TimestampError::UnknownStyle(raw.to_string())),
        }
    }
}

fn relative(delta_seconds: i64) -> String {
    const MINUTE: u64 = 60;
    const HOUR: u64 = 60 * MINUTE;
    const DAY: u64 = 24 * HOUR;

    let magnitude = delta_seconds.unsigned_abs();
    let rounded = |unit: u64| (magnitude + unit / 2) / unit;
    let phrase = match magnitude {
        0..=44 => "a few seconds".to_string(),
        45..=89 => "a minute".to_string(),
        m if m < 45 * MINUTE => format!("{} minutes", rounded(MINUTE)),
        m if m < 90 * MINUTE => "an hour".to_string(),
        m if m < 22 * HOUR => format!("{} hours", rounded(HOUR)),
        m if m < 36 * HOUR => "a day".to_string(),
        m if m < 26 * DAY => format!("{} days", rounded(DAY)),
        m if m < 45 * DAY => "a month".to_string(),
        m if m < 320 * DAY => format!("{} months", rounded(30 * DAY)),
        m if m < 548 * DAY => "a year".to_string(),
        _ => format!("{} years", rounded(365 * DAY)),
    };

    if delta_seconds >= 0 {
        format!("in {phrase}")
    } else {
        format!("{phrase} ago")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimestampToken {
    unix_seconds: i64,
    style: TimestampStyle,
}

impl TimestampToken {
    pub fn new<Tz: TimeZone>(instant: &DateTime<Tz>, style: TimestampStyle) -> Self {
        Self {
            unix_seconds: instant.timestamp(),
            style,
        }
    }

    /// Resolves a wall-clock date and time in `tz`. For ambiguous local times
    /// (clocks going back) the earlier instant wins.
    pub fn from_local<Tz: TimeZone>(
        date: NaiveDate,
        time: NaiveTime,
        style: TimestampStyle,
        tz: &Tz,
    ) -> Result<Self, TimestampError> {
        let naive = date.and_time(time);
        let instant = tz
            .from_local_datetime(&naive)
            .earliest()
            .ok_or(TimestampError::NonexistentLocalTime(naive))?;
        Ok(Self::new(&instant, style))
    }

    pub fn unix_seconds(&self) -> i64 {
        self.unix_seconds
    }

    pub fn style(&self) -> TimestampStyle {
        self.style
    }

    pub fn instant(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.unix_seconds, 0)
    }

    /// The token expanded for a viewer in `tz` at `now`.
    pub fn preview<Tz>(&self, tz: &Tz, now: &DateTime<Tz>) -> Option<String>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let instant = self.instant()?.with_timezone(tz);
        Some(self.style.render(&instant, now))
    }
}

impl fmt::Display for TimestampToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<t:{}:{}>", self.unix_seconds, self.style.code())
    }
}

fn parse_time(raw: &str) -> Result<NaiveTime, TimestampError> {
    let raw = raw.trim();
    let raw = if raw.is_empty() { DEFAULT_TIME } else { raw };
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .map_err(|_| TimestampError::InvalidTime(raw.to_string()))
}

/// Builds a token from the form's date (`YYYY-MM-DD`) and time (`HH:MM`) inputs.
///
/// An empty date means the user has not picked one yet and yields `Ok(None)`.
pub fn generate<Tz: TimeZone>(
    date: &str,
    time: &str,
    style: TimestampStyle,
    tz: &Tz,
) -> Result<Option<TimestampToken>, TimestampError> {
    let date = date.trim();
    if date.is_empty() {
        return Ok(None);
    }
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| TimestampError::InvalidDate(date.to_string()))?;
    let time = parse_time(time)?;
    TimestampToken::from_local(date, time, style, tz).map(Some)
}
