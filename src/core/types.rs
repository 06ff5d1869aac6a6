use crate::errors::{Error, Result};
use crate::extensions::enums::{parse_or_hint, valid_csv};
use crate::extensions::string::{ToClockToken, ToDashSeparators};
use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter as EnumIterDerive, EnumString};

pub const MINUTES_PER_DAY: u16 = 1440;

// =========
// TimeOfDay
// =========

/// Wall-clock minute within a day. `1440` is end-of-day and only valid as an
/// interval end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);
    pub const END_OF_DAY: TimeOfDay = TimeOfDay(MINUTES_PER_DAY);

    pub fn new(minutes: u16) -> Result<Self> {
        if minutes > MINUTES_PER_DAY {
            return Err(Error::parse(format!(
                "Time of day {minutes} is out of range; expected 0 to {MINUTES_PER_DAY} minutes."
            )));
        }
        Ok(TimeOfDay(minutes))
    }

    pub fn from_hm(hour: u16, minute: u16) -> Result<Self> {
        if minute >= 60 {
            return Err(Error::parse(format!("Invalid minute: {minute}.")));
        }
        Self::new(hour.saturating_mul(60).saturating_add(minute))
    }

    /// Seconds are dropped.
    pub fn from_naive_time(t: NaiveTime) -> Self {
        TimeOfDay((t.hour() * 60 + t.minute()) as u16)
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn is_end_of_day(self) -> bool {
        self.0 == MINUTES_PER_DAY
    }

    /// Canonical form of a value used as an interval END: the display
    /// spellings `23:59` and `00:00` both mean end of day.
    pub fn as_end_bound(self) -> Self {
        match self.0 {
            0 | 1439 => Self::END_OF_DAY,
            _ => self,
        }
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let mut token = raw.to_clock_token();
        if token == "24:00" || token == "24:00:00" {
            return Ok(Self::END_OF_DAY);
        }
        // chrono needs minutes to build a time: "2PM" becomes "2:00PM".
        if !token.contains(':')
            && let Some(idx) = token.find("AM").or_else(|| token.find("PM"))
        {
            token.insert_str(idx, ":00");
        }
        for f in ClockFormat::iter() {
            if let Ok(t) = NaiveTime::parse_from_str(&token, f.as_ref()) {
                return Ok(Self::from_naive_time(t));
            }
        }
        Err(Error::parse(format!(
            "Invalid time format: '{}'. {}",
            raw.trim(),
            ClockFormat::usage()
        )))
    }

    pub fn format(self, style: TimeFormat) -> String {
        let (h, m) = (self.0 / 60, self.0 % 60);
        match style {
            TimeFormat::H24 => format!("{h:02}:{m:02}"),
            TimeFormat::H12 => {
                let meridian = if h % 24 < 12 { "AM" } else { "PM" };
                let h12 = match h % 12 {
                    0 => 12,
                    other => other,
                };
                format!("{h12}:{m:02} {meridian}")
            }
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(TimeFormat::H24))
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<<S as Serializer>::Ok, <S as Serializer>::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<TimeOfDay, <D as Deserializer<'de>>::Error> {
        let s = String::deserialize(deserializer)?;
        TimeOfDay::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Accepted input spellings, tried in order.
#[derive(Copy, Clone, Debug, EnumIterDerive, AsRefStr)]
enum ClockFormat {
    #[strum(serialize = "%H:%M:%S")]
    Hms,
    #[strum(serialize = "%H:%M")]
    Hm,
    #[strum(serialize = "%-I:%M%p")]
    HmMeridian,
}

impl ClockFormat {
    fn usage() -> String {
        "Supported formats: 14:30, 14:30:00, 2:30PM, 2PM, 24:00".to_string()
    }
}

/// How times are rendered back to people.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum TimeFormat {
    #[default]
    #[strum(serialize = "24h")]
    #[serde(rename = "24h")]
    H24,
    #[strum(serialize = "12h")]
    #[serde(rename = "12h")]
    H12,
}

impl TimeFormat {
    pub fn try_from(s: &str) -> Result<Self> {
        parse_or_hint(s, "time format")
    }
}

// =========
// DayOfWeek
// =========

/// Day of week indexed the way the schedule store keys it: 0 = Sunday.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
)]
#[strum(ascii_case_insensitive)]
pub enum DayOfWeek {
    #[strum(to_string = "Sunday", serialize = "sun", serialize = "su")]
    Sun,
    #[strum(to_string = "Monday", serialize = "mon", serialize = "m")]
    Mon,
    #[strum(to_string = "Tuesday", serialize = "tue", serialize = "tu")]
    Tue,
    #[strum(to_string = "Wednesday", serialize = "wed", serialize = "w")]
    Wed,
    #[strum(to_string = "Thursday", serialize = "thu", serialize = "th")]
    Thu,
    #[strum(to_string = "Friday", serialize = "fri", serialize = "f")]
    Fri,
    #[strum(to_string = "Saturday", serialize = "sat", serialize = "sa")]
    Sat,
}

impl DayOfWeek {
    pub fn try_from(s: &str) -> Result<Self> {
        parse_or_hint(s, "day of week")
    }

    pub fn from_index(index: i64) -> Result<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| DayOfWeek::iter().nth(i))
            .ok_or(Error::UnknownDay(index))
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    /// "Sundays", for messages like "not available on Sundays".
    pub fn plural(self) -> String {
        format!("{self}s")
    }
}

impl Serialize for DayOfWeek {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<<S as Serializer>::Ok, <S as Serializer>::Error> {
        serializer.serialize_u8(self.index())
    }
}

impl<'de> Deserialize<'de> for DayOfWeek {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<DayOfWeek, <D as Deserializer<'de>>::Error> {
        let raw = i64::deserialize(deserializer)?;
        DayOfWeek::from_index(raw).map_err(serde::de::Error::custom)
    }
}

// ====
// Date
// ====

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Date(pub NaiveDate);

#[derive(Copy, Clone, Debug, EnumIterDerive, AsRefStr)]
enum DateFormat {
    #[strum(serialize = "%Y-%m-%d")]
    YmdDash,
    #[strum(serialize = "%m-%d-%Y")]
    MdYDash,
    #[strum(serialize = "%m-%d")]
    MdDash,
}

impl DateFormat {
    /// Year-less input is read as the current year.
    fn prepare(self, input: &str) -> (String, &'static str) {
        match self {
            DateFormat::MdDash => {
                let year = Local::now().date_naive().year();
                (format!("{year}-{input}"), "%Y-%m-%d")
            }
            DateFormat::YmdDash => (input.to_owned(), "%Y-%m-%d"),
            DateFormat::MdYDash => (input.to_owned(), "%m-%d-%Y"),
        }
    }
}

impl Date {
    pub fn usage() -> String {
        let today = Local::now().date_naive();
        let formats = DateFormat::iter()
            .map(|df| today.format(df.as_ref()).to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!("Supported formats: {}", formats)
    }

    pub fn try_from_str(input: &str) -> Result<Self> {
        let input = input.to_dash_separators();
        for f in DateFormat::iter() {
            let (text, pattern) = f.prepare(&input);
            if let Ok(date) = NaiveDate::parse_from_str(&text, pattern) {
                return Ok(Date(date));
            }
        }
        Err(Error::Parse(format!(
            "Invalid date format: '{}'. {}",
            input,
            Self::usage()
        )))
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Parse `"<date> <time>"` or `"<date>T<time>"` into a local date-time with
/// seconds dropped. `24:00` rolls over to the next day's midnight.
pub fn parse_local_datetime(raw: &str) -> Result<NaiveDateTime> {
    let raw = raw.trim();
    let (date_part, time_part) = raw
        .split_once('T')
        .or_else(|| raw.split_once(' '))
        .ok_or_else(|| {
            Error::parse(format!(
                "Invalid date-time: '{raw}'. Expected '<date> <time>', e.g. 2024-05-07 14:00."
            ))
        })?;
    let date = Date::try_from_str(date_part)?;
    let time = TimeOfDay::parse(time_part)?;
    Ok(date.0.and_time(NaiveTime::MIN) + Duration::minutes(time.minutes() as i64))
}

// ====
// Bool
// ====

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive)]
enum BoolFormat {
    #[strum(serialize = "true", serialize = "yes", serialize = "on", to_string = "True")]
    TextTrue,
    #[strum(serialize = "false", serialize = "no", serialize = "off", to_string = "False")]
    TextFalse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bool(pub bool);

impl Bool {
    pub fn try_from_str(s: &str) -> Result<Self> {
        match BoolFormat::from_str(s.trim()) {
            Ok(fmt) => Ok(Bool(matches!(fmt, BoolFormat::TextTrue))),
            Err(_) => Err(Error::Parse(format!(
                "Invalid string value for boolean: '{}'. Valid values: {}",
                s,
                valid_csv::<BoolFormat>()
            ))),
        }
    }
}

impl fmt::Display for Bool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", if self.0 { "True" } else { "False" })
    }
}

impl Serialize for Bool {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<<S as Serializer>::Ok, <S as Serializer>::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Bool {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Bool, <D as Deserializer<'de>>::Error> {
        let b = String::deserialize(deserializer)?;
        Bool::try_from_str(&b).map_err(serde::de::Error::custom)
    }
}
