use crate::core::types::DayOfWeek;
use chrono::{Datelike, NaiveDate, Weekday};

pub trait WeekdayExt {
    fn to_day_of_week(self) -> DayOfWeek;
}

impl WeekdayExt for Weekday {
    fn to_day_of_week(self) -> DayOfWeek {
        match self {
            Weekday::Sun => DayOfWeek::Sun,
            Weekday::Mon => DayOfWeek::Mon,
            Weekday::Tue => DayOfWeek::Tue,
            Weekday::Wed => DayOfWeek::Wed,
            Weekday::Thu => DayOfWeek::Thu,
            Weekday::Fri => DayOfWeek::Fri,
            Weekday::Sat => DayOfWeek::Sat,
        }
    }
}

pub trait NaiveDateExt {
    fn day_of_week(&self) -> DayOfWeek;
    /// ISO `YYYY-MM-DD`, the key overrides are stored under.
    fn iso(&self) -> String;
}

impl NaiveDateExt for NaiveDate {
    fn day_of_week(&self) -> DayOfWeek {
        self.weekday().to_day_of_week()
    }

    fn iso(&self) -> String {
        self.format("%Y-%m-%d").to_string()
    }
}
