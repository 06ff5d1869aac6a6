mod store_tests;

use crate::core::interval::{Interval, Span};
use crate::core::schedule::{DateOverride, RecurringRule};
use crate::core::types::{DayOfWeek, TimeOfDay};
use crate::core::validator::BookingRequest;
use crate::core::types::parse_local_datetime;
use chrono::NaiveDate;

pub(super) fn t(raw: &str) -> TimeOfDay {
    TimeOfDay::parse(raw).unwrap()
}

pub(super) fn span(start: &str, end: &str) -> Span {
    Span::new(t(start), t(end)).unwrap()
}

pub(super) fn open(start: &str, end: &str) -> Interval {
    Interval::open(span(start, end))
}

pub(super) fn blocked(start: &str, end: &str) -> Interval {
    Interval::blocked(span(start, end))
}

pub(super) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// 2024-05-05 is a Sunday, so 05-06 is Monday and 05-07 Tuesday.
pub(super) fn sunday() -> NaiveDate {
    date(2024, 5, 5)
}

pub(super) fn monday() -> NaiveDate {
    date(2024, 5, 6)
}

pub(super) fn tuesday() -> NaiveDate {
    date(2024, 5, 7)
}

pub(super) fn rule(day: DayOfWeek, start: &str, end: &str) -> RecurringRule {
    RecurringRule::open(day, span(start, end))
}

pub(super) fn blocked_on(d: NaiveDate) -> DateOverride {
    DateOverride::full_day(d, false)
}

pub(super) fn request(start: &str, end: &str) -> BookingRequest {
    BookingRequest::new(
        parse_local_datetime(start).unwrap(),
        parse_local_datetime(end).unwrap(),
    )
    .unwrap()
}
