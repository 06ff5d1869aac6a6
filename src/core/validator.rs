use crate::core::interval::{Span, first_gap};
use crate::core::resolver::{EffectiveDayAvailability, RuleResolver};
use crate::core::types::TimeFormat;
use crate::errors::{Error, Result};
use crate::extensions::chrono::NaiveDateExt;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

pub const NO_SCHEDULE_REASON: &str = "no availability schedule set";

/// Candidate `[start, end)` in the spot's local time, minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingRequest {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

/// The part of a request that falls on one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySegment {
    pub date: NaiveDate,
    pub span: Span,
}

fn truncate_to_minute(t: NaiveDateTime) -> NaiveDateTime {
    t.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(t)
}

impl BookingRequest {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        let start = truncate_to_minute(start);
        let end = truncate_to_minute(end);
        if start >= end {
            return Err(Error::InvalidRequest(format!(
                "end {} must be after start {}",
                end.format("%Y-%m-%d %H:%M"),
                start.format("%Y-%m-%d %H:%M")
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Split at every local midnight the request crosses.
    pub fn segments(&self) -> Result<Vec<DaySegment>> {
        let mut out = Vec::new();
        let mut cursor = self.start;
        while cursor < self.end {
            let date = cursor.date();
            let next_midnight = date
                .succ_opt()
                .ok_or_else(|| Error::InvalidRequest(format!("date {date} is out of range")))?
                .and_time(NaiveTime::MIN);
            let seg_end = self.end.min(next_midnight);
            let end_minutes = if seg_end == next_midnight {
                1440
            } else {
                minutes_of(seg_end)
            };
            out.push(DaySegment {
                date,
                span: Span::from_minutes(minutes_of(cursor), end_minutes)?,
            });
            cursor = seg_end;
        }
        Ok(out)
    }
}

fn minutes_of(t: NaiveDateTime) -> u16 {
    (t.hour() * 60 + t.minute()) as u16
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid { reason: String, date: NaiveDate },
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid { reason, .. } => Some(reason),
        }
    }
}

/// Hook for callers that want to trace each day a request touches.
pub trait ValidationObserver {
    fn segment_checked(&self, segment: &DaySegment, day: &EffectiveDayAvailability, covered: bool);
}

pub struct NoopObserver;

impl ValidationObserver for NoopObserver {
    fn segment_checked(&self, _: &DaySegment, _: &EffectiveDayAvailability, _: bool) {}
}

/// Advisory pre-check of a booking against a spot's availability. It cannot
/// see other in-flight reservations; the booking store has the final word.
pub struct BookingValidator<'a> {
    resolver: &'a RuleResolver,
    observer: &'a dyn ValidationObserver,
    style: TimeFormat,
}

impl<'a> BookingValidator<'a> {
    pub fn new(resolver: &'a RuleResolver) -> Self {
        Self {
            resolver,
            observer: &NoopObserver,
            style: TimeFormat::H24,
        }
    }

    pub fn with_observer(mut self, observer: &'a dyn ValidationObserver) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_time_format(mut self, style: TimeFormat) -> Self {
        self.style = style;
        self
    }

    pub fn validate(&self, request: &BookingRequest) -> Result<ValidationResult> {
        if !self.resolver.has_any_schedule() {
            return Ok(ValidationResult::Invalid {
                reason: NO_SCHEDULE_REASON.to_string(),
                date: request.start().date(),
            });
        }

        for segment in request.segments()? {
            let day = self.resolver.resolve(segment.date);
            let open = day.available_spans();
            let gap = first_gap(&open, &segment.span);
            self.observer.segment_checked(&segment, &day, gap.is_none());

            let Some(gap) = gap else {
                continue;
            };
            return Ok(ValidationResult::Invalid {
                reason: self.reason_for(&day, &open, gap.format(self.style)),
                date: segment.date,
            });
        }
        Ok(ValidationResult::Valid)
    }

    fn reason_for(&self, day: &EffectiveDayAvailability, open: &[Span], at: String) -> String {
        let weekday = day.weekday();
        if day.is_unset() {
            return format!("not available on {}", weekday.plural());
        }
        if open.is_empty() {
            return format!("not available on {} {}", weekday, day.date.iso());
        }
        let hours = open
            .iter()
            .map(|s| s.format(self.style))
            .collect::<Vec<_>>()
            .join(", ");
        format!("Selected time on {weekday} ({at}) is outside available hours: {hours}")
    }
}

pub fn validate(resolver: &RuleResolver, request: &BookingRequest) -> Result<ValidationResult> {
    BookingValidator::new(resolver).validate(request)
}
