use crate::core::types::{MINUTES_PER_DAY, TimeFormat, TimeOfDay};
use crate::errors::{Error, Result, require_parse};
use std::fmt;

/// Half-open `[start, end)` within one day.
///
/// Construction is the only place bounds are checked: a `Span` that exists is
/// valid, so nothing downstream re-validates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl Span {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self> {
        let (s, e) = (start.minutes(), end.minutes());
        if s >= MINUTES_PER_DAY {
            return Err(Error::invalid_interval(s, e, "start must be before 24:00"));
        }
        if e > MINUTES_PER_DAY {
            return Err(Error::invalid_interval(s, e, "end must not be after 24:00"));
        }
        if s >= e {
            return Err(Error::invalid_interval(s, e, "start must be before end"));
        }
        Ok(Self { start, end })
    }

    pub fn from_minutes(start: u16, end: u16) -> Result<Self> {
        if start > MINUTES_PER_DAY || end > MINUTES_PER_DAY {
            return Err(Error::invalid_interval(start, end, "bound outside 00:00-24:00"));
        }
        Self::new(TimeOfDay::new(start)?, TimeOfDay::new(end)?)
    }

    /// Build from clock bounds as a host writes them, where an end of `00:00`
    /// or `23:59` means end of day. Equal bounds are a zero-length window and
    /// are refused before that mapping, so `23:59-23:59` never becomes a minute.
    pub fn from_clock(start: TimeOfDay, end: TimeOfDay) -> Result<Self> {
        if start == end {
            return Err(Error::invalid_interval(
                start.minutes(),
                end.minutes(),
                "start must be before end",
            ));
        }
        Self::new(start, end.as_end_bound())
    }

    /// Parse `START-END`, e.g. `09:00-17:30` or `9AM-5PM`. Ends follow
    /// `from_clock`.
    pub fn parse(raw: &str) -> Result<Self> {
        let (start, end) = require_parse(
            raw.split_once('-'),
            format!(
                "Invalid time window: '{}'. Expected START-END, e.g. 09:00-17:00.",
                raw.trim()
            ),
        )?;
        Self::from_clock(TimeOfDay::parse(start)?, TimeOfDay::parse(end)?)
    }

    pub fn full_day() -> Self {
        Self {
            start: TimeOfDay::MIDNIGHT,
            end: TimeOfDay::END_OF_DAY,
        }
    }

    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    pub fn duration_minutes(&self) -> u16 {
        self.end.minutes() - self.start.minutes()
    }

    pub fn is_full_day(&self) -> bool {
        *self == Self::full_day()
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        overlaps(self, other)
    }

    pub fn contains(&self, point: TimeOfDay) -> bool {
        contains(self, point)
    }

    pub fn intersection(&self, other: &Span) -> Option<Span> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start < end).then_some(Span { start, end })
    }

    pub fn format(&self, style: TimeFormat) -> String {
        format!("{} - {}", self.start.format(style), self.end.format(style))
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(TimeFormat::H24))
    }
}

/// A span tagged open or closed, with an optional per-hour rate that
/// overrides the spot's base price while it applies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub span: Span,
    pub available: bool,
    pub rate: Option<f64>,
}

impl Interval {
    pub fn open(span: Span) -> Self {
        Self {
            span,
            available: true,
            rate: None,
        }
    }

    pub fn blocked(span: Span) -> Self {
        Self {
            span,
            available: false,
            rate: None,
        }
    }

    pub fn with_rate(mut self, rate: Option<f64>) -> Self {
        self.rate = rate;
        self
    }

    fn same_tag(&self, other: &Interval) -> bool {
        self.available == other.available && self.rate == other.rate
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.span)?;
        if !self.available {
            write!(f, " (blocked)")?;
        } else if let Some(rate) = self.rate {
            write!(f, " @ {rate:.2}/h")?;
        }
        Ok(())
    }
}

/// Strict half-open overlap; touching at a boundary does not count.
pub fn overlaps(a: &Span, b: &Span) -> bool {
    a.start < b.end && b.start < a.end
}

pub fn contains(span: &Span, point: TimeOfDay) -> bool {
    span.start <= point && point < span.end
}

/// Sort and merge overlapping or touching spans into a disjoint list.
pub fn merge_spans(spans: &[Span]) -> Vec<Span> {
    let mut sorted = spans.to_vec();
    sorted.sort();
    let mut merged: Vec<Span> = Vec::with_capacity(sorted.len());
    for span in sorted {
        if let Some(last) = merged.last_mut()
            && span.start <= last.end
        {
            last.end = last.end.max(span.end);
            continue;
        }
        merged.push(span);
    }
    merged
}

/// Remove every span in `to_remove` from `base`. Both inputs must be sorted
/// and disjoint (the output of `merge_spans`).
pub fn subtract(base: &[Span], to_remove: &[Span]) -> Vec<Span> {
    let mut result = Vec::new();
    let mut ri = 0;

    for b in base {
        let mut cursor = b.start;

        while ri < to_remove.len() && to_remove[ri].end <= cursor {
            ri += 1;
        }

        let mut j = ri;
        while j < to_remove.len() && to_remove[j].start < b.end {
            let r = &to_remove[j];
            if r.start > cursor {
                result.push(Span {
                    start: cursor,
                    end: r.start,
                });
            }
            cursor = cursor.max(r.end);
            j += 1;
        }

        if cursor < b.end {
            result.push(Span { start: cursor, end: b.end });
        }
    }

    result
}

/// First minute of `target` not covered by the union of `covering`, or
/// `None` when the target is fully covered.
pub fn first_gap(covering: &[Span], target: &Span) -> Option<TimeOfDay> {
    let mut cursor = target.start;
    for span in merge_spans(covering) {
        if span.end <= cursor {
            continue;
        }
        if span.start > cursor {
            break;
        }
        cursor = span.end;
        if cursor >= target.end {
            return None;
        }
    }
    Some(cursor)
}

/// True iff `target` lies inside the union of `covering` with no gaps.
/// Covering spans may chain boundary to boundary.
pub fn contains_range(covering: &[Span], target: &Span) -> bool {
    first_gap(covering, target).is_none()
}

/// Minimal sorted, non-overlapping form of a day's tagged intervals.
///
/// Touching or overlapping intervals with the same availability and rate are
/// merged. Where tags disagree, blocked time wins over open time, and between
/// open intervals with different rates the one starting first keeps the
/// shared minutes (ties go to input order). Rates on blocked time are dropped.
pub fn normalize(intervals: &[Interval]) -> Vec<Interval> {
    let blocked_spans: Vec<Span> = intervals
        .iter()
        .filter(|i| !i.available)
        .map(|i| i.span)
        .collect();
    let blocked = merge_spans(&blocked_spans);

    let mut open: Vec<&Interval> = intervals.iter().filter(|i| i.available).collect();
    open.sort_by_key(|i| i.span.start);

    let mut out: Vec<Interval> = blocked.iter().copied().map(Interval::blocked).collect();
    let mut claimed = blocked;
    for interval in open {
        for piece in subtract(&[interval.span], &claimed) {
            out.push(Interval::open(piece).with_rate(interval.rate));
        }
        claimed.push(interval.span);
        claimed = merge_spans(&claimed);
    }

    out.sort_by_key(|i| i.span.start);
    coalesce(out)
}

fn coalesce(sorted: Vec<Interval>) -> Vec<Interval> {
    let mut merged: Vec<Interval> = Vec::with_capacity(sorted.len());
    for interval in sorted {
        if let Some(last) = merged.last_mut()
            && interval.span.start <= last.span.end
            && last.same_tag(&interval)
        {
            last.span.end = last.span.end.max(interval.span.end);
            continue;
        }
        merged.push(interval);
    }
    merged
}
