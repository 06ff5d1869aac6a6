use crate::core::interval::{Interval, Span, normalize, overlaps};
use crate::core::types::{DayOfWeek, TimeOfDay};
use crate::errors::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;

fn default_true() -> bool {
    true
}

fn checked_rate(rate: Option<f64>) -> Result<Option<f64>> {
    match rate {
        Some(r) if !r.is_finite() || r < 0.0 => Err(Error::parse(format!(
            "Invalid custom rate: {r}. Rates must be finite and not negative."
        ))),
        other => Ok(other),
    }
}

// ================
// Store row shapes
// ================

/// One weekly rule as the schedule store keeps it. `day_of_week` stays raw so
/// an out-of-range index surfaces as `UnknownDay` when schedules are built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringRule {
    pub day_of_week: i64,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default)]
    pub custom_rate: Option<f64>,
}

impl RecurringRule {
    pub fn open(day: DayOfWeek, span: Span) -> Self {
        Self {
            day_of_week: day.index() as i64,
            start_time: span.start(),
            end_time: span.end(),
            is_available: true,
            custom_rate: None,
        }
    }

    pub fn day(&self) -> Result<DayOfWeek> {
        DayOfWeek::from_index(self.day_of_week)
    }

    pub fn to_interval(&self) -> Result<Interval> {
        let span = Span::from_clock(self.start_time, self.end_time)?;
        Ok(Interval {
            span,
            available: self.is_available,
            rate: checked_rate(self.custom_rate)?,
        })
    }
}

/// One date-specific override row. Null `start_time` and `end_time` cover
/// the whole day; several rows on the same date form a list of windows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateOverride {
    pub date: NaiveDate,
    pub is_available: bool,
    #[serde(default)]
    pub start_time: Option<TimeOfDay>,
    #[serde(default)]
    pub end_time: Option<TimeOfDay>,
    #[serde(default)]
    pub custom_rate: Option<f64>,
}

impl DateOverride {
    pub fn full_day(date: NaiveDate, is_available: bool) -> Self {
        Self {
            date,
            is_available,
            start_time: None,
            end_time: None,
            custom_rate: None,
        }
    }

    pub fn window(date: NaiveDate, span: Span, is_available: bool) -> Self {
        Self {
            date,
            is_available,
            start_time: Some(span.start()),
            end_time: Some(span.end()),
            custom_rate: None,
        }
    }

    pub fn with_rate(mut self, rate: f64) -> Self {
        self.custom_rate = Some(rate);
        self
    }

    pub fn to_interval(&self) -> Result<Interval> {
        let span = match (self.start_time, self.end_time) {
            (None, None) => Span::full_day(),
            (Some(start), Some(end)) => Span::from_clock(start, end)?,
            _ => {
                return Err(Error::parse(format!(
                    "Override on {} must set both start_time and end_time, or neither.",
                    self.date
                )));
            }
        };
        Ok(Interval {
            span,
            available: self.is_available,
            rate: checked_rate(self.custom_rate)?,
        })
    }
}

// ===========
// DaySchedule
// ===========

/// Normalized intervals for one weekday.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DaySchedule {
    intervals: Vec<Interval>,
}

impl DaySchedule {
    pub fn new(intervals: impl IntoIterator<Item = Interval>) -> Self {
        let raw: Vec<Interval> = intervals.into_iter().collect();
        Self {
            intervals: normalize(&raw),
        }
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn available_spans(&self) -> Vec<Span> {
        self.intervals
            .iter()
            .filter(|i| i.available)
            .map(|i| i.span)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Add a host block, refusing anything that overlaps a block already on
    /// the day.
    pub fn try_add(&mut self, interval: Interval) -> Result<()> {
        if let Some(existing) = self
            .intervals
            .iter()
            .find(|i| overlaps(&i.span, &interval.span))
        {
            return Err(Error::Overlap {
                new: interval.span.to_string(),
                existing: existing.span.to_string(),
            });
        }
        self.intervals.push(interval);
        self.intervals = normalize(&self.intervals);
        Ok(())
    }
}

// =================
// RecurringSchedule
// =================

/// Weekly schedule. Days without an entry have no recurring rule at all,
/// which is different from a day that is explicitly blocked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecurringSchedule {
    days: BTreeMap<DayOfWeek, DaySchedule>,
}

impl RecurringSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rules(rules: &[RecurringRule]) -> Result<Self> {
        let mut grouped: BTreeMap<DayOfWeek, Vec<Interval>> = BTreeMap::new();
        for rule in rules {
            grouped
                .entry(rule.day()?)
                .or_default()
                .push(rule.to_interval()?);
        }
        let days = grouped
            .into_iter()
            .map(|(day, intervals)| (day, DaySchedule::new(intervals)))
            .collect();
        Ok(Self { days })
    }

    pub fn day(&self, day: DayOfWeek) -> Option<&DaySchedule> {
        self.days.get(&day)
    }

    /// Look up a day by its store index (0 = Sunday).
    pub fn day_by_index(&self, index: i64) -> Result<Option<&DaySchedule>> {
        Ok(self.day(DayOfWeek::from_index(index)?))
    }

    /// Replace one day wholesale. An empty schedule removes the day.
    pub fn set_day(&mut self, day: DayOfWeek, schedule: DaySchedule) {
        if schedule.is_empty() {
            self.days.remove(&day);
        } else {
            self.days.insert(day, schedule);
        }
    }

    /// Copy `template` onto every day in `days`.
    pub fn apply_to_days(&mut self, days: &[DayOfWeek], template: &DaySchedule) {
        for day in days {
            self.set_day(*day, template.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.days.values().all(DaySchedule::is_empty)
    }

    /// Flatten back to store rows, Sunday first.
    pub fn to_rules(&self) -> Vec<RecurringRule> {
        let mut rules = Vec::new();
        for day in DayOfWeek::iter() {
            let Some(schedule) = self.days.get(&day) else {
                continue;
            };
            for interval in schedule.intervals() {
                rules.push(RecurringRule {
                    day_of_week: day.index() as i64,
                    start_time: interval.span.start(),
                    end_time: interval.span.end(),
                    is_available: interval.available,
                    custom_rate: interval.rate,
                });
            }
        }
        rules
    }
}
