use crate::core::interval::{Interval, Span, normalize};
use crate::core::schedule::{DateOverride, RecurringRule, RecurringSchedule};
use crate::core::types::{DayOfWeek, TimeFormat};
use crate::extensions::chrono::NaiveDateExt;
use crate::errors::Result;
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;
use std::fmt;

/// Where a day's effective hours came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleSource {
    Override,
    Recurring,
    Unset,
}

impl fmt::Display for ScheduleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleSource::Override => write!(f, "override"),
            ScheduleSource::Recurring => write!(f, "weekly"),
            ScheduleSource::Unset => write!(f, "unset"),
        }
    }
}

/// Resolved open/closed windows for one concrete date. Computed on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveDayAvailability {
    pub date: NaiveDate,
    pub source: ScheduleSource,
    pub intervals: Vec<Interval>,
}

impl EffectiveDayAvailability {
    pub fn weekday(&self) -> DayOfWeek {
        self.date.day_of_week()
    }

    pub fn is_unset(&self) -> bool {
        self.source == ScheduleSource::Unset
    }

    pub fn available(&self) -> impl Iterator<Item = &Interval> {
        self.intervals.iter().filter(|i| i.available)
    }

    pub fn available_spans(&self) -> Vec<Span> {
        self.available().map(|i| i.span).collect()
    }

    pub fn is_blocked_all_day(&self) -> bool {
        matches!(self.intervals.as_slice(), [only] if !only.available && only.span.is_full_day())
    }

    /// One-line description of the day for display next to a calendar cell.
    pub fn summary(&self, style: TimeFormat) -> String {
        if self.is_unset() {
            return "No schedule set".to_string();
        }
        if self.is_blocked_all_day() {
            return "Blocked all day".to_string();
        }
        let open: Vec<String> = self
            .available()
            .map(|i| match i.rate {
                Some(rate) => format!("{} @ {rate:.2}/h", i.span.format(style)),
                None => i.span.format(style),
            })
            .collect();
        if open.is_empty() {
            "Unavailable".to_string()
        } else {
            open.join(", ")
        }
    }
}

/// Weekly rules plus date overrides, grouped for lookups by date.
#[derive(Debug, Clone, Default)]
pub struct RuleResolver {
    recurring: RecurringSchedule,
    overrides: BTreeMap<NaiveDate, Vec<Interval>>,
}

impl RuleResolver {
    pub fn new(recurring: RecurringSchedule, overrides: &[DateOverride]) -> Result<Self> {
        let mut grouped: BTreeMap<NaiveDate, Vec<Interval>> = BTreeMap::new();
        for row in overrides {
            grouped.entry(row.date).or_default().push(row.to_interval()?);
        }
        Ok(Self {
            recurring,
            overrides: grouped,
        })
    }

    pub fn from_rules(rules: &[RecurringRule], overrides: &[DateOverride]) -> Result<Self> {
        Self::new(RecurringSchedule::from_rules(rules)?, overrides)
    }

    pub fn recurring(&self) -> &RecurringSchedule {
        &self.recurring
    }

    pub fn has_any_schedule(&self) -> bool {
        !self.recurring.is_empty() || !self.overrides.is_empty()
    }

    /// Overrides on `date` replace the weekly rule for that date outright;
    /// they are never merged with it.
    pub fn resolve(&self, date: NaiveDate) -> EffectiveDayAvailability {
        if let Some(rows) = self.overrides.get(&date)
            && !rows.is_empty()
        {
            return EffectiveDayAvailability {
                date,
                source: ScheduleSource::Override,
                intervals: normalize(rows),
            };
        }

        match self.recurring.day(date.day_of_week()) {
            Some(day) if !day.is_empty() => EffectiveDayAvailability {
                date,
                source: ScheduleSource::Recurring,
                intervals: day.intervals().to_vec(),
            },
            _ => EffectiveDayAvailability {
                date,
                source: ScheduleSource::Unset,
                intervals: Vec::new(),
            },
        }
    }

    /// `days` consecutive dates starting at `start`.
    pub fn resolve_days(&self, start: NaiveDate, days: u32) -> Vec<EffectiveDayAvailability> {
        (0..days)
            .map(|offset| self.resolve(start + Duration::days(offset as i64)))
            .collect()
    }
}

/// One-shot resolution without keeping a resolver around.
pub fn resolve(
    recurring: &RecurringSchedule,
    overrides: &[DateOverride],
    date: NaiveDate,
) -> Result<EffectiveDayAvailability> {
    let on_date: Vec<DateOverride> = overrides
        .iter()
        .filter(|o| o.date == date)
        .cloned()
        .collect();
    Ok(RuleResolver::new(recurring.clone(), &on_date)?.resolve(date))
}
