use crate::core::interval::{Span, contains_range};
use crate::core::schedule::{RecurringRule, RecurringSchedule};
use crate::core::types::{DayOfWeek, MINUTES_PER_DAY};
use crate::errors::{Error, Result};
use strum::IntoEnumIterator;

/// Host-facing weekly grid: seven rows of fixed-length slots, each either
/// selected (open) or not. Converts to recurring rules by run-length
/// encoding contiguous selected slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyGrid {
    slot_minutes: u16,
    cells: Vec<Vec<bool>>,
}

impl WeeklyGrid {
    pub fn new(slot_minutes: u16) -> Result<Self> {
        if slot_minutes == 0 || MINUTES_PER_DAY % slot_minutes != 0 {
            return Err(Error::parse(format!(
                "Slot length {slot_minutes} must be a positive divisor of {MINUTES_PER_DAY} minutes."
            )));
        }
        let slots = (MINUTES_PER_DAY / slot_minutes) as usize;
        Ok(Self {
            slot_minutes,
            cells: vec![vec![false; slots]; 7],
        })
    }

    /// Rebuild a grid from a weekly schedule. A slot is selected when the
    /// day's open windows cover it completely.
    pub fn from_schedule(schedule: &RecurringSchedule, slot_minutes: u16) -> Result<Self> {
        let mut grid = Self::new(slot_minutes)?;
        for day in DayOfWeek::iter() {
            let Some(day_schedule) = schedule.day(day) else {
                continue;
            };
            let open = day_schedule.available_spans();
            for slot in 0..grid.slots_per_day() {
                if contains_range(&open, &grid.slot_span(slot)?) {
                    grid.cells[day.index() as usize][slot] = true;
                }
            }
        }
        Ok(grid)
    }

    pub fn slot_minutes(&self) -> u16 {
        self.slot_minutes
    }

    pub fn slots_per_day(&self) -> usize {
        self.cells[0].len()
    }

    fn slot_span(&self, slot: usize) -> Result<Span> {
        let start = slot as u16 * self.slot_minutes;
        Span::from_minutes(start, start + self.slot_minutes)
    }

    fn check_slot(&self, slot: usize) -> Result<()> {
        if slot >= self.slots_per_day() {
            return Err(Error::parse(format!(
                "Slot {slot} out of range; a day has {} slots.",
                self.slots_per_day()
            )));
        }
        Ok(())
    }

    pub fn is_selected(&self, day: DayOfWeek, slot: usize) -> bool {
        self.cells[day.index() as usize]
            .get(slot)
            .copied()
            .unwrap_or(false)
    }

    pub fn set(&mut self, day: DayOfWeek, slot: usize, selected: bool) -> Result<()> {
        self.check_slot(slot)?;
        self.cells[day.index() as usize][slot] = selected;
        Ok(())
    }

    pub fn toggle(&mut self, day: DayOfWeek, slot: usize) -> Result<()> {
        self.set(day, slot, !self.is_selected(day, slot))
    }

    /// Select or clear every slot that overlaps `span`.
    pub fn set_span(&mut self, day: DayOfWeek, span: &Span, selected: bool) -> Result<()> {
        for slot in 0..self.slots_per_day() {
            if self.slot_span(slot)?.overlaps(span) {
                self.cells[day.index() as usize][slot] = selected;
            }
        }
        Ok(())
    }

    pub fn clear_day(&mut self, day: DayOfWeek) {
        self.cells[day.index() as usize].fill(false);
    }

    /// One open rule per run of selected slots.
    pub fn to_rules(&self) -> Result<Vec<RecurringRule>> {
        let mut rules = Vec::new();
        for day in DayOfWeek::iter() {
            let row = &self.cells[day.index() as usize];
            let mut slot = 0;
            while slot < row.len() {
                if !row[slot] {
                    slot += 1;
                    continue;
                }
                let run_start = slot;
                while slot < row.len() && row[slot] {
                    slot += 1;
                }
                let span = Span::from_minutes(
                    run_start as u16 * self.slot_minutes,
                    slot as u16 * self.slot_minutes,
                )?;
                rules.push(RecurringRule::open(day, span));
            }
        }
        Ok(rules)
    }

    pub fn to_schedule(&self) -> Result<RecurringSchedule> {
        RecurringSchedule::from_rules(&self.to_rules()?)
    }

    /// Compact text row for one day: `#` selected, `.` free.
    pub fn render_row(&self, day: DayOfWeek) -> String {
        self.cells[day.index() as usize]
            .iter()
            .map(|c| if *c { '#' } else { '.' })
            .collect()
    }
}
