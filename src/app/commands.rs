use std::io::Write;

use chrono::NaiveDateTime;

use crate::app::cli::{Command, GridEdit, usage};
use crate::app::context::AppContext;
use crate::app::observer::LoggingObserver;
use crate::core::grid::WeeklyGrid;
use crate::core::interval::{Interval, Span};
use crate::core::pricing::quote;
use crate::core::schedule::{DateOverride, DaySchedule};
use crate::core::validator::{BookingRequest, BookingValidator, ValidationResult};
use crate::errors::Result;
use crate::extensions::chrono::NaiveDateExt;
use crate::logging::LogTarget;
use crate::ui::ansi::Painter;
use crate::ui::table::{Table, TablePrinter};
use crate::ui::views::ViewBuilder;

/// Exit status for a command that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// A booking check found the request outside the spot's hours.
    Rejected,
}

impl Outcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Done => 0,
            Outcome::Rejected => 2,
        }
    }
}

pub struct Dispatcher<'a, W: Write> {
    ctx: &'a mut AppContext,
    out: &'a mut W,
    painter: Painter,
}

impl<'a, W: Write> Dispatcher<'a, W> {
    pub fn new(ctx: &'a mut AppContext, out: &'a mut W, painter: Painter) -> Self {
        Self { ctx, out, painter }
    }

    fn views(&self) -> ViewBuilder {
        ViewBuilder::new(self.ctx.config.time_format(), self.painter)
    }

    fn print(&mut self, table: &Table) -> Result<()> {
        TablePrinter::new().render(table, &mut *self.out)?;
        Ok(())
    }

    pub fn execute(&mut self, command: &Command) -> Result<Outcome> {
        match command {
            Command::Day(date) => {
                let resolver = self.ctx.load_spot()?.resolver()?;
                let table = self.views().day_table(&resolver.resolve(*date));
                self.print(&table)?;
            }
            Command::Week(start) => {
                let resolver = self.ctx.load_spot()?.resolver()?;
                let days = resolver.resolve_days(*start, self.ctx.config.view_days());
                let table = self.views().week_table(&days);
                self.print(&table)?;
            }
            Command::Check { start, end } => return self.check(*start, *end),
            Command::Grid { edit: None } => {
                let recurring = self.ctx.load_spot()?.recurring()?;
                let grid = WeeklyGrid::from_schedule(&recurring, self.ctx.config.slot_minutes())?;
                let table = self.views().grid_table(&grid);
                self.print(&table)?;
            }
            Command::Grid { edit: Some(edit) } => self.edit_grid(edit)?,
            Command::Apply { days, spans } => {
                let mut spot = self.ctx.load_spot()?;
                let mut recurring = spot.recurring()?;
                let mut template = DaySchedule::default();
                for span in spans {
                    template.try_add(Interval::open(*span))?;
                }
                recurring.apply_to_days(days, &template);
                spot.replace_recurring(&recurring);
                self.ctx.save_spot(&spot)?;

                let names: Vec<String> = days.iter().map(|d| d.to_string()).collect();
                self.ctx.logger.info(
                    format!(
                        "Weekly hours for {} set to {}",
                        names.join(", "),
                        self.spans_text(spans)
                    ),
                    LogTarget::ConsoleAndFile,
                );
            }
            Command::Block { date, span } => {
                let row = match span {
                    Some(span) => DateOverride::window(*date, *span, false),
                    None => DateOverride::full_day(*date, false),
                };
                self.push_override(row)?;
            }
            Command::Open { date, span, rate } => {
                let mut row = DateOverride::window(*date, *span, true);
                if let Some(rate) = rate {
                    row = row.with_rate(*rate);
                }
                self.push_override(row)?;
            }
            Command::Config { edits } if edits.is_empty() => {
                let table = self.views().config_table(&self.ctx.config.rows());
                self.print(&table)?;
            }
            Command::Config { edits } => self.edit_config(edits)?,
            Command::Help => writeln!(self.out, "{}", usage())?,
        }
        Ok(Outcome::Done)
    }

    fn spans_text(&self, spans: &[Span]) -> String {
        let style = self.ctx.config.time_format();
        spans
            .iter()
            .map(|s| s.format(style))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn check(&mut self, start: NaiveDateTime, end: NaiveDateTime) -> Result<Outcome> {
        let request = BookingRequest::new(start, end)?;
        let resolver = self.ctx.load_spot()?.resolver()?;
        let style = self.ctx.config.time_format();
        let observer = LoggingObserver::new(&self.ctx.logger, style);
        let result = BookingValidator::new(&resolver)
            .with_observer(&observer)
            .with_time_format(style)
            .validate(&request)?;

        match result {
            ValidationResult::Valid => {
                writeln!(self.out, "OK")?;
                let q = quote(&resolver, &request, self.ctx.config.base_hourly_rate())?;
                let table = self.views().quote_table(&q);
                self.print(&table)?;
                Ok(Outcome::Done)
            }
            ValidationResult::Invalid { reason, date } => {
                writeln!(self.out, "Not available: {reason}")?;
                self.ctx.logger.debug(
                    format!("Booking rejected on {}: {reason}", date.iso()),
                    LogTarget::FileOnly,
                );
                Ok(Outcome::Rejected)
            }
        }
    }

    fn push_override(&mut self, row: DateOverride) -> Result<()> {
        let mut spot = self.ctx.load_spot()?;
        let date = row.date;
        spot.push_override(row)?;
        self.ctx.save_spot(&spot)?;

        let day = spot.resolver()?.resolve(date);
        self.ctx.logger.info(
            format!(
                "{} {} now: {}",
                date.iso(),
                day.weekday(),
                day.summary(self.ctx.config.time_format())
            ),
            LogTarget::ConsoleAndFile,
        );
        Ok(())
    }

    /// Edit the weekly hours through the slot grid. Only the listed days are
    /// rewritten; their hours snap to slot boundaries and lose custom rates.
    fn edit_grid(&mut self, edit: &GridEdit) -> Result<()> {
        let mut spot = self.ctx.load_spot()?;
        let mut recurring = spot.recurring()?;
        let mut grid = WeeklyGrid::from_schedule(&recurring, self.ctx.config.slot_minutes())?;

        for day in edit.days() {
            match edit {
                GridEdit::Select { spans, .. } => {
                    for span in spans {
                        grid.set_span(*day, span, true)?;
                    }
                }
                GridEdit::Toggle { slots, .. } => {
                    for slot in slots {
                        grid.toggle(*day, *slot)?;
                    }
                }
                GridEdit::Clear { .. } => grid.clear_day(*day),
            }
        }

        let edited = grid.to_schedule()?;
        for day in edit.days() {
            recurring.set_day(*day, edited.day(*day).cloned().unwrap_or_default());
        }
        spot.replace_recurring(&recurring);
        self.ctx.save_spot(&spot)?;

        for day in edit.days() {
            let hours = match recurring.day(*day) {
                Some(schedule) => self.spans_text(&schedule.available_spans()),
                None => "none".to_string(),
            };
            self.ctx.logger.info(
                format!("Weekly hours for {day} set to {hours}"),
                LogTarget::ConsoleAndFile,
            );
        }
        let table = self.views().grid_table(&grid);
        self.print(&table)
    }

    fn edit_config(&mut self, edits: &[(String, String)]) -> Result<()> {
        match edits {
            [(key, value)] => match key.trim().parse::<usize>() {
                Ok(id) => self.ctx.config.set_by_index(id, value)?,
                Err(_) => self.ctx.config.set(key, value)?,
            },
            _ => {
                let before = self.ctx.config.rows();
                self.ctx.config.set_many(edits.iter().map(|(k, v)| (k, v)))?;
                let after = self.ctx.config.rows();
                for ((key, _, old), (_, _, new)) in before.iter().zip(after.iter()) {
                    if old != new {
                        self.ctx.logger.info(
                            format!("Updated {key}: {old} -> {new}"),
                            LogTarget::ConsoleAndFile,
                        );
                    }
                }
            }
        }
        self.ctx
            .logger
            .set_file_logging_enabled(self.ctx.config.file_logging_enabled());
        if let Some((key, old, new)) = self.ctx.config.take_last_change() {
            self.ctx.logger.info(
                format!("Updated {key}: {old} -> {new}"),
                LogTarget::ConsoleAndFile,
            );
        }
        Ok(())
    }
}
