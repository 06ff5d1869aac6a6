use crate::config::ConfigRows;
use crate::core::grid::WeeklyGrid;
use crate::core::pricing::Quote;
use crate::core::resolver::{EffectiveDayAvailability, ScheduleSource};
use crate::core::types::{DayOfWeek, TimeFormat};
use crate::extensions::chrono::NaiveDateExt;
use crate::ui::ansi::{FG_GRAY, FG_GREEN, FG_RED, FG_YELLOW, Painter};
use crate::ui::table::Table;
use strum::IntoEnumIterator;

/// Turns resolved schedules into printable tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewBuilder {
    style: TimeFormat,
    painter: Painter,
}

impl ViewBuilder {
    pub fn new(style: TimeFormat, painter: Painter) -> Self {
        Self { style, painter }
    }

    fn source_label(&self, source: ScheduleSource) -> String {
        match source {
            ScheduleSource::Override => self.painter.paint(FG_YELLOW, source.to_string()),
            ScheduleSource::Recurring => source.to_string(),
            ScheduleSource::Unset => self.painter.paint(FG_GRAY, source.to_string()),
        }
    }

    pub fn day_table(&self, day: &EffectiveDayAvailability) -> Table {
        let title = format!("{} {} ({})", day.date.iso(), day.weekday(), day.source);
        let rows = day
            .intervals
            .iter()
            .map(|i| {
                let status = if i.available {
                    self.painter.paint(FG_GREEN, "open")
                } else {
                    self.painter.paint(FG_RED, "blocked")
                };
                vec![
                    i.span.start().format(self.style),
                    i.span.end().format(self.style),
                    status,
                    i.rate.map(|r| format!("{r:.2}/h")).unwrap_or_else(|| "-".into()),
                ]
            })
            .collect();
        Table::new(title, &["FROM", "TO", "STATUS", "RATE"])
            .with_rows(rows)
            .with_empty_message("No schedule set")
    }

    pub fn week_table(&self, days: &[EffectiveDayAvailability]) -> Table {
        let title = match (days.first(), days.last()) {
            (Some(first), Some(last)) => format!(
                "Availability {} to {}",
                first.date.iso(),
                last.date.iso()
            ),
            _ => "Availability".to_string(),
        };
        let rows = days
            .iter()
            .map(|d| {
                vec![
                    d.date.iso(),
                    d.weekday().to_string(),
                    self.source_label(d.source),
                    d.summary(self.style),
                ]
            })
            .collect();
        Table::new(title, &["DATE", "DAY", "SOURCE", "HOURS"]).with_rows(rows)
    }

    pub fn quote_table(&self, quote: &Quote) -> Table {
        let mut rows: Vec<Vec<String>> = quote
            .lines
            .iter()
            .map(|l| {
                vec![
                    l.date.iso(),
                    l.span.format(self.style),
                    format!("{:.2}/h", l.hourly_rate),
                    format!("{:.2}", l.amount),
                ]
            })
            .collect();
        rows.push(vec![
            "TOTAL".to_string(),
            format_minutes(quote.minutes),
            String::new(),
            format!("{:.2}", quote.total),
        ]);
        Table::new("Quote", &["DATE", "TIME", "RATE", "AMOUNT"]).with_rows(rows)
    }

    pub fn config_table(&self, rows: &ConfigRows) -> Table {
        let rows = rows
            .iter()
            .enumerate()
            .map(|(i, (key, desc, value))| {
                vec![i.to_string(), key.clone(), value.clone(), desc.clone()]
            })
            .collect();
        Table::new("Config", &["ID", "KEY", "VALUE", "DESCRIPTION"]).with_rows(rows)
    }

    /// One row per weekday; each character is one slot.
    pub fn grid_table(&self, grid: &WeeklyGrid) -> Table {
        let rows = DayOfWeek::iter()
            .map(|day| {
                let cells: String = grid
                    .render_row(day)
                    .chars()
                    .map(|c| match c {
                        '#' => self.painter.paint(FG_GREEN, "#"),
                        other => other.to_string(),
                    })
                    .collect();
                vec![day.to_string(), cells]
            })
            .collect();
        Table::new(
            format!("Weekly grid ({} min slots)", grid.slot_minutes()),
            &["DAY", "SLOTS"],
        )
        .with_rows(rows)
    }
}

fn format_minutes(minutes: u32) -> String {
    format!("{}h {:02}m", minutes / 60, minutes % 60)
}
