use crate::ui::width::WidthUtil;
use std::io::Write;

const COLUMN_GAP: &str = " | ";

/// Plain data for one printed table.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub empty_message: Option<String>,
}

impl Table {
    pub fn new(title: impl Into<String>, headers: &[&str]) -> Self {
        Self {
            title: title.into(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn with_rows(mut self, rows: Vec<Vec<String>>) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_empty_message(mut self, msg: impl Into<String>) -> Self {
        self.empty_message = Some(msg.into());
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct TablePrinter {
    util: WidthUtil,
    left_pad: usize,
    min_width: usize,
}

impl TablePrinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_left_pad(mut self, pad: usize) -> Self {
        self.left_pad = pad;
        self
    }

    pub fn with_min_width(mut self, width: usize) -> Self {
        self.min_width = width;
        self
    }

    /// Indent so a table of `table`'s width sits centered in the terminal.
    pub fn centered_for(self, table: &Table) -> Self {
        let pad = self.util.center_pad(self.width_of(table));
        self.with_left_pad(pad)
    }

    fn column_widths(&self, table: &Table) -> Vec<usize> {
        let mut widths: Vec<usize> = table
            .headers
            .iter()
            .map(|h| self.util.visible_width(h))
            .collect();
        for row in &table.rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(self.util.visible_width(cell));
            }
        }
        widths
    }

    /// Natural width of the rendered table, ignoring the configured minimum.
    pub fn width_of(&self, table: &Table) -> usize {
        let widths = self.column_widths(table);
        let gaps = widths.len().saturating_sub(1) * COLUMN_GAP.len();
        widths.iter().sum::<usize>() + gaps
    }

    pub fn print(&self, table: &Table) {
        let mut stdout = std::io::stdout();
        let _ = self.render(table, &mut stdout);
    }

    /// Banner, header, rows, each block closed by a dashed rule.
    pub fn render<W: Write + ?Sized>(&self, table: &Table, out: &mut W) -> std::io::Result<()> {
        let widths = self.column_widths(table);
        let mut rule_width = self
            .width_of(table)
            .max(self.min_width)
            .max(self.util.visible_width(&table.title));

        if table.rows.is_empty()
            && let Some(msg) = &table.empty_message
        {
            rule_width = rule_width.max(self.util.visible_width(msg));
            self.banner(&table.title, rule_width, out)?;
            self.line(out, msg)?;
            return self.rule(out, rule_width);
        }

        self.banner(&table.title, rule_width, out)?;
        if !table.headers.is_empty() {
            let header: Vec<&str> = table.headers.iter().map(String::as_str).collect();
            self.line(out, &self.join_padded(&header, &widths))?;
            self.rule(out, rule_width)?;
        }
        for row in &table.rows {
            let cells: Vec<&str> = row.iter().map(String::as_str).collect();
            self.line(out, &self.join_padded(&cells, &widths))?;
        }
        self.rule(out, rule_width)
    }

    pub fn banner<W: Write + ?Sized>(
        &self,
        title: &str,
        width: usize,
        out: &mut W,
    ) -> std::io::Result<()> {
        self.rule(out, width)?;
        self.line(out, &title.to_uppercase())?;
        self.rule(out, width)
    }

    fn join_padded(&self, cells: &[&str], widths: &[usize]) -> String {
        // Headerless tables print cells as-is.
        if widths.is_empty() {
            return cells.join(COLUMN_GAP);
        }
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, w)| self.util.pad_visible(cell, *w))
            .collect();
        padded.join(COLUMN_GAP).trim_end().to_string()
    }

    fn rule<W: Write + ?Sized>(&self, out: &mut W, width: usize) -> std::io::Result<()> {
        self.line(out, &"-".repeat(width.max(1)))
    }

    fn line<W: Write + ?Sized>(&self, out: &mut W, s: &str) -> std::io::Result<()> {
        writeln!(out, "{}{s}", " ".repeat(self.left_pad))
    }
}
