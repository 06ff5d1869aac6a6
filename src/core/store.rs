use crate::core::interval::overlaps;
use crate::core::resolver::RuleResolver;
use crate::core::schedule::{DateOverride, RecurringRule, RecurringSchedule};
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A spot's schedule exactly as the schedule store hands it over.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpotSchedule {
    pub spot_id: String,
    #[serde(default)]
    pub rules: Vec<RecurringRule>,
    #[serde(default)]
    pub overrides: Vec<DateOverride>,
}

impl SpotSchedule {
    pub fn new(spot_id: impl Into<String>) -> Self {
        Self {
            spot_id: spot_id.into(),
            ..Self::default()
        }
    }

    pub fn resolver(&self) -> Result<RuleResolver> {
        RuleResolver::from_rules(&self.rules, &self.overrides)
    }

    pub fn recurring(&self) -> Result<RecurringSchedule> {
        RecurringSchedule::from_rules(&self.rules)
    }

    /// Replace the weekly rules wholesale; overrides are untouched.
    pub fn replace_recurring(&mut self, schedule: &RecurringSchedule) {
        self.rules = schedule.to_rules();
    }

    /// Add an override row, refusing one whose window overlaps another row
    /// already saved for the same date.
    pub fn push_override(&mut self, row: DateOverride) -> Result<()> {
        let new = row.to_interval()?;
        for existing in self.overrides.iter().filter(|o| o.date == row.date) {
            let existing = existing.to_interval()?;
            if overlaps(&existing.span, &new.span) {
                return Err(Error::Overlap {
                    new: new.span.to_string(),
                    existing: existing.span.to_string(),
                });
            }
        }
        self.overrides.push(row);
        Ok(())
    }
}

pub fn load_schedule(path: &Path) -> Result<SpotSchedule> {
    if !path.exists() {
        return Err(Error::Parse(format!(
            "Schedule file '{}' not found.",
            path.display()
        )));
    }
    let contents = fs::read_to_string(path)?;
    let schedule: SpotSchedule = serde_json::from_str(&contents)?;
    // Surface bad rows on load rather than on first lookup.
    schedule.resolver()?;
    Ok(schedule)
}

pub fn save_schedule(schedule: &SpotSchedule, path: &Path) -> Result<PathBuf> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let contents = serde_json::to_string_pretty(schedule)?;
    fs::write(path, contents)?;
    Ok(path.to_path_buf())
}
