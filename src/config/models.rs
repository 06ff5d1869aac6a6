use crate::core::types::{Bool, MINUTES_PER_DAY, TimeFormat};
use crate::errors::Error;
use serde::{Deserialize, Serialize};

pub trait ConfigItem<T> {
    fn get_value(&self) -> &T;
    fn set_value(&mut self, new_value: &str) -> Result<(), Error>;
    fn description(&self) -> &str;
}

pub const MAX_VIEW_DAYS: u32 = 31;

fn parse_number<T: std::str::FromStr>(raw: &str, what: &str) -> Result<T, Error> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| Error::config(format!("Invalid {what}: '{}'.", raw.trim())))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotMinutesConfigItem {
    pub value: u16,
    pub description: String,
}

impl Default for SlotMinutesConfigItem {
    fn default() -> Self {
        Self {
            value: 30,
            description: "Length of one weekly grid slot, in minutes.".into(),
        }
    }
}

impl ConfigItem<u16> for SlotMinutesConfigItem {
    fn get_value(&self) -> &u16 {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        let minutes: u16 = parse_number(new_value, "slot length")?;
        if minutes == 0 || MINUTES_PER_DAY % minutes != 0 {
            return Err(Error::config(format!(
                "Slot length {minutes} must divide {MINUTES_PER_DAY} minutes evenly."
            )));
        }
        self.value = minutes;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseRateConfigItem {
    pub value: f64,
    pub description: String,
}

impl Default for BaseRateConfigItem {
    fn default() -> Self {
        Self {
            value: 0.0,
            description: "Hourly rate used where no custom rate is set.".into(),
        }
    }
}

impl ConfigItem<f64> for BaseRateConfigItem {
    fn get_value(&self) -> &f64 {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        let rate: f64 = parse_number(new_value, "hourly rate")?;
        if !rate.is_finite() || rate < 0.0 {
            return Err(Error::config(format!(
                "Hourly rate must be a non-negative number, got {rate}."
            )));
        }
        self.value = rate;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeFormatConfigItem {
    pub value: TimeFormat,
    pub description: String,
}

impl Default for TimeFormatConfigItem {
    fn default() -> Self {
        Self {
            value: TimeFormat::H24,
            description: "Clock style for printed times (24h or 12h).".into(),
        }
    }
}

impl ConfigItem<TimeFormat> for TimeFormatConfigItem {
    fn get_value(&self) -> &TimeFormat {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        self.value = TimeFormat::try_from(new_value)?;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewDaysConfigItem {
    pub value: u32,
    pub description: String,
}

impl Default for ViewDaysConfigItem {
    fn default() -> Self {
        Self {
            value: 7,
            description: "Number of days shown by the week view.".into(),
        }
    }
}

impl ConfigItem<u32> for ViewDaysConfigItem {
    fn get_value(&self) -> &u32 {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        let days: u32 = parse_number(new_value, "day count")?;
        if !(1..=MAX_VIEW_DAYS).contains(&days) {
            return Err(Error::config(format!(
                "Day count must be between 1 and {MAX_VIEW_DAYS}, got {days}."
            )));
        }
        self.value = days;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileLoggingConfigItem {
    pub value: Bool,
    pub description: String,
}

impl Default for FileLoggingConfigItem {
    fn default() -> Self {
        Self {
            value: Bool(true),
            description: "Enable writing log messages to file.".into(),
        }
    }
}

impl ConfigItem<Bool> for FileLoggingConfigItem {
    fn get_value(&self) -> &Bool {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        self.value = Bool::try_from_str(new_value)?;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}
