pub mod models;

use std::fs;
use std::ops::Index;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter as EnumIterDerive, EnumString};

use crate::config::models::{
    BaseRateConfigItem, ConfigItem, FileLoggingConfigItem, SlotMinutesConfigItem,
    TimeFormatConfigItem, ViewDaysConfigItem,
};
use crate::core::types::TimeFormat;
use crate::errors::{Error, Result};
use crate::extensions::enums::valid_csv;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIterDerive, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum ConfigKey {
    SlotMinutes,
    BaseHourlyRate,
    TimeFormat,
    ViewDays,
    FileLoggingEnabled,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub slot_minutes: SlotMinutesConfigItem,
    #[serde(default)]
    pub base_hourly_rate: BaseRateConfigItem,
    #[serde(default)]
    pub time_format: TimeFormatConfigItem,
    #[serde(default)]
    pub view_days: ViewDaysConfigItem,
    #[serde(default)]
    pub file_logging_enabled: FileLoggingConfigItem,
}

impl ConfigFile {
    fn item_mut(&mut self, key: ConfigKey) -> &mut dyn EditableItem {
        match key {
            ConfigKey::SlotMinutes => &mut self.slot_minutes,
            ConfigKey::BaseHourlyRate => &mut self.base_hourly_rate,
            ConfigKey::TimeFormat => &mut self.time_format,
            ConfigKey::ViewDays => &mut self.view_days,
            ConfigKey::FileLoggingEnabled => &mut self.file_logging_enabled,
        }
    }

    fn item(&self, key: ConfigKey) -> &dyn EditableItem {
        match key {
            ConfigKey::SlotMinutes => &self.slot_minutes,
            ConfigKey::BaseHourlyRate => &self.base_hourly_rate,
            ConfigKey::TimeFormat => &self.time_format,
            ConfigKey::ViewDays => &self.view_days,
            ConfigKey::FileLoggingEnabled => &self.file_logging_enabled,
        }
    }

    /// Run every stored value back through its item's own checks, so a
    /// hand-edited file cannot carry values `set` would refuse.
    fn validate(&self) -> Result<()> {
        for key in ConfigKey::iter() {
            self.item(key).check().map_err(|e| {
                let msg = match e {
                    Error::Config(msg) | Error::Parse(msg) => msg,
                    other => other.to_string(),
                };
                Error::config(format!("Invalid value for {key}: {msg}"))
            })?;
        }
        Ok(())
    }
}

/// Type-erased view over the typed items so rows and edits can be driven by
/// `ConfigKey` alone.
trait EditableItem {
    fn display_value(&self) -> String;
    fn set_from_str(&mut self, raw: &str) -> Result<()>;
    fn describe(&self) -> &str;
    fn check(&self) -> Result<()>;
}

macro_rules! editable {
    ($($item:ty),+ $(,)?) => {
        $(
            impl EditableItem for $item {
                fn display_value(&self) -> String {
                    self.get_value().to_string()
                }
                fn set_from_str(&mut self, raw: &str) -> Result<()> {
                    self.set_value(raw)
                }
                fn describe(&self) -> &str {
                    self.description()
                }
                fn check(&self) -> Result<()> {
                    self.clone().set_value(&self.display_value())
                }
            }
        )+
    };
}

editable!(
    SlotMinutesConfigItem,
    BaseRateConfigItem,
    TimeFormatConfigItem,
    ViewDaysConfigItem,
    FileLoggingConfigItem,
);

#[derive(Debug, Clone)]
pub struct Config {
    path: PathBuf,
    data: ConfigFile,
    pub last_change: Option<(String, String, String)>,
}

#[derive(Debug, Clone)]
pub struct ConfigRows(Vec<(String, String, String)>);

impl ConfigRows {
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = &(String, String, String)> {
        self.0.iter()
    }
    pub fn get(&self, index: usize) -> Option<&(String, String, String)> {
        self.0.get(index)
    }
}

impl Index<usize> for ConfigRows {
    type Output = (String, String, String);
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl Config {
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(Error::config(format!(
                "Configuration file '{}' not found.",
                path.display()
            )));
        }
        let text = fs::read_to_string(&path)
            .map_err(|e| Error::config(format!("Failed to read {}: {}", path.display(), e)))?;
        let data: ConfigFile = serde_json::from_str(&text)
            .map_err(|e| Error::config(format!("Invalid JSON in '{}': {}", path.display(), e)))?;
        data.validate().map_err(|e| match e {
            Error::Config(msg) => Error::config(format!("{msg} (in '{}')", path.display())),
            other => other,
        })?;
        Ok(Self {
            path,
            data,
            last_change: None,
        })
    }

    /// Load `path`, writing a file of defaults first when none exists.
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load_from(path);
        }
        let config = Self {
            path: path.to_path_buf(),
            data: ConfigFile::default(),
            last_change: None,
        };
        config.save()?;
        Ok(config)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn view(&self) -> &ConfigFile {
        &self.data
    }

    pub fn slot_minutes(&self) -> u16 {
        *self.data.slot_minutes.get_value()
    }
    pub fn base_hourly_rate(&self) -> f64 {
        *self.data.base_hourly_rate.get_value()
    }
    pub fn time_format(&self) -> TimeFormat {
        *self.data.time_format.get_value()
    }
    pub fn view_days(&self) -> u32 {
        *self.data.view_days.get_value()
    }
    pub fn file_logging_enabled(&self) -> bool {
        self.data.file_logging_enabled.get_value().0
    }

    /// `(KEY, description, value)` per key, in declaration order.
    pub fn rows(&self) -> ConfigRows {
        ConfigRows(
            ConfigKey::iter()
                .map(|key| {
                    let item = self.data.item(key);
                    (
                        key.to_string(),
                        item.describe().to_string(),
                        item.display_value(),
                    )
                })
                .collect(),
        )
    }

    pub fn set_by_index(&mut self, index: usize, new_value: &str) -> Result<()> {
        let key = ConfigKey::iter()
            .nth(index)
            .ok_or_else(|| Error::config(format!("Invalid ID: {index}")))?;
        self.set_key(key, new_value)
    }

    pub fn set_key(&mut self, key: ConfigKey, new_value: &str) -> Result<()> {
        let old = self.data.item(key).display_value();
        self.edit(|cfg| cfg.item_mut(key).set_from_str(new_value))?;
        let new = self.data.item(key).display_value();
        self.last_change = Some((key.to_string(), old, new));
        Ok(())
    }

    pub fn take_last_change(&mut self) -> Option<(String, String, String)> {
        self.last_change.take()
    }

    pub fn set(&mut self, key_str: &str, new_value: &str) -> Result<()> {
        let key = parse_key(key_str)?;
        self.set_key(key, new_value)
    }

    /// Apply several edits at once. Nothing is written unless every pair
    /// parses.
    pub fn set_many<I, K, V>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut staged = self.data.clone();
        for (k, v) in pairs {
            staged.item_mut(parse_key(k.as_ref())?).set_from_str(v.as_ref())?;
        }
        self.edit(|cfg| {
            *cfg = staged;
            Ok(())
        })
    }

    fn edit<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ConfigFile) -> Result<()>,
    {
        f(&mut self.data)?;
        self.save()
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| Error::config(format!("Failed to encode config: {}", e)))?;
        fs::write(&self.path, json)
            .map_err(|e| Error::config(format!("Failed to write {}: {}", self.path.display(), e)))
    }
}

fn parse_key(raw: &str) -> Result<ConfigKey> {
    ConfigKey::from_str(raw.trim()).map_err(|_| {
        Error::config(format!(
            "Unknown configuration key '{}'. Valid keys: {}",
            raw.trim(),
            valid_csv::<ConfigKey>()
        ))
    })
}
