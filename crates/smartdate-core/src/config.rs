//! Configuration: fully resolved [`Config`] values and partial [`Overrides`].
//!
//! Resolution is a shallow merge: every key present in the overrides wins,
//! every other key is inherited from the base.
//!
//! ```text
//! effective(base, overrides) = { ...base, ...overrides }
//! ```
//!
//! Both types serialize with camelCase keys (`fullMonthNames`, `addTitle`,
//! ...) so configuration files and per-element attributes use the same names.
//! Keys the engine does not know about are kept in `extra` and merged the same
//! way.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{
    error::{Result, ResultExt, SmartdateError},
    locale::DEFAULT_LOCALE,
};

/// Name of the configuration file looked up under the XDG config directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Effective option set used by the engine and the display binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Locale name, matched case-insensitively
    #[serde(alias = "language")]
    pub locale: String,
    /// Mode name; anything the locale does not provide means `auto`
    pub mode: String,
    /// Spell month names out in full
    pub full_month_names: bool,
    /// Uppercase the first character of the phrase
    pub capitalize: bool,
    /// Attach an absolute-time tooltip to rendered elements
    pub add_title: bool,
    /// Tag of elements managed by the display binding
    pub tag_name: String,
    /// Class marking elements managed by the display binding
    pub class_name: String,
    /// Attribute suffix holding Unix seconds (`data-{timestampAttr}`)
    pub timestamp_attr: String,
    /// Refresh period in milliseconds; 0, `false` or `null` disable periodic
    /// refresh
    #[serde(deserialize_with = "interval_millis")]
    pub update_interval: u64,
    /// Drop the managed class from elements rendered as an absolute date, so
    /// later refreshes skip them
    pub retire_absolute: bool,
    /// Unrecognized keys, preserved verbatim
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            mode: "auto".to_string(),
            full_month_names: false,
            capitalize: false,
            add_title: true,
            tag_name: "span".to_string(),
            class_name: "smartdate".to_string(),
            timestamp_attr: "timestamp".to_string(),
            update_interval: 5000,
            retire_absolute: false,
            extra: BTreeMap::new(),
        }
    }
}

/// Partial configuration; `None` fields inherit from the base.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Overrides {
    /// Locale name such as `en` or `ru`
    #[serde(default, alias = "language", skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// One of `auto`, `past`, `future`, `date`, `time`, `datetime` or a custom mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    /// Spell month names out in full
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_month_names: Option<bool>,
    /// Uppercase the first character of the phrase
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capitalize: Option<bool>,
    /// Attach an absolute-time tooltip to rendered elements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_title: Option<bool>,
    /// Tag of elements managed by the display binding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,
    /// Class marking elements managed by the display binding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Attribute suffix holding Unix seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_attr: Option<String>,
    /// Refresh period in milliseconds; 0, `false` or `null` disable periodic
    /// refresh
    #[serde(
        default,
        deserialize_with = "optional_interval_millis",
        skip_serializing_if = "Option::is_none"
    )]
    pub update_interval: Option<u64>,
    /// Stop refreshing elements once they show an absolute date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retire_absolute: Option<bool>,
    /// Any other keys
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Overrides {
    /// True when no key is set.
    pub fn is_empty(&self) -> bool {
        *self == Overrides::default()
    }

    /// Layers `other` on top of `self`, `other` winning on collisions.
    pub fn merge(&mut self, other: &Overrides) {
        fn take<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
            if value.is_some() {
                slot.clone_from(value);
            }
        }
        take(&mut self.locale, &other.locale);
        take(&mut self.mode, &other.mode);
        take(&mut self.full_month_names, &other.full_month_names);
        take(&mut self.capitalize, &other.capitalize);
        take(&mut self.add_title, &other.add_title);
        take(&mut self.tag_name, &other.tag_name);
        take(&mut self.class_name, &other.class_name);
        take(&mut self.timestamp_attr, &other.timestamp_attr);
        take(&mut self.update_interval, &other.update_interval);
        take(&mut self.retire_absolute, &other.retire_absolute);
        self.extra
            .extend(other.extra.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
}

impl Config {
    /// Returns a new configuration with `overrides` applied; `self` is left
    /// untouched.
    pub fn merged(&self, overrides: &Overrides) -> Config {
        let mut config = self.clone();
        config.apply(overrides);
        config
    }

    /// Applies `overrides` in place.
    pub fn apply(&mut self, overrides: &Overrides) {
        let Overrides {
            locale,
            mode,
            full_month_names,
            capitalize,
            add_title,
            tag_name,
            class_name,
            timestamp_attr,
            update_interval,
            retire_absolute,
            extra,
        } = overrides;

        if let Some(locale) = locale {
            self.locale.clone_from(locale);
        }
        if let Some(mode) = mode {
            self.mode.clone_from(mode);
        }
        if let Some(full_month_names) = full_month_names {
            self.full_month_names = *full_month_names;
        }
        if let Some(capitalize) = capitalize {
            self.capitalize = *capitalize;
        }
        if let Some(add_title) = add_title {
            self.add_title = *add_title;
        }
        if let Some(tag_name) = tag_name {
            self.tag_name.clone_from(tag_name);
        }
        if let Some(class_name) = class_name {
            self.class_name.clone_from(class_name);
        }
        if let Some(timestamp_attr) = timestamp_attr {
            self.timestamp_attr.clone_from(timestamp_attr);
        }
        if let Some(update_interval) = update_interval {
            self.update_interval = *update_interval;
        }
        if let Some(retire_absolute) = retire_absolute {
            self.retire_absolute = *retire_absolute;
        }
        self.extra
            .extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    /// Refresh period for the display binding, `None` when disabled.
    pub fn refresh_interval(&self) -> Option<Duration> {
        (self.update_interval > 0).then(|| Duration::from_millis(self.update_interval))
    }

    /// Loads a JSON overrides file and applies it over the defaults.
    ///
    /// # Errors
    ///
    /// Returns `SmartdateError::FileSystem` if the file cannot be read and
    /// `SmartdateError::Configuration` if it is not a valid overrides object.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| SmartdateError::file_system(path, e))?;
        let overrides: Overrides = serde_json::from_str(&raw)
            .with_context(format!("Failed to parse {}", path.display()))?;
        Ok(Config::default().merged(&overrides))
    }

    /// Existing `$XDG_CONFIG_HOME/smartdate/config.json`, if any.
    pub fn discover() -> Option<PathBuf> {
        xdg::BaseDirectories::with_prefix("smartdate").find_config_file(CONFIG_FILE_NAME)
    }

    /// Path a configuration file would be written to, creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// Returns `SmartdateError::XdgDirectory` when the XDG config directory
    /// cannot be determined or created.
    pub fn default_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("smartdate")
            .place_config_file(CONFIG_FILE_NAME)
            .map_err(|e| SmartdateError::XdgDirectory(e.to_string()))
    }
}

/// Reads a refresh period, treating `null` and `false` like 0.
fn interval_millis<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null | Value::Bool(false) => Ok(0),
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|ms| ms.is_finite() && *ms >= 0.0).map(|ms| ms as u64))
            .ok_or_else(|| de::Error::custom(format!("invalid updateInterval {n}"))),
        other => Err(de::Error::custom(format!(
            "invalid updateInterval {other}, expected milliseconds"
        ))),
    }
}

/// A present `updateInterval` key always overrides, even when falsy.
fn optional_interval_millis<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    interval_millis(deserializer).map(Some)
}
