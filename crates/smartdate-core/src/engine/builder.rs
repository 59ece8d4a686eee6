//! Builder for creating and configuring EngineContext instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use jiff::tz::TimeZone;
use log::debug;

use super::EngineContext;
use crate::{
    clock::{Clock, SystemClock},
    config::{Config, Overrides},
    error::Result,
    locale::LocaleRegistry,
};

/// Builder for creating and configuring EngineContext instances.
#[derive(Clone)]
pub struct EngineBuilder {
    config_path: Option<PathBuf>,
    discover_config: bool,
    overrides: Overrides,
    clock: Option<Arc<dyn Clock>>,
    time_zone: Option<TimeZone>,
    locales: Option<LocaleRegistry>,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config_path: None,
            discover_config: false,
            overrides: Overrides::default(),
            clock: None,
            time_zone: None,
            locales: None,
        }
    }

    /// Loads the base configuration from a JSON file.
    ///
    /// Takes precedence over [`EngineBuilder::discover_config_file`].
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.config_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Loads `$XDG_CONFIG_HOME/smartdate/config.json` when it exists.
    pub fn discover_config_file(mut self) -> Self {
        self.discover_config = true;
        self
    }

    /// Applies overrides on top of the defaults and any configuration file.
    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        self.overrides.merge(overrides);
        self
    }

    /// Replaces the system clock.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Sets the time zone used for calendar days; defaults to the system zone.
    pub fn with_time_zone(mut self, time_zone: TimeZone) -> Self {
        self.time_zone = Some(time_zone);
        self
    }

    /// Starts from a custom locale table instead of the bundled one.
    pub fn with_locales(mut self, locales: LocaleRegistry) -> Self {
        self.locales = Some(locales);
        self
    }

    /// Builds the configured engine.
    ///
    /// # Errors
    ///
    /// Returns `SmartdateError::FileSystem` if the configuration file cannot be
    /// read and `SmartdateError::Configuration` if it cannot be parsed.
    pub fn build(self) -> Result<EngineContext> {
        let config_path = self
            .config_path
            .or_else(|| self.discover_config.then(Config::discover).flatten());

        let mut config = match config_path {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                Config::from_file(&path)?
            }
            None => Config::default(),
        };
        config.apply(&self.overrides);

        Ok(EngineContext {
            config,
            locales: self.locales.unwrap_or_default(),
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            time_zone: self.time_zone.unwrap_or_else(TimeZone::system),
        })
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
