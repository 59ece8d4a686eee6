//! The formatting engine.
//!
//! An [`EngineContext`] bundles everything a formatting call reads: the base
//! [`Config`], the [`LocaleRegistry`], the [`Clock`] and the time zone that
//! defines calendar days. Nothing is cached between calls, so edits to the
//! registry or the base configuration take effect on the next call.
//!
//! # Pipeline
//!
//! ```text
//! input ──▶ Input::to_timestamp ──▶ effective_options ──▶ resolve locale
//!                                                              │
//!   capitalize ◀── date fallback ◀── mode or auto (past/future)◀┘
//! ```
//!
//! 1. The input is coerced to an instant; failure yields `None`.
//! 2. Overrides are shallow-merged over the base configuration.
//! 3. The locale is resolved, falling back to `en`.
//! 4. If the locale has a phrase function for the mode it runs; otherwise the
//!    instant is compared with now (strictly later means `future`, anything
//!    else `past`).
//! 5. A mode with nothing to say falls back to the `date` phrase.
//! 6. With `capitalize`, the first character is uppercased.
//!
//! # Usage Examples
//!
//! ```rust
//! use jiff::{civil::date, tz::TimeZone};
//! use smartdate_core::{EngineBuilder, FixedClock, Overrides};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let now = date(2015, 1, 13).at(13, 13, 13, 0).to_zoned(TimeZone::UTC)?;
//! let engine = EngineBuilder::new()
//!     .with_clock(FixedClock(now.timestamp()))
//!     .with_time_zone(TimeZone::UTC)
//!     .build()?;
//!
//! assert_eq!(engine.format(&now, None).as_deref(), Some("less than a minute ago"));
//! assert_eq!(engine.format(0i64, None).as_deref(), Some("Jan 1, 1970"));
//!
//! let ru = Overrides {
//!     locale: Some("ru".to_string()),
//!     ..Default::default()
//! };
//! assert_eq!(engine.format(4_120_761_600i64, Some(&ru)).as_deref(), Some("1 авг 2100"));
//! assert_eq!(engine.format("42lol", None), None);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use std::{fmt, sync::Arc};

use jiff::{tz::TimeZone, Zoned};
use log::{debug, trace};

mod builder;

pub use builder::EngineBuilder;

use crate::{
    clock::Clock,
    config::{Config, Overrides},
    error::Result,
    input::Input,
    locale::{Locale, LocaleRegistry, Mode, PhraseArgs},
};

/// Base configuration, locale table, clock and time zone for formatting.
#[derive(Clone)]
pub struct EngineContext {
    pub(crate) config: Config,
    pub(crate) locales: LocaleRegistry,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) time_zone: TimeZone,
}

impl EngineContext {
    /// Engine with default configuration, bundled locales, the system clock
    /// and the system time zone.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            locales: LocaleRegistry::new(),
            clock: Arc::new(crate::clock::SystemClock),
            time_zone: TimeZone::system(),
        }
    }

    /// Formats `input` as a phrase, or `None` if it is not a valid instant.
    pub fn format(&self, input: impl Into<Input>, overrides: Option<&Overrides>) -> Option<String> {
        match self.try_format(input, overrides) {
            Ok(phrase) => Some(phrase),
            Err(e) => {
                debug!("{e}");
                None
            }
        }
    }

    /// Like [`EngineContext::format`] but reports why the input was rejected.
    ///
    /// # Errors
    ///
    /// Returns `SmartdateError::InvalidTimestamp` if the input does not
    /// coerce to an instant.
    pub fn try_format(
        &self,
        input: impl Into<Input>,
        overrides: Option<&Overrides>,
    ) -> Result<String> {
        let target = self.instant(input)?;
        let options = self.effective_options(overrides);
        Ok(self.phrase(&target, &options))
    }

    /// Coerces `input` to an instant in the engine's time zone.
    ///
    /// # Errors
    ///
    /// Returns `SmartdateError::InvalidTimestamp` for unusable input.
    pub fn instant(&self, input: impl Into<Input>) -> Result<Zoned> {
        let timestamp = input.into().to_timestamp()?;
        Ok(timestamp.to_zoned(self.time_zone.clone()))
    }

    /// Produces the phrase for an instant under a resolved configuration.
    pub fn phrase(&self, target: &Zoned, options: &Config) -> String {
        self.compose(target, options).0
    }

    /// The phrase, and whether it is the locale's absolute `date` phrase
    /// (asked for directly or reached through the fallback).
    pub(crate) fn compose(&self, target: &Zoned, options: &Config) -> (String, bool) {
        let locale = self.locales.resolve(Some(&options.locale));
        let now = self.now();
        let args = PhraseArgs {
            target,
            now: &now,
            full_month_names: options.full_month_names,
        };

        let dispatched = dispatch(locale, &options.mode, &args);
        let absolute =
            dispatched.is_none() || options.mode.eq_ignore_ascii_case(Mode::Date.as_str());
        let phrase = dispatched
            .or_else(|| locale.phrase(Mode::Date.as_str(), &args))
            .unwrap_or_default();

        if options.capitalize {
            (capitalize(&phrase), absolute)
        } else {
            (phrase, absolute)
        }
    }

    /// Base configuration with `overrides` applied on top.
    pub fn effective_options(&self, overrides: Option<&Overrides>) -> Config {
        match overrides {
            Some(overrides) => self.config.merged(overrides),
            None => self.config.clone(),
        }
    }

    /// Shallow-merges `overrides` into the base configuration.
    pub fn setup(&mut self, overrides: &Overrides) {
        self.config.apply(overrides);
    }

    /// Replaces the base configuration wholesale.
    pub fn replace_config(&mut self, config: Config) {
        self.config = config;
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn locales(&self) -> &LocaleRegistry {
        &self.locales
    }

    /// Mutable locale table; changes are visible to the next call.
    pub fn locales_mut(&mut self) -> &mut LocaleRegistry {
        &mut self.locales
    }

    /// Replaces the clock used for "now".
    pub fn set_clock(&mut self, clock: impl Clock + 'static) {
        self.clock = Arc::new(clock);
    }

    pub fn time_zone(&self) -> &TimeZone {
        &self.time_zone
    }

    pub fn set_time_zone(&mut self, time_zone: TimeZone) {
        self.time_zone = time_zone;
    }

    /// Current instant in the engine's time zone.
    pub fn now(&self) -> Zoned {
        self.clock.now().to_zoned(self.time_zone.clone())
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EngineContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineContext")
            .field("config", &self.config)
            .field("locales", &self.locales)
            .field("time_zone", &self.time_zone)
            .finish_non_exhaustive()
    }
}

fn dispatch(locale: &Locale, mode: &str, args: &PhraseArgs<'_>) -> Option<String> {
    if let Some(phrase) = locale.mode(mode) {
        trace!("{}: mode '{mode}'", locale.name());
        return phrase(locale, args);
    }
    let auto = if args.target.timestamp() > args.now.timestamp() {
        Mode::Future
    } else {
        Mode::Past
    };
    trace!("{}: mode '{mode}' resolved as {auto}", locale.name());
    locale.phrase(auto.as_str(), args)
}

/// Uppercases the first character, leaving the rest as is.
fn capitalize(phrase: &str) -> String {
    let mut chars = phrase.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests;
