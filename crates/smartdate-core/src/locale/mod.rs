//! Locale records and phrase dispatch.
//!
//! A [`Locale`] is a named bundle of month names plus a table mapping mode
//! names to phrase functions. Phrase functions receive the locale record they
//! are installed on, so composite phrases such as `datetime` always go through
//! whatever `date` and `time` functions are installed at call time, including
//! ones replaced at runtime.
//!
//! ```text
//! ┌───────────────┐    ┌───────────────┐    ┌───────────────┐
//! │ LocaleRegistry│    │    Locale     │    │  PhraseFn     │
//! │  name → record│───▶│ mode → fn     │───▶│ (locale, args)│
//! └───────────────┘    └───────────────┘    └───────────────┘
//! ```

use std::{collections::BTreeMap, fmt, str::FromStr, sync::Arc};

use jiff::Zoned;

pub mod en;
mod registry;
mod relative;
pub mod ru;

pub use registry::LocaleRegistry;
pub use relative::Proximity;

/// Name of the locale used when a lookup misses.
pub const DEFAULT_LOCALE: &str = "en";

/// Phrase function installed on a locale for one mode.
///
/// Returns `None` when the mode has nothing to say about the instant, which
/// makes the engine fall back to the `date` phrase.
pub type PhraseFn = Arc<dyn Fn(&Locale, &PhraseArgs<'_>) -> Option<String> + Send + Sync>;

/// Everything a phrase function needs about one formatting call.
#[derive(Debug, Clone, Copy)]
pub struct PhraseArgs<'a> {
    /// Instant being formatted, in the engine's time zone
    pub target: &'a Zoned,
    /// Current instant, read once per call from the engine's clock
    pub now: &'a Zoned,
    /// Whether month names should be spelled out in full
    pub full_month_names: bool,
}

impl PhraseArgs<'_> {
    /// Milliseconds from `target` to `now`; negative for future instants.
    pub fn elapsed_ms(&self) -> i64 {
        self.now.timestamp().as_millisecond() - self.target.timestamp().as_millisecond()
    }
}

/// Phrasing strategy requested through the `mode` option.
///
/// Parsing never fails: unrecognized names become [`Mode::Custom`], which the
/// engine treats as `auto` unless the locale has a function by that name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Mode {
    /// Absolute short date only
    Date,
    /// Clock only
    Time,
    /// Date followed by clock
    DateTime,
    /// Age relative to now
    Past,
    /// Time remaining until the instant
    Future,
    /// Past or future depending on the instant
    Auto,
    /// Any other, lowercased, name
    Custom(String),
}

impl Mode {
    /// Modes every registered locale must provide.
    pub const REQUIRED: [Mode; 5] = [
        Mode::Date,
        Mode::Time,
        Mode::DateTime,
        Mode::Past,
        Mode::Future,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Mode::Date => "date",
            Mode::Time => "time",
            Mode::DateTime => "datetime",
            Mode::Past => "past",
            Mode::Future => "future",
            Mode::Auto => "auto",
            Mode::Custom(name) => name,
        }
    }
}

impl From<&str> for Mode {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "date" => Mode::Date,
            "time" => Mode::Time,
            "datetime" => Mode::DateTime,
            "past" => Mode::Past,
            "future" => Mode::Future,
            "auto" | "" => Mode::Auto,
            other => Mode::Custom(other.to_string()),
        }
    }
}

impl FromStr for Mode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Mode::from(s))
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Month names and phrase functions for one language.
#[derive(Clone)]
pub struct Locale {
    name: String,
    months: [String; 12],
    months_short: [String; 12],
    modes: BTreeMap<String, PhraseFn>,
}

impl Locale {
    /// Creates a locale with month names and no modes.
    ///
    /// The name is stored lowercased; month arrays are indexed by calendar
    /// month, January first.
    pub fn new(name: &str, months: [&str; 12], months_short: [&str; 12]) -> Self {
        Self {
            name: name.to_lowercase(),
            months: months.map(str::to_string),
            months_short: months_short.map(str::to_string),
            modes: BTreeMap::new(),
        }
    }

    /// Builder-style [`Locale::set_mode`].
    pub fn with_mode<F>(mut self, mode: impl Into<Mode>, phrase: F) -> Self
    where
        F: Fn(&Locale, &PhraseArgs<'_>) -> Option<String> + Send + Sync + 'static,
    {
        self.set_mode(mode, phrase);
        self
    }

    /// Installs or replaces the phrase function for `mode`.
    pub fn set_mode<F>(&mut self, mode: impl Into<Mode>, phrase: F)
    where
        F: Fn(&Locale, &PhraseArgs<'_>) -> Option<String> + Send + Sync + 'static,
    {
        let mode: Mode = mode.into();
        self.modes.insert(mode.as_str().to_string(), Arc::new(phrase));
    }

    /// Removes the phrase function for `mode`, returning it.
    pub fn remove_mode(&mut self, mode: impl Into<Mode>) -> Option<PhraseFn> {
        let mode: Mode = mode.into();
        self.modes.remove(mode.as_str())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Phrase function installed for `mode`, if any.
    pub fn mode(&self, mode: &str) -> Option<&PhraseFn> {
        self.modes.get(mode.to_lowercase().as_str())
    }

    pub fn has_mode(&self, mode: &str) -> bool {
        self.mode(mode).is_some()
    }

    /// Names of all installed modes, sorted.
    pub fn mode_names(&self) -> impl Iterator<Item = &str> {
        self.modes.keys().map(String::as_str)
    }

    /// Runs the phrase function for `mode`; `None` when it is missing or has
    /// no phrase for this instant.
    pub fn phrase(&self, mode: &str, args: &PhraseArgs<'_>) -> Option<String> {
        self.mode(mode).and_then(|phrase| phrase(self, args))
    }

    /// Month name for a calendar month in `1..=12`.
    pub fn month_name(&self, month: i8, full: bool) -> &str {
        let names = if full { &self.months } else { &self.months_short };
        usize::try_from(month - 1)
            .ok()
            .and_then(|index| names.get(index))
            .map(String::as_str)
            .unwrap_or_default()
    }
}

impl fmt::Debug for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Locale")
            .field("name", &self.name)
            .field("months", &self.months)
            .field("months_short", &self.months_short)
            .field("modes", &self.modes.keys().collect::<Vec<_>>())
            .finish()
    }
}
