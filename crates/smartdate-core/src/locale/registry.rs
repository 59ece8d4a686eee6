//! Named locale lookup with a guaranteed fallback.

use std::collections::BTreeMap;

use log::debug;

use super::{en, ru, Locale, Mode, DEFAULT_LOCALE};
use crate::error::{Result, SmartdateError};

/// Table of installed locales.
///
/// The default locale lives outside the map so that a lookup can always
/// resolve to something; registering a locale under the default name replaces
/// it in place.
#[derive(Debug, Clone)]
pub struct LocaleRegistry {
    default: Locale,
    locales: BTreeMap<String, Locale>,
}

impl LocaleRegistry {
    /// Registry holding the bundled `en` and `ru` locales.
    pub fn new() -> Self {
        let ru = ru::locale();
        Self {
            default: en::locale(),
            locales: BTreeMap::from([(ru.name().to_string(), ru)]),
        }
    }

    /// Case-insensitive lookup falling back to the default locale.
    pub fn resolve(&self, name: Option<&str>) -> &Locale {
        let Some(name) = name.map(str::to_lowercase) else {
            return &self.default;
        };
        if name == self.default.name() {
            return &self.default;
        }
        self.locales.get(&name).unwrap_or_else(|| {
            debug!("Unknown locale '{name}', using '{}'", self.default.name());
            &self.default
        })
    }

    /// Exact (case-insensitive) lookup without fallback.
    pub fn get(&self, name: &str) -> Option<&Locale> {
        let name = name.to_lowercase();
        if name == self.default.name() {
            Some(&self.default)
        } else {
            self.locales.get(&name)
        }
    }

    /// Mutable access to an installed locale, for adding or replacing modes.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Locale> {
        let name = name.to_lowercase();
        if name == self.default.name() {
            Some(&mut self.default)
        } else {
            self.locales.get_mut(&name)
        }
    }

    /// Adds a locale, replacing any locale of the same name.
    ///
    /// # Errors
    ///
    /// Returns `SmartdateError::IncompleteLocale` if the locale lacks any of
    /// the `date`, `time`, `datetime`, `past` or `future` modes.
    pub fn register(&mut self, locale: Locale) -> Result<()> {
        if let Some(missing) = Mode::REQUIRED
            .iter()
            .find(|mode| !locale.has_mode(mode.as_str()))
        {
            return Err(SmartdateError::IncompleteLocale {
                locale: locale.name().to_string(),
                mode: missing.to_string(),
            });
        }

        if locale.name() == self.default.name() {
            self.default = locale;
        } else {
            self.locales.insert(locale.name().to_string(), locale);
        }
        Ok(())
    }

    /// Names of all installed locales, default first.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.default.name()).chain(self.locales.keys().map(String::as_str))
    }

    /// All installed locales, default first.
    pub fn iter(&self) -> impl Iterator<Item = &Locale> {
        std::iter::once(&self.default).chain(self.locales.values())
    }
}

impl Default for LocaleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
