//! Display binding: elements carrying a timestamp and the phrase shown for it.
//!
//! An [`Element`] is a small, serializable stand-in for a markup node. Managed
//! elements are recognized by tag and class (`span.smartdate` by default) and
//! hold their instant as Unix seconds in `data-{timestampAttr}`. Rendering
//! writes the phrase into the element text and, when `addTitle` is on, an
//! absolute local time into its title.
//!
//! Per-element overrides are read from these attributes and layered over the
//! engine's base configuration:
//!
//! | attribute               | key              |
//! |-------------------------|------------------|
//! | `data-locale`           | `locale`         |
//! | `data-mode`             | `mode`           |
//! | `data-full-month-names` | `fullMonthNames` |
//! | `data-capitalize`       | `capitalize`     |
//! | `data-add-title`        | `addTitle`       |
//!
//! A [`Document`] is a flat list of elements persisted as JSON, which is what
//! the CLI `render` and `watch` commands operate on.

use std::{borrow::Cow, collections::BTreeMap, fmt, fs, path::Path};

use jiff::Zoned;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{
    config::{Config, Overrides},
    engine::EngineContext,
    error::{Result, SmartdateError},
    input::Input,
};

const LOCALE_ATTR: &str = "locale";
const MODE_ATTR: &str = "mode";
const FULL_MONTH_NAMES_ATTR: &str = "full-month-names";
const CAPITALIZE_ATTR: &str = "capitalize";
const ADD_TITLE_ATTR: &str = "add-title";

/// A markup node managed by the display binding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub tag_name: String,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Element {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            ..Default::default()
        }
    }

    pub fn has_class(&self, class_name: &str) -> bool {
        self.classes.iter().any(|c| c == class_name)
    }

    /// Value of `data-{key}`.
    pub fn data(&self, key: &str) -> Option<&str> {
        self.attributes.get(&format!("data-{key}")).map(String::as_str)
    }

    pub fn set_data(&mut self, key: &str, value: impl Into<String>) {
        self.attributes.insert(format!("data-{key}"), value.into());
    }

    /// Overrides declared on the element through `data-*` attributes.
    ///
    /// Boolean attributes accept `true` and `false`; anything else is ignored.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            locale: self.data(LOCALE_ATTR).map(str::to_string),
            mode: self.data(MODE_ATTR).map(str::to_string),
            full_month_names: self.flag(FULL_MONTH_NAMES_ATTR),
            capitalize: self.flag(CAPITALIZE_ATTR),
            add_title: self.flag(ADD_TITLE_ATTR),
            ..Default::default()
        }
    }

    /// Writes the display-related keys of `overrides` as `data-*` attributes.
    pub fn set_overrides(&mut self, overrides: &Overrides) {
        if let Some(locale) = &overrides.locale {
            self.set_data(LOCALE_ATTR, locale.as_str());
        }
        if let Some(mode) = &overrides.mode {
            self.set_data(MODE_ATTR, mode.as_str());
        }
        for (key, flag) in [
            (FULL_MONTH_NAMES_ATTR, overrides.full_month_names),
            (CAPITALIZE_ATTR, overrides.capitalize),
            (ADD_TITLE_ATTR, overrides.add_title),
        ] {
            if let Some(flag) = flag {
                self.set_data(key, flag.to_string());
            }
        }
    }

    /// True when the element is managed under `config`'s tag and class.
    pub fn is_managed(&self, config: &Config) -> bool {
        self.tag_name.eq_ignore_ascii_case(&config.tag_name) && self.has_class(&config.class_name)
    }

    fn flag(&self, key: &str) -> Option<bool> {
        match self.data(key)?.trim() {
            "true" => Some(true),
            "false" => Some(false),
            other => {
                debug!("Ignoring data-{key}=\"{other}\"");
                None
            }
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag_name)?;
        if !self.classes.is_empty() {
            write!(f, " class=\"{}\"", escape(&self.classes.join(" "), true))?;
        }
        for (name, value) in &self.attributes {
            write!(f, " {}=\"{}\"", name, escape(value, true))?;
        }
        if let Some(title) = &self.title {
            write!(f, " title=\"{}\"", escape(title, true))?;
        }
        write!(f, ">{}</{}>", escape(&self.text, false), self.tag_name)
    }
}

fn escape(raw: &str, attribute: bool) -> Cow<'_, str> {
    let needs_escape = |c: char| matches!(c, '&' | '<' | '>') || (attribute && c == '"');
    if !raw.contains(needs_escape) {
        return Cow::Borrowed(raw);
    }
    let mut escaped = String::with_capacity(raw.len() + 8);
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if attribute => escaped.push_str("&quot;"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Absolute local time shown as an element's tooltip.
///
/// Renders `YYYY-MM-DD HH:MM:SS TZ` in the instant's own time zone.
pub struct Tooltip<'a>(pub &'a Zoned);

impl fmt::Display for Tooltip<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.strftime("%Y-%m-%d %H:%M:%S %Z"))
    }
}

/// A flat, JSON-persisted collection of elements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Document {
    /// Reads a document from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `SmartdateError::FileSystem` if the file cannot be read and
    /// `SmartdateError::Serialization` if it is not a document.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| SmartdateError::file_system(path, e))?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Writes the document as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `SmartdateError::FileSystem` if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| SmartdateError::file_system(path, e))
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for element in &self.elements {
            writeln!(f, "{element}")?;
        }
        Ok(())
    }
}

impl EngineContext {
    /// Builds a managed element for `input`, or `None` if it is not a valid
    /// instant.
    ///
    /// Tag, class and timestamp attribute always come from the base
    /// configuration, since that is what [`EngineContext::render_all`] looks
    /// for; `overrides` only shape the phrase. Explicit overrides are recorded
    /// on the element as `data-*` attributes so later refreshes render it the
    /// same way.
    pub fn create_element(
        &self,
        input: impl Into<Input>,
        overrides: Option<&Overrides>,
    ) -> Option<Element> {
        let target = match self.instant(input) {
            Ok(target) => target,
            Err(e) => {
                debug!("{e}");
                return None;
            }
        };
        if let Some(ignored) = overrides.and_then(markup_override) {
            debug!("Ignoring per-element {ignored}; markup follows the base configuration");
        }
        let options = self.effective_options(overrides);

        let mut element = Element::new(self.config.tag_name.as_str());
        element.classes.push(self.config.class_name.clone());
        element.set_data(
            &self.config.timestamp_attr,
            target.timestamp().as_second().to_string(),
        );
        if let Some(overrides) = overrides {
            element.set_overrides(overrides);
        }
        self.paint(&mut element, &target, &options);
        Some(element)
    }

    /// Re-renders one element from its timestamp attribute and `data-*`
    /// overrides. Returns `false` when the timestamp is missing or invalid.
    ///
    /// With `retireAbsolute` on, an element that ends up showing an absolute
    /// date loses the managed class and is left alone by later renders.
    pub fn render_element(&self, element: &mut Element) -> bool {
        let Some(raw) = element.data(&self.config.timestamp_attr) else {
            debug!("<{}> has no data-{}", element.tag_name, self.config.timestamp_attr);
            return false;
        };
        let target = match self.instant(raw) {
            Ok(target) => target,
            Err(e) => {
                warn!("Skipping element: {e}");
                return false;
            }
        };
        let options = self.effective_options(Some(&element.overrides()));
        let absolute = self.paint(element, &target, &options);
        if absolute && self.config.retire_absolute {
            debug!("Retiring <{}> showing \"{}\"", element.tag_name, element.text);
            element.classes.retain(|c| *c != self.config.class_name);
        }
        true
    }

    /// Re-renders every managed element in `document`, returning how many
    /// were updated.
    pub fn render_all(&self, document: &mut Document) -> usize {
        let rendered = document
            .elements
            .iter_mut()
            .filter(|element| element.is_managed(&self.config))
            .map(|element| self.render_element(element))
            .filter(|&rendered| rendered)
            .count();
        debug!("Rendered {rendered} of {} elements", document.elements.len());
        rendered
    }

    /// Writes text and title; returns whether the text is an absolute date.
    fn paint(&self, element: &mut Element, target: &Zoned, options: &Config) -> bool {
        let (text, absolute) = self.compose(target, options);
        element.text = text;
        element.title = options.add_title.then(|| Tooltip(target).to_string());
        absolute
    }
}

fn markup_override(overrides: &Overrides) -> Option<&'static str> {
    if overrides.tag_name.is_some() {
        Some("tagName")
    } else if overrides.class_name.is_some() {
        Some("className")
    } else if overrides.timestamp_attr.is_some() {
        Some("timestampAttr")
    } else {
        None
    }
}
