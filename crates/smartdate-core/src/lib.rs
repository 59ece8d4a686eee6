//! Locale-aware timestamp phrases.
//!
//! Turns an instant into a short phrase relative to "now" ("2 min ago",
//! "tomorrow at 3:00 pm") or an absolute one ("Jan 13, 2000"), in the
//! requested locale and mode.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐   ┌──────────────┐   ┌────────────────┐   ┌──────────┐
//! │  Input   │──▶│ EngineContext│──▶│ LocaleRegistry │──▶│  phrase  │
//! │ (input)  │   │ Config+Clock │   │ Locale / Mode  │   │ (String) │
//! └──────────┘   └──────────────┘   └────────────────┘   └──────────┘
//!                       │
//!                       ▼
//!               ┌───────────────┐
//!               │    binding    │  Element / Document rendering
//!               └───────────────┘
//! ```
//!
//! - [`engine`]: [`EngineContext`] and [`EngineBuilder`], the formatting
//!   pipeline
//! - [`locale`]: bundled `en` and `ru` locales and runtime mode registration
//! - [`config`]: [`Config`], [`Overrides`] and configuration files
//! - [`binding`]: elements and documents kept in sync with the engine
//! - [`time`] and [`clock`]: calendar helpers and the source of "now"
//!
//! # Quick Start
//!
//! ```rust
//! use smartdate_core::Overrides;
//!
//! // The process-wide engine uses the system clock and time zone.
//! let phrase = smartdate_core::format(jiff::Timestamp::now(), None);
//! assert_eq!(phrase.as_deref(), Some("less than a minute ago"));
//!
//! let ru = Overrides {
//!     locale: Some("ru".to_string()),
//!     mode: Some("date".to_string()),
//!     ..Default::default()
//! };
//! assert!(smartdate_core::format("4120761600", Some(&ru)).is_some());
//! assert_eq!(smartdate_core::format("42lol", None), None);
//! ```

pub mod binding;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod locale;
pub mod time;

use std::sync::{LazyLock, PoisonError, RwLock};

// Re-export commonly used types
pub use binding::{Document, Element, Tooltip};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{Config, Overrides};
pub use engine::{EngineBuilder, EngineContext};
pub use error::{Result, SmartdateError};
pub use input::Input;
pub use locale::{Locale, LocaleRegistry, Mode, PhraseArgs, PhraseFn};

static ENGINE: LazyLock<RwLock<EngineContext>> =
    LazyLock::new(|| RwLock::new(EngineContext::new()));

/// Formats `input` with the process-wide engine.
///
/// See [`EngineContext::format`].
pub fn format(input: impl Into<Input>, overrides: Option<&Overrides>) -> Option<String> {
    ENGINE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .format(input, overrides)
}

/// Formats `input` with the process-wide engine, reporting rejected input.
///
/// # Errors
///
/// Returns `SmartdateError::InvalidTimestamp` for input that is not an instant.
pub fn try_format(input: impl Into<Input>, overrides: Option<&Overrides>) -> Result<String> {
    ENGINE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .try_format(input, overrides)
}

/// Merges `overrides` into the process-wide base configuration.
pub fn setup(overrides: &Overrides) {
    with_engine(|engine| engine.setup(overrides));
}

/// Runs `f` with exclusive access to the process-wide engine, e.g. to register
/// a locale or replace the clock.
///
/// The engine lock is not reentrant. Calling [`format`], [`try_format`],
/// [`setup`] or `with_engine` from inside `f` deadlocks, and so does a phrase
/// function installed on the process-wide engine that calls back into these
/// functions. Use the `&mut EngineContext` handed to `f` instead.
pub fn with_engine<R>(f: impl FnOnce(&mut EngineContext) -> R) -> R {
    let mut engine = ENGINE.write().unwrap_or_else(PoisonError::into_inner);
    f(&mut engine)
}
