//! Coercion of caller-supplied values into instants.
//!
//! Callers hand the engine whatever they have: a [`Timestamp`], a [`Zoned`],
//! Unix seconds as a number or numeric string, or an arbitrary JSON value read
//! from a document or an MCP request. Anything that does not coerce to a
//! finite number of seconds is rejected with
//! [`SmartdateError::InvalidTimestamp`].

use jiff::{Timestamp, Zoned};
use serde_json::Value;

use crate::error::{Result, SmartdateError};

/// A value the engine can try to interpret as an instant.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// An exact instant
    Instant(Timestamp),
    /// An instant with a time zone attached
    Zoned(Zoned),
    /// Whole Unix seconds
    Seconds(i64),
    /// Unix seconds with a fractional part, kept to the millisecond
    FractionalSeconds(f64),
    /// Text that may hold a signed decimal number of seconds
    Text(String),
    /// Anything else; only numbers and numeric strings are accepted
    Value(Value),
}

impl Input {
    /// Interprets the input as an instant.
    ///
    /// # Errors
    ///
    /// Returns `SmartdateError::InvalidTimestamp` for non-numeric text,
    /// booleans, null, objects, arrays, non-finite numbers and seconds outside
    /// the supported range.
    pub fn to_timestamp(&self) -> Result<Timestamp> {
        match self {
            Input::Instant(ts) => Ok(*ts),
            Input::Zoned(zdt) => Ok(zdt.timestamp()),
            Input::Seconds(seconds) => from_seconds(*seconds),
            Input::FractionalSeconds(seconds) => from_fractional_seconds(*seconds),
            Input::Text(text) => parse_seconds(text),
            Input::Value(value) => match value {
                Value::Number(number) => match number.as_i64() {
                    Some(seconds) => from_seconds(seconds),
                    None => number
                        .as_f64()
                        .ok_or_else(|| SmartdateError::invalid_timestamp(number))
                        .and_then(from_fractional_seconds),
                },
                Value::String(text) => parse_seconds(text),
                other => Err(SmartdateError::invalid_timestamp(other)),
            },
        }
    }
}

fn from_seconds(seconds: i64) -> Result<Timestamp> {
    Timestamp::from_second(seconds).map_err(|_| SmartdateError::invalid_timestamp(seconds))
}

fn from_fractional_seconds(seconds: f64) -> Result<Timestamp> {
    let millis = (seconds * 1000.0).round();
    // Casting saturates, so anything beyond i64 lands out of Timestamp range.
    if !millis.is_finite() {
        return Err(SmartdateError::invalid_timestamp(seconds));
    }
    Timestamp::from_millisecond(millis as i64)
        .map_err(|_| SmartdateError::invalid_timestamp(seconds))
}

fn parse_seconds(text: &str) -> Result<Timestamp> {
    let trimmed = text.trim();
    if let Ok(seconds) = trimmed.parse::<i64>() {
        return from_seconds(seconds);
    }
    match trimmed.parse::<f64>() {
        Ok(seconds) if seconds.is_finite() => from_fractional_seconds(seconds),
        _ => Err(SmartdateError::invalid_timestamp(format!("{text:?}"))),
    }
}

impl From<Timestamp> for Input {
    fn from(ts: Timestamp) -> Self {
        Input::Instant(ts)
    }
}

impl From<Zoned> for Input {
    fn from(zdt: Zoned) -> Self {
        Input::Zoned(zdt)
    }
}

impl From<&Zoned> for Input {
    fn from(zdt: &Zoned) -> Self {
        Input::Zoned(zdt.clone())
    }
}

impl From<i64> for Input {
    fn from(seconds: i64) -> Self {
        Input::Seconds(seconds)
    }
}

impl From<i32> for Input {
    fn from(seconds: i32) -> Self {
        Input::Seconds(i64::from(seconds))
    }
}

impl From<u32> for Input {
    fn from(seconds: u32) -> Self {
        Input::Seconds(i64::from(seconds))
    }
}

impl From<f64> for Input {
    fn from(seconds: f64) -> Self {
        Input::FractionalSeconds(seconds)
    }
}

impl From<&str> for Input {
    fn from(text: &str) -> Self {
        Input::Text(text.to_string())
    }
}

impl From<String> for Input {
    fn from(text: String) -> Self {
        Input::Text(text)
    }
}

impl From<bool> for Input {
    fn from(flag: bool) -> Self {
        Input::Value(Value::Bool(flag))
    }
}

impl From<Value> for Input {
    fn from(value: Value) -> Self {
        Input::Value(value)
    }
}

impl<T: Into<Input>> From<Option<T>> for Input {
    fn from(value: Option<T>) -> Self {
        value.map_or(Input::Value(Value::Null), Into::into)
    }
}
