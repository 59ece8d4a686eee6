//! English phrases: `"Jan 13, 2000"`, `"2:15 pm"`, `"5 min ago"`.

use super::{Locale, Mode, PhraseArgs, Proximity};
use crate::time::twelve_hour_clock;

const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

const MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Builds the `en` locale.
pub fn locale() -> Locale {
    Locale::new("en", MONTHS, MONTHS_SHORT)
        .with_mode(Mode::Date, date)
        .with_mode(Mode::Time, time)
        .with_mode(Mode::DateTime, datetime)
        .with_mode(Mode::Past, past)
        .with_mode(Mode::Future, future)
}

fn date(locale: &Locale, args: &PhraseArgs<'_>) -> Option<String> {
    let target = args.target;
    Some(format!(
        "{} {}, {}",
        locale.month_name(target.month(), args.full_month_names),
        target.day(),
        target.year()
    ))
}

fn time(_: &Locale, args: &PhraseArgs<'_>) -> Option<String> {
    Some(twelve_hour_clock(args.target).to_string())
}

fn datetime(locale: &Locale, args: &PhraseArgs<'_>) -> Option<String> {
    Some(format!(
        "{} at {}",
        locale.phrase(Mode::Date.as_str(), args)?,
        locale.phrase(Mode::Time.as_str(), args)?
    ))
}

fn past(locale: &Locale, args: &PhraseArgs<'_>) -> Option<String> {
    let phrase = match Proximity::past(args)? {
        Proximity::UnderMinute => "less than a minute ago".to_string(),
        Proximity::Minutes(n) => format!("{n} min ago"),
        Proximity::SameDay => format!("today at {}", clock(locale, args)),
        Proximity::AdjacentDay => format!("yesterday at {}", clock(locale, args)),
    };
    Some(phrase)
}

fn future(locale: &Locale, args: &PhraseArgs<'_>) -> Option<String> {
    let phrase = match Proximity::future(args)? {
        Proximity::UnderMinute => "in less than a minute".to_string(),
        Proximity::Minutes(n) => format!("in {n} min"),
        Proximity::SameDay => format!("today at {}", clock(locale, args)),
        Proximity::AdjacentDay => format!("tomorrow at {}", clock(locale, args)),
    };
    Some(phrase)
}

// Installed `time` phrase, or the built-in clock if it was removed.
fn clock(locale: &Locale, args: &PhraseArgs<'_>) -> String {
    locale
        .phrase(Mode::Time.as_str(), args)
        .unwrap_or_else(|| twelve_hour_clock(args.target).to_string())
}
