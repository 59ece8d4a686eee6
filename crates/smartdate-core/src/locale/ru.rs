//! Russian phrases: `"13 янв 2000"`, `"14:15"`, `"5 мин назад"`.

use super::{Locale, Mode, PhraseArgs, Proximity};
use crate::time::two_digit_pad;

const MONTHS: [&str; 12] = [
    "января", "февраля", "марта", "апреля", "мая", "июня", "июля", "августа", "сентября",
    "октября", "ноября", "декабря",
];

const MONTHS_SHORT: [&str; 12] = [
    "янв", "фев", "мар", "апр", "мая", "июн", "июл", "авг", "сен", "окт", "ноя", "дек",
];

/// Builds the `ru` locale.
pub fn locale() -> Locale {
    Locale::new("ru", MONTHS, MONTHS_SHORT)
        .with_mode(Mode::Date, date)
        .with_mode(Mode::Time, time)
        .with_mode(Mode::DateTime, datetime)
        .with_mode(Mode::Past, past)
        .with_mode(Mode::Future, future)
}

fn date(locale: &Locale, args: &PhraseArgs<'_>) -> Option<String> {
    let target = args.target;
    Some(format!(
        "{} {} {}",
        target.day(),
        locale.month_name(target.month(), args.full_month_names),
        target.year()
    ))
}

fn time(_: &Locale, args: &PhraseArgs<'_>) -> Option<String> {
    Some(clock24(args))
}

fn datetime(locale: &Locale, args: &PhraseArgs<'_>) -> Option<String> {
    Some(format!(
        "{} в {}",
        locale.phrase(Mode::Date.as_str(), args)?,
        locale.phrase(Mode::Time.as_str(), args)?
    ))
}

fn past(locale: &Locale, args: &PhraseArgs<'_>) -> Option<String> {
    let phrase = match Proximity::past(args)? {
        Proximity::UnderMinute => "менее 1 мин назад".to_string(),
        Proximity::Minutes(n) => format!("{n} мин назад"),
        Proximity::SameDay => format!("сегодня в {}", clock(locale, args)),
        Proximity::AdjacentDay => format!("вчера в {}", clock(locale, args)),
    };
    Some(phrase)
}

fn future(locale: &Locale, args: &PhraseArgs<'_>) -> Option<String> {
    let phrase = match Proximity::future(args)? {
        Proximity::UnderMinute => "в течение минуты".to_string(),
        Proximity::Minutes(n) => format!("через {n} мин"),
        Proximity::SameDay => format!("сегодня в {}", clock(locale, args)),
        Proximity::AdjacentDay => format!("завтра в {}", clock(locale, args)),
    };
    Some(phrase)
}

fn clock24(args: &PhraseArgs<'_>) -> String {
    format!(
        "{}:{}",
        two_digit_pad(args.target.hour()),
        two_digit_pad(args.target.minute())
    )
}

fn clock(locale: &Locale, args: &PhraseArgs<'_>) -> String {
    locale
        .phrase(Mode::Time.as_str(), args)
        .unwrap_or_else(|| clock24(args))
}
