//! Tests for the engine module.

use jiff::{
    civil::date,
    tz::{self, TimeZone},
    ToSpan, Zoned,
};

use super::*;
use crate::{clock::FixedClock, time::two_digit_pad};

fn local(y: i16, mo: i8, d: i8, h: i8, mi: i8, s: i8) -> Zoned {
    date(y, mo, d).at(h, mi, s, 0).to_zoned(TimeZone::UTC).unwrap()
}

/// 2015-01-13 13:13:13, the instant every test treats as now
fn now() -> Zoned {
    local(2015, 1, 13, 13, 13, 13)
}

fn frozen_engine() -> EngineContext {
    EngineBuilder::new()
        .with_clock(FixedClock(now().timestamp()))
        .with_time_zone(TimeZone::UTC)
        .build()
        .expect("Failed to build engine")
}

fn mode(name: &str) -> Overrides {
    Overrides {
        mode: Some(name.to_string()),
        ..Default::default()
    }
}

fn ru(mode_name: Option<&str>) -> Overrides {
    Overrides {
        locale: Some("ru".to_string()),
        mode: mode_name.map(str::to_string),
        ..Default::default()
    }
}

fn plus(z: &Zoned, span: jiff::Span) -> Zoned {
    z.checked_add(span).unwrap()
}

fn check_past_en(engine: &EngineContext, overrides: Option<&Overrides>) {
    let f = |z: &Zoned| engine.format(z, overrides).unwrap();
    let now = now();
    assert_eq!(f(&now), "less than a minute ago");
    assert_eq!(f(&plus(&now, (-1).minute())), "1 min ago");
    assert_eq!(f(&plus(&now, (-2).minutes())), "2 min ago");
    assert_eq!(f(&plus(&now, (-59).minutes())), "59 min ago");
    assert_eq!(f(&plus(&now, (-60).minutes())), "today at 12:13 pm");
    assert_eq!(f(&local(2015, 1, 12, 23, 13, 13)), "yesterday at 11:13 pm");
    assert_eq!(f(&local(2015, 1, 12, 12, 13, 13)), "yesterday at 12:13 pm");
    assert_eq!(f(&local(2015, 1, 12, 0, 13, 13)), "yesterday at 12:13 am");
    assert_eq!(f(&local(2015, 1, 11, 23, 13, 13)), "Jan 11, 2015");
    assert_eq!(f(&local(2000, 12, 31, 0, 0, 0)), "Dec 31, 2000");
}

fn check_future_en(engine: &EngineContext, overrides: Option<&Overrides>) {
    let f = |z: &Zoned| engine.format(z, overrides).unwrap();
    let soon = plus(&now(), 5.seconds());
    assert_eq!(f(&soon), "in less than a minute");
    assert_eq!(f(&plus(&soon, 1.minute())), "in 1 min");
    assert_eq!(f(&plus(&soon, 2.minutes())), "in 2 min");
    assert_eq!(f(&plus(&soon, 59.minutes())), "in 59 min");
    assert_eq!(f(&plus(&soon, 60.minutes())), "today at 2:13 pm");
    assert_eq!(f(&local(2015, 1, 14, 0, 13, 18)), "tomorrow at 12:13 am");
    assert_eq!(f(&local(2015, 1, 14, 12, 13, 18)), "tomorrow at 12:13 pm");
    assert_eq!(f(&local(2015, 1, 14, 23, 13, 18)), "tomorrow at 11:13 pm");
    assert_eq!(f(&local(2015, 1, 15, 0, 13, 18)), "Jan 15, 2015");
    assert_eq!(f(&local(2100, 8, 1, 0, 0, 0)), "Aug 1, 2100");
}

fn check_past_ru(engine: &EngineContext, overrides: &Overrides) {
    let f = |z: &Zoned| engine.format(z, Some(overrides)).unwrap();
    let now = now();
    assert_eq!(f(&now), "менее 1 мин назад");
    assert_eq!(f(&plus(&now, (-1).minute())), "1 мин назад");
    assert_eq!(f(&plus(&now, (-59).minutes())), "59 мин назад");
    assert_eq!(f(&plus(&now, (-60).minutes())), "сегодня в 12:13");
    assert_eq!(f(&local(2015, 1, 12, 23, 13, 13)), "вчера в 23:13");
    assert_eq!(f(&local(2015, 1, 12, 0, 13, 13)), "вчера в 00:13");
    assert_eq!(f(&local(2015, 1, 11, 23, 13, 13)), "11 янв 2015");
    assert_eq!(f(&local(2000, 12, 31, 0, 0, 0)), "31 дек 2000");
}

fn check_future_ru(engine: &EngineContext, overrides: &Overrides) {
    let f = |z: &Zoned| engine.format(z, Some(overrides)).unwrap();
    let soon = plus(&now(), 5.seconds());
    assert_eq!(f(&soon), "в течение минуты");
    assert_eq!(f(&plus(&soon, 1.minute())), "через 1 мин");
    assert_eq!(f(&plus(&soon, 59.minutes())), "через 59 мин");
    assert_eq!(f(&plus(&soon, 60.minutes())), "сегодня в 14:13");
    assert_eq!(f(&local(2015, 1, 14, 0, 13, 18)), "завтра в 00:13");
    assert_eq!(f(&local(2015, 1, 14, 23, 13, 18)), "завтра в 23:13");
    assert_eq!(f(&local(2015, 1, 15, 0, 13, 18)), "15 янв 2015");
    assert_eq!(f(&local(2100, 8, 1, 0, 0, 0)), "1 авг 2100");
}

#[test]
fn test_auto_mode_is_default_explicit_and_fallback() {
    let engine = frozen_engine();
    check_past_en(&engine, None);
    check_future_en(&engine, None);

    for name in ["auto", "AUTO", "lol"] {
        let overrides = mode(name);
        check_past_en(&engine, Some(&overrides));
        check_future_en(&engine, Some(&overrides));
    }
}

#[test]
fn test_auto_mode_in_russian() {
    let engine = frozen_engine();
    for name in [None, Some("auto"), Some("lol")] {
        check_past_ru(&engine, &ru(name));
        check_future_ru(&engine, &ru(name));
    }
}

#[test]
fn test_past_mode_blocks_future_dates() {
    let engine = frozen_engine();
    let past = mode("past");
    check_past_en(&engine, Some(&past));

    let mut date = now();
    for span in [1.minute(), 1.hour(), 24.hours(), (24 * 100).hours()] {
        date = plus(&date, span);
        assert_eq!(engine.format(&date, Some(&past)).unwrap(), "less than a minute ago");
        assert_eq!(engine.format(&date, Some(&ru(Some("past")))).unwrap(), "менее 1 мин назад");
    }
}

#[test]
fn test_future_mode_blocks_past_dates() {
    let engine = frozen_engine();
    let future = mode("future");
    check_future_en(&engine, Some(&future));

    let mut date = now();
    assert_eq!(engine.format(&date, Some(&future)).unwrap(), "in less than a minute");
    for span in [1.minute(), 1.hour(), 24.hours(), (24 * 100).hours()] {
        date = plus(&date, -span);
        assert_eq!(engine.format(&date, Some(&future)).unwrap(), "in less than a minute");
        assert_eq!(engine.format(&date, Some(&ru(Some("future")))).unwrap(), "в течение минуты");
    }
}

#[test]
fn test_date_mode_ignores_proximity() {
    let engine = frozen_engine();
    let dates = mode("date");
    let now = now();
    for offset in [0.minutes(), (-1).minute(), (-61).minutes(), 1.minute(), 61.minutes()] {
        let target = plus(&now, offset);
        assert_eq!(engine.format(&target, Some(&dates)).unwrap(), "Jan 13, 2015");
        assert_eq!(engine.format(&target, Some(&ru(Some("date")))).unwrap(), "13 янв 2015");
    }
}

#[test]
fn test_time_and_datetime_modes() {
    let engine = frozen_engine();
    let target = local(2000, 1, 13, 14, 15, 16);
    assert_eq!(engine.format(&target, Some(&mode("time"))).unwrap(), "2:15 pm");
    assert_eq!(
        engine.format(&target, Some(&mode("DateTime"))).unwrap(),
        "Jan 13, 2000 at 2:15 pm"
    );
    assert_eq!(engine.format(&target, Some(&ru(Some("time")))).unwrap(), "14:15");
}

#[test]
fn test_unix_timestamps() {
    let engine = frozen_engine();
    assert_eq!(engine.format(0i64, None).unwrap(), "Jan 1, 1970");
    assert_eq!(engine.format(100_000i64, None).unwrap(), "Jan 2, 1970");
    assert_eq!(engine.format("0", None).unwrap(), "Jan 1, 1970");
    assert_eq!(engine.format(-10_000i64, None).unwrap(), "Dec 31, 1969");
    assert_eq!(engine.format("-10000", None).unwrap(), "Dec 31, 1969");
    assert_eq!(engine.format("+100000", None).unwrap(), "Jan 2, 1970");
    assert_eq!(engine.format(0i64, Some(&ru(None))).unwrap(), "1 янв 1970");
}

#[test]
fn test_numeric_and_string_inputs_agree() {
    let engine = frozen_engine();
    let now = now().timestamp().as_second();
    let samples = [
        0,
        -10_000,
        now,
        now - 59,
        now - 60,
        now - 3_600,
        now - 86_400,
        now + 30,
        now + 7_200,
        now + 86_400,
        4_120_761_600,
    ];
    for t in samples {
        assert_eq!(engine.format(t, None), engine.format(t.to_string(), None), "t = {t}");
    }
}

#[test]
fn test_invalid_input_returns_none() {
    let engine = frozen_engine();
    assert_eq!(engine.format(None::<i64>, None), None);
    assert_eq!(engine.format("42lol", None), None);
    assert_eq!(engine.format(true, None), None);
    assert_eq!(engine.format(false, None), None);
    assert_eq!(engine.format(serde_json::Value::Null, None), None);
    assert_eq!(engine.format(serde_json::json!({}), None), None);
    assert_eq!(engine.format(serde_json::json!([]), None), None);
    assert!(matches!(
        engine.try_format("42lol", None),
        Err(crate::SmartdateError::InvalidTimestamp { .. })
    ));
}

#[test]
fn test_minute_boundary() {
    let engine = frozen_engine();
    let now = now();
    assert_eq!(engine.format(&plus(&now, (-59).seconds()), None).unwrap(), "less than a minute ago");
    assert_eq!(engine.format(&plus(&now, (-60).seconds()), None).unwrap(), "1 min ago");
    assert_eq!(engine.format(&plus(&now, 59.seconds()), None).unwrap(), "in less than a minute");
    assert_eq!(engine.format(&plus(&now, 60.seconds()), None).unwrap(), "in 1 min");
}

#[test]
fn test_equal_instant_is_past() {
    let engine = frozen_engine();
    assert_eq!(engine.format(&now(), None).unwrap(), "less than a minute ago");
}

#[test]
fn test_day_rollover() {
    let mut engine = frozen_engine();
    engine.set_clock(FixedClock(local(2015, 1, 13, 1, 30, 0).timestamp()));
    assert_eq!(
        engine.format(&local(2015, 1, 12, 23, 59, 59), None).unwrap(),
        "yesterday at 11:59 pm"
    );

    engine.set_clock(FixedClock(local(2015, 1, 13, 22, 30, 0).timestamp()));
    assert_eq!(
        engine.format(&local(2015, 1, 14, 0, 0, 0), None).unwrap(),
        "tomorrow at 12:00 am"
    );
    assert_eq!(
        engine.format(&local(2015, 1, 13, 23, 59, 59), None).unwrap(),
        "today at 11:59 pm"
    );
}

#[test]
fn test_day_rollover_across_dst() {
    let tz = TimeZone::posix("EST5EDT,M3.2.0,M11.1.0").unwrap();
    let at = |d: i8, h: i8, m: i8| date(2015, 3, d).at(h, m, 0, 0).to_zoned(tz.clone()).unwrap();
    let engine = EngineBuilder::new()
        .with_clock(FixedClock(at(9, 1, 30).timestamp()))
        .with_time_zone(tz.clone())
        .build()
        .unwrap();
    assert_eq!(engine.format(&at(8, 0, 30), None).unwrap(), "yesterday at 12:30 am");
    assert_eq!(engine.format(&at(7, 23, 30), None).unwrap(), "Mar 7, 2015");
}

#[test]
fn test_time_zone_defines_calendar_days() {
    let mut engine = frozen_engine();
    assert_eq!(engine.format(-10_000i64, None).unwrap(), "Dec 31, 1969");

    engine.set_time_zone(TimeZone::fixed(tz::offset(3)));
    assert_eq!(engine.format(-10_000i64, None).unwrap(), "Jan 1, 1970");
    assert_eq!(engine.format(&now(), Some(&mode("time"))).unwrap(), "4:13 pm");
}

#[test]
fn test_zoned_input_is_projected_into_engine_zone() {
    let engine = frozen_engine();
    let elsewhere = date(2015, 1, 14)
        .at(1, 0, 0, 0)
        .to_zoned(TimeZone::fixed(tz::offset(3)))
        .unwrap();
    assert_eq!(engine.format(&elsewhere, None).unwrap(), "today at 10:00 pm");
}

#[test]
fn test_capitalize() {
    let engine = frozen_engine();
    let en = Overrides {
        capitalize: Some(true),
        ..Default::default()
    };
    let ru = Overrides {
        capitalize: Some(true),
        ..ru(None)
    };
    assert_eq!(engine.format(&now(), Some(&en)).unwrap(), "Less than a minute ago");
    assert_eq!(engine.format(&now(), Some(&ru)).unwrap(), "Менее 1 мин назад");
    assert_eq!(
        engine.format(&local(2015, 1, 12, 23, 13, 13), Some(&ru)).unwrap(),
        "Вчера в 23:13"
    );
    assert_eq!(engine.format(4_120_761_600i64, Some(&ru)).unwrap(), "1 авг 2100");
    assert_eq!(capitalize(""), "");
}

#[test]
fn test_full_month_names() {
    let engine = frozen_engine();
    let full = Overrides {
        full_month_names: Some(true),
        ..Default::default()
    };
    assert_eq!(
        engine.format(&local(2000, 12, 31, 0, 0, 0), Some(&full)).unwrap(),
        "December 31, 2000"
    );
    let full_ru = Overrides {
        full_month_names: Some(true),
        ..ru(None)
    };
    assert_eq!(
        engine.format(&local(2000, 12, 31, 0, 0, 0), Some(&full_ru)).unwrap(),
        "31 декабря 2000"
    );
}

#[test]
fn test_unknown_locale_falls_back_to_english() {
    let engine = frozen_engine();
    let overrides = Overrides {
        locale: Some("tlh".to_string()),
        ..Default::default()
    };
    assert_eq!(engine.format(&now(), Some(&overrides)).unwrap(), "less than a minute ago");
    let upper = Overrides {
        locale: Some("RU".to_string()),
        ..Default::default()
    };
    assert_eq!(engine.format(&now(), Some(&upper)).unwrap(), "менее 1 мин назад");
}

#[test]
fn test_idempotent() {
    let engine = frozen_engine();
    let target = local(2015, 1, 12, 20, 0, 0);
    let overrides = ru(Some("past"));
    assert_eq!(engine.format(&target, Some(&overrides)), engine.format(&target, Some(&overrides)));
}

#[test]
fn test_setup_changes_base_configuration() {
    let mut engine = frozen_engine();
    engine.setup(&ru(None));
    assert_eq!(engine.format(0i64, None).unwrap(), "1 янв 1970");
    assert_eq!(engine.config().locale, "ru");

    // per-call overrides still win
    let en = Overrides {
        locale: Some("en".to_string()),
        ..Default::default()
    };
    assert_eq!(engine.format(0i64, Some(&en)).unwrap(), "Jan 1, 1970");
    assert_eq!(engine.effective_options(Some(&en)).locale, "en");
    assert_eq!(engine.config().locale, "ru");

    engine.replace_config(Config::default());
    assert_eq!(engine.format(0i64, None).unwrap(), "Jan 1, 1970");
}

#[test]
fn test_custom_mode() {
    let mut engine = frozen_engine();
    engine.setup(&Overrides {
        mode: Some("special".to_string()),
        full_month_names: Some(true),
        ..Default::default()
    });
    let target = local(2000, 1, 13, 14, 15, 16);
    // undefined custom mode falls back to auto, then to the date
    assert_eq!(engine.format(&target, None).unwrap(), "January 13, 2000");

    engine
        .locales_mut()
        .get_mut("en")
        .unwrap()
        .set_mode("special", |locale, args| {
            Some(format!(
                "{} | {}",
                locale.phrase("date", args)?,
                locale.phrase("time", args)?
            ))
        });
    assert_eq!(engine.format(&target, None).unwrap(), "January 13, 2000 | 2:15 pm");
}

#[test]
fn test_overwrite_builtin_mode() {
    let mut engine = frozen_engine();
    engine.setup(&ru(Some("datetime")));
    let target = local(2000, 1, 13, 14, 15, 16);
    assert_eq!(engine.format(&target, None).unwrap(), "13 янв 2000 в 14:15");

    let ru = engine.locales_mut().get_mut("ru").unwrap();
    let original = ru.mode("time").cloned().unwrap();
    ru.set_mode(Mode::Time, move |locale, args| {
        Some(format!(
            "{}:{}",
            original(locale, args)?,
            two_digit_pad(args.target.second())
        ))
    });
    assert_eq!(engine.format(&target, None).unwrap(), "13 янв 2000 в 14:15:16");
}

#[test]
fn test_mode_returning_nothing_falls_back_to_date() {
    let mut engine = frozen_engine();
    engine
        .locales_mut()
        .get_mut("en")
        .unwrap()
        .set_mode(Mode::Past, |_, _| None);
    assert_eq!(engine.format(&now(), None).unwrap(), "Jan 13, 2015");
}
