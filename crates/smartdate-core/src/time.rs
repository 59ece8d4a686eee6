//! Calendar helpers shared by the locale phrase functions.
//!
//! Everything here works on [`Zoned`] values so that day boundaries follow the
//! local calendar of the engine's time zone rather than elapsed milliseconds.

use std::fmt;

use jiff::Zoned;

/// Signed number of calendar days from `a`'s local date to `b`'s local date.
///
/// Time of day is ignored, so 23:59 and 00:01 on consecutive dates are one
/// day apart. Civil date subtraction keeps the result exact across DST
/// transitions.
///
/// # Examples
///
/// ```rust
/// use jiff::{civil::date, tz::TimeZone};
/// use smartdate_core::time::day_difference;
///
/// let late = date(2015, 1, 12).at(23, 59, 0, 0).to_zoned(TimeZone::UTC).unwrap();
/// let early = date(2015, 1, 13).at(0, 1, 0, 0).to_zoned(TimeZone::UTC).unwrap();
/// assert_eq!(day_difference(&late, &early), 1);
/// assert_eq!(day_difference(&early, &late), -1);
/// ```
pub fn day_difference(a: &Zoned, b: &Zoned) -> i64 {
    i64::from((b.date() - a.date()).get_days())
}

/// Renders `n` with a leading zero below ten (`7` → `"07"`).
pub fn two_digit_pad(n: impl Into<i64>) -> String {
    format!("{:02}", n.into())
}

/// Half of the day on a 12-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    pub fn as_str(&self) -> &'static str {
        match self {
            Meridiem::Am => "am",
            Meridiem::Pm => "pm",
        }
    }
}

/// Time of day on a 12-hour clock, displayed as `"2:15 pm"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwelveHourClock {
    /// Hour in `1..=12`
    pub hour: i8,
    pub minute: i8,
    pub meridiem: Meridiem,
}

impl fmt::Display for TwelveHourClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} {}",
            self.hour,
            two_digit_pad(self.minute),
            self.meridiem.as_str()
        )
    }
}

/// Maps the instant's hour onto a 12-hour clock (0 → 12 am, 13 → 1 pm).
pub fn twelve_hour_clock(instant: &Zoned) -> TwelveHourClock {
    let hour = instant.hour();
    let meridiem = if hour >= 12 { Meridiem::Pm } else { Meridiem::Am };
    let hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    TwelveHourClock {
        hour,
        minute: instant.minute(),
        meridiem,
    }
}

#[cfg(test)]
mod tests {
    use jiff::{civil::date, tz::TimeZone};

    use super::*;

    fn utc(y: i16, m: i8, d: i8, h: i8, min: i8) -> Zoned {
        date(y, m, d).at(h, min, 0, 0).to_zoned(TimeZone::UTC).unwrap()
    }

    #[test]
    fn test_day_difference_same_day() {
        let x = utc(2015, 1, 13, 13, 13);
        assert_eq!(day_difference(&x, &x), 0);
        assert_eq!(day_difference(&utc(2015, 1, 13, 0, 0), &utc(2015, 1, 13, 23, 59)), 0);
    }

    #[test]
    fn test_day_difference_is_antisymmetric() {
        let pairs = [
            (utc(2015, 1, 13, 13, 13), utc(2015, 1, 12, 23, 59)),
            (utc(2000, 12, 31, 0, 0), utc(2001, 1, 1, 0, 0)),
            (utc(1969, 12, 31, 12, 0), utc(2100, 8, 1, 0, 0)),
            (utc(2016, 2, 28, 8, 0), utc(2016, 3, 1, 8, 0)),
        ];
        for (a, b) in &pairs {
            assert_eq!(day_difference(a, b), -day_difference(b, a));
        }
        assert_eq!(day_difference(&pairs[3].0, &pairs[3].1), 2);
    }

    #[test]
    fn test_day_difference_across_dst_start() {
        let tz = TimeZone::posix("EST5EDT,M3.2.0,M11.1.0").unwrap();
        // 2015-03-08 is 23 hours long in this zone
        let before = date(2015, 3, 8).at(0, 30, 0, 0).to_zoned(tz.clone()).unwrap();
        let after = date(2015, 3, 9).at(0, 10, 0, 0).to_zoned(tz).unwrap();
        assert_eq!(day_difference(&before, &after), 1);
        assert_eq!(day_difference(&after, &before), -1);
    }

    #[test]
    fn test_two_digit_pad() {
        assert_eq!(two_digit_pad(0), "00");
        assert_eq!(two_digit_pad(7i8), "07");
        assert_eq!(two_digit_pad(10), "10");
        assert_eq!(two_digit_pad(59), "59");
    }

    #[test]
    fn test_twelve_hour_clock() {
        assert_eq!(twelve_hour_clock(&utc(2015, 1, 13, 0, 5)).to_string(), "12:05 am");
        assert_eq!(twelve_hour_clock(&utc(2015, 1, 13, 9, 30)).to_string(), "9:30 am");
        assert_eq!(twelve_hour_clock(&utc(2015, 1, 13, 12, 0)).to_string(), "12:00 pm");
        assert_eq!(twelve_hour_clock(&utc(2015, 1, 13, 13, 13)).to_string(), "1:13 pm");
        assert_eq!(twelve_hour_clock(&utc(2015, 1, 13, 23, 59)).to_string(), "11:59 pm");
    }

    #[test]
    fn test_twelve_hour_clock_fields() {
        let clock = twelve_hour_clock(&utc(2000, 1, 13, 14, 15));
        assert_eq!(clock.hour, 2);
        assert_eq!(clock.minute, 15);
        assert_eq!(clock.meridiem, Meridiem::Pm);
    }
}
