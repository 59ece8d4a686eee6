//! Threshold table shared by the `past` and `future` phrases.

use super::PhraseArgs;
use crate::time::day_difference;

const MINUTE_MS: i64 = 60 * 1000;
const HOUR_MS: i64 = 60 * MINUTE_MS;

/// How close an instant is to now, in the buckets locales have phrases for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Proximity {
    /// Less than 60 seconds away, including anything on the wrong side of now
    UnderMinute,
    /// Whole minutes away, `1..=59`
    Minutes(i64),
    /// An hour or more away on the same calendar day
    SameDay,
    /// On the previous (past) or next (future) calendar day
    AdjacentDay,
}

impl Proximity {
    /// Classifies an instant at or before now.
    ///
    /// Returns `None` once the instant is earlier than yesterday.
    pub fn past(args: &PhraseArgs<'_>) -> Option<Self> {
        Self::classify(args.elapsed_ms(), day_difference(args.now, args.target), -1)
    }

    /// Classifies an instant at or after now.
    ///
    /// Returns `None` once the instant is later than tomorrow.
    pub fn future(args: &PhraseArgs<'_>) -> Option<Self> {
        Self::classify(-args.elapsed_ms(), day_difference(args.now, args.target), 1)
    }

    fn classify(elapsed_ms: i64, days: i64, adjacent: i64) -> Option<Self> {
        if elapsed_ms < MINUTE_MS {
            Some(Proximity::UnderMinute)
        } else if elapsed_ms < HOUR_MS {
            Some(Proximity::Minutes(elapsed_ms / MINUTE_MS))
        } else if days == 0 {
            Some(Proximity::SameDay)
        } else if days == adjacent {
            Some(Proximity::AdjacentDay)
        } else {
            None
        }
    }
}
