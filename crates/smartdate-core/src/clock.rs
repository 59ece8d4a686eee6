//! The single source of "now" for the formatting engine.

use jiff::Timestamp;

/// Abstraction over the current time.
///
/// The engine asks its clock once per formatting call. Swapping the clock
/// (see [`crate::EngineBuilder::with_clock`]) freezes or shifts "now" without
/// touching any other component. Any `Fn() -> Timestamp` closure is a clock.
pub trait Clock: Send + Sync {
    /// Returns the current instant according to this clock.
    fn now(&self) -> Timestamp;
}

/// Clock backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

impl<F> Clock for F
where
    F: Fn() -> Timestamp + Send + Sync,
{
    fn now(&self) -> Timestamp {
        self()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicI64, Ordering};

    use super::*;

    #[test]
    fn test_fixed_clock() {
        let ts = Timestamp::from_second(1_421_154_793).unwrap();
        let clock = FixedClock(ts);
        assert_eq!(clock.now(), ts);
        assert_eq!(clock.now(), ts);
    }

    #[test]
    fn test_closure_clock() {
        let ticks = AtomicI64::new(0);
        let clock = move || {
            let second = ticks.fetch_add(60, Ordering::SeqCst);
            Timestamp::from_second(second).unwrap()
        };
        assert_eq!(clock.now().as_second(), 0);
        assert_eq!(clock.now().as_second(), 60);
    }

    #[test]
    fn test_system_clock_moves_forward() {
        let first = SystemClock.now();
        let second = SystemClock.now();
        assert!(second >= first);
    }
}
