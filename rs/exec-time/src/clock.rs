//! Monotonic timestamps.
//!
//! Readings come straight from `CLOCK_MONOTONIC` so they are immune to
//! wall-clock adjustments. The nanosecond unit is nominal: the real
//! granularity is whatever `clock_getres(2)` reports for the host.

use nix::sys::time::TimeSpec;
use nix::time::{clock_getres, clock_gettime, ClockId};

use crate::error::{Error, Result};

const NANOS_PER_SEC: u64 = 1_000_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn now() -> Result<Self> {
        let ts = clock_gettime(ClockId::CLOCK_MONOTONIC)?;
        Ok(Timestamp(to_nanos(&ts)))
    }

    pub fn from_nanos(nanos: u64) -> Self {
        Timestamp(nanos)
    }

    /// Nanoseconds from `start` to `self`.
    pub fn elapsed_since(&self, start: Timestamp) -> Result<u64> {
        self.0
            .checked_sub(start.0)
            .ok_or(Error::ClockRegressed {
                start: start.0,
                end: self.0,
            })
    }
}

/// Granularity of the monotonic clock in nanoseconds.
pub fn resolution() -> Result<u64> {
    let ts = clock_getres(ClockId::CLOCK_MONOTONIC)?;
    Ok(to_nanos(&ts))
}

fn to_nanos(ts: &TimeSpec) -> u64 {
    (ts.tv_sec() as u64) * NANOS_PER_SEC + ts.tv_nsec() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readings_never_decrease() {
        let start = Timestamp::now().unwrap();
        let end = Timestamp::now().unwrap();
        assert!(end >= start);
        assert!(end.elapsed_since(start).is_ok());
    }

    #[test]
    fn regression_is_an_error() {
        let start = Timestamp::from_nanos(500);
        let end = Timestamp::from_nanos(100);
        match end.elapsed_since(start) {
            Err(Error::ClockRegressed { start, end }) => {
                assert_eq!(start, 500);
                assert_eq!(end, 100);
            }
            other => panic!("expected regression, got {:?}", other),
        }
    }

    #[test]
    fn elapsed_is_exact_difference() {
        let start = Timestamp::from_nanos(1_000);
        let end = Timestamp::from_nanos(3_500);
        assert_eq!(end.elapsed_since(start).unwrap(), 2_500);
        assert_eq!(start.elapsed_since(start).unwrap(), 0);
    }

    #[test]
    fn resolution_is_at_most_one_second() {
        let res = resolution().unwrap();
        assert!(res > 0);
        assert!(res <= NANOS_PER_SEC);
    }

    #[test]
    fn timespec_conversion() {
        let ts = TimeSpec::new(2, 5);
        assert_eq!(to_nanos(&ts), 2_000_000_005);
    }
}
