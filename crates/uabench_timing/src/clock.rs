//! Monotonic clock reads with backward-jump correction.
//!
//! Some monotonic clock implementations can step backwards under kernel or
//! virtualization anomalies, which turns an unsigned elapsed-time subtraction
//! into an absurd value. Every read here is folded through [`adjust`] against
//! the caller's previous reading, so observed time never decreases.

/// Which OS clock a stopwatch reads.
///
/// `Fine` resolves below a microsecond at a slightly higher per-call cost.
/// `Coarse` resolves at roughly a millisecond but is cheaper; on Linux it maps
/// to `CLOCK_MONOTONIC_COARSE`, elsewhere it degrades to the fine source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClockSource {
    #[default]
    Fine,
    Coarse,
}

/// Pure correction step: a raw reading that stepped back behind `prev` is
/// replaced by `prev`, so the interval since the last reading collapses to
/// zero instead of wrapping.
#[inline]
pub fn adjust(prev: u64, raw: u64) -> u64 {
    raw.max(prev)
}

/// Current reading from `source`, corrected against `prev`.
///
/// Stateless: callers carry their own baseline, so there is no process-global
/// mutable clock state here.
#[inline]
pub fn read_adjusted(prev: u64, source: ClockSource) -> u64 {
    adjust(prev, read_raw(source))
}

#[cfg(unix)]
fn clock_id(source: ClockSource) -> libc::clockid_t {
    #[cfg(target_os = "linux")]
    const COARSE: libc::clockid_t = libc::CLOCK_MONOTONIC_COARSE;
    #[cfg(not(target_os = "linux"))]
    const COARSE: libc::clockid_t = libc::CLOCK_MONOTONIC;

    match source {
        ClockSource::Fine => libc::CLOCK_MONOTONIC,
        ClockSource::Coarse => COARSE,
    }
}

#[cfg(unix)]
fn read_raw(source: ClockSource) -> u64 {
    let mut ts = libc::timespec {
        tv_sec: 0,
        tv_nsec: 0,
    };
    // clock_gettime cannot fail for the monotonic ids used here.
    unsafe {
        libc::clock_gettime(clock_id(source), &mut ts);
    }
    ts.tv_sec as u64 * 1_000_000_000 + ts.tv_nsec as u64
}

#[cfg(not(unix))]
fn read_raw(_source: ClockSource) -> u64 {
    use once_cell::sync::Lazy;
    use std::time::Instant;

    static EPOCH: Lazy<Instant> = Lazy::new(Instant::now);
    EPOCH.elapsed().as_nanos() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjust_passes_forward_readings_through() {
        assert_eq!(adjust(100, 250), 250);
        assert_eq!(adjust(100, 100), 100);
    }

    #[test]
    fn adjust_holds_the_line_on_backward_jumps() {
        assert_eq!(adjust(1_000_000_000, 3), 1_000_000_000);
    }

    #[test]
    fn adjusted_sequence_is_non_decreasing() {
        // Includes one arbitrarily large backward jump mid-sequence.
        let raws = [10u64, 25, 25, 7_000, 3, 6_999, 7_001, u64::MAX, 0];
        let mut prev = 0u64;
        let mut corrected = Vec::new();
        for raw in raws {
            prev = adjust(prev, raw);
            corrected.push(prev);
        }
        assert!(corrected.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn raw_reads_advance() {
        let a = read_raw(ClockSource::Fine);
        let b = read_adjusted(a, ClockSource::Fine);
        assert!(b >= a);
    }

    #[test]
    fn coarse_source_reads() {
        let a = read_adjusted(0, ClockSource::Coarse);
        assert!(a > 0);
    }
}
