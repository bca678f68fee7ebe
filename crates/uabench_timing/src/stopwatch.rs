use crate::clock::{self, ClockSource};

/// Nanosecond-resolution wall-clock stopwatch over the drift-corrected
/// monotonic clock.
///
/// Not safe for concurrent use; each instance times one logical interval on
/// one thread, which the `&mut self` mutators make structural.
#[derive(Debug, Clone)]
pub struct Stopwatch {
    start_ns: u64,
    stop_ns: u64,
    source: ClockSource,
    running: bool,
}

impl Stopwatch {
    /// New stopwatch on the fine-grained clock, started immediately.
    pub fn new() -> Self {
        Self::with_source(ClockSource::Fine)
    }

    /// New stopwatch on the given clock source, started immediately.
    pub fn with_source(source: ClockSource) -> Self {
        let mut watch = Self {
            start_ns: 0,
            stop_ns: 0,
            source,
            running: false,
        };
        watch.start();
        watch
    }

    /// Resume or compose a timing session from an existing start point
    /// without touching the clock.
    pub fn from_parts(source: ClockSource, start_ns: u64, running: bool) -> Self {
        Self {
            start_ns,
            stop_ns: 0,
            source,
            running,
        }
    }

    pub fn start(&mut self) {
        self.start_ns = self.nanoseconds();
        self.running = true;
    }

    /// Freeze the interval. Calling `stop` while already stopped simply
    /// re-captures the stop point.
    pub fn stop(&mut self) {
        self.stop_ns = self.nanoseconds();
        self.running = false;
    }

    /// Clear both endpoints without starting a new interval.
    pub fn reset(&mut self) {
        self.start_ns = 0;
        self.stop_ns = 0;
        self.running = false;
    }

    pub fn restart(&mut self) {
        self.start();
    }

    pub fn elapsed(&self) -> u64 {
        self.elapsed_ns()
    }

    /// Elapsed nanoseconds: against the current corrected reading while
    /// running, frozen as `stop - start` otherwise. Saturating, so the
    /// result never wraps below zero.
    pub fn elapsed_ns(&self) -> u64 {
        if self.running {
            self.nanoseconds().saturating_sub(self.start_ns)
        } else {
            self.stop_ns.saturating_sub(self.start_ns)
        }
    }

    pub fn elapsed_us(&self) -> u64 {
        self.elapsed_ns() / 1_000
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ns() / 1_000_000
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_ns() as f64 / 1e9
    }

    /// Raw start point, for chaining one stopwatch off another via
    /// [`Stopwatch::from_parts`].
    pub fn start_ns(&self) -> u64 {
        self.start_ns
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Current corrected reading, baselined on our own previous start so a
    /// backward clock jump can never land before the interval began.
    fn nanoseconds(&self) -> u64 {
        clock::read_adjusted(self.start_ns, self.source)
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}
