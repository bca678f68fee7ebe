pub mod clock;
pub mod stopwatch;

pub use crate::clock::{ClockSource, adjust, read_adjusted};
pub use crate::stopwatch::Stopwatch;
