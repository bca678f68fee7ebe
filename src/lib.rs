//! uabench: times N repetitions of parsing a line-oriented input file with a
//! rule-set driven user agent parser and reports aggregate elapsed time.

pub mod cli;
pub mod driver;
pub mod logging;
