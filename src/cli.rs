use std::path::PathBuf;

use clap::Parser;

/// Times `REPEAT` passes over `INPUT`, parsing every line with the rule set
/// from `RULES`, and reports the aggregate elapsed milliseconds.
#[derive(Debug, Parser)]
#[command(
    name = "uabench",
    version,
    about = "User agent parsing throughput microbenchmark"
)]
pub struct Args {
    /// uap-core style regexes.yaml rule set
    pub rules: PathBuf,

    /// Input file, one user agent per line
    pub input: PathBuf,

    /// Number of passes over the input
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub repeat: u32,

    /// Time parsing only: skip echoing lines and results to stdout
    #[arg(long)]
    pub no_echo: bool,

    /// Read the cheaper millisecond-resolution monotonic clock
    #[arg(long)]
    pub coarse: bool,
}
