use clap::Parser;

use uabench::cli::Args;
use uabench::{driver, logging};

fn main() {
    logging::init_logging();

    let args = Args::parse();
    if let Err(err) = driver::run(&args) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
