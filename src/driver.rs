//! Benchmark driver: load the line set, time the parse loop, report.
//!
//! The run moves through three phases. Loading reads the input lines and
//! builds the parser, both outside the timed region. Running brackets the
//! whole workload with one stopwatch; in echo mode the stdout writes sit
//! inside the measured interval, so the default figure is "parse + print"
//! throughput. Reporting prints one summary line.

use std::fs::File;
use std::hint;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use uabench_parser::UserAgentParser;
use uabench_timing::{ClockSource, Stopwatch};

use crate::cli::Args;

pub fn run(args: &Args) -> Result<()> {
    let input = read_lines(&args.input);
    let parser = UserAgentParser::from_yaml_file(&args.rules)
        .with_context(|| format!("failed to load rule set {}", args.rules.display()))?;

    let source = if args.coarse {
        ClockSource::Coarse
    } else {
        ClockSource::Fine
    };
    info!(
        lines = input.len(),
        repeat = args.repeat,
        ?source,
        echo = !args.no_echo,
        "starting benchmark"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut watch = Stopwatch::with_source(source);
    watch.start();
    bench_loop(&parser, &input, args.repeat, !args.no_echo, &mut out)
        .context("failed writing benchmark output")?;
    watch.stop();

    report(&mut out, &watch).context("failed writing benchmark summary")?;
    Ok(())
}

/// The single summary line closing every run.
fn report<W: Write>(out: &mut W, watch: &Stopwatch) -> io::Result<()> {
    writeln!(out, "program runs for {} ms.", watch.elapsed_ms())
}

/// The timed region: `repeat` consecutive passes over `input` in file order,
/// parsing every line. With `echo`, each parse writes the line and its
/// rendered result; without, the result is kept alive for the optimizer but
/// nothing is printed.
fn bench_loop<W: Write>(
    parser: &UserAgentParser,
    input: &[String],
    repeat: u32,
    echo: bool,
    out: &mut W,
) -> io::Result<()> {
    for _ in 0..repeat {
        for line in input {
            let client = parser.parse(line);
            if echo {
                writeln!(out, "{line}")?;
                writeln!(out, "{client}")?;
            } else {
                hint::black_box(&client);
            }
        }
    }
    Ok(())
}

/// Ordered input lines. An unopenable file degrades to an empty set rather
/// than failing the run, and a read error mid-file ends the set at the lines
/// read so far; both keep the benchmark reportable.
fn read_lines(path: &Path) -> Vec<String> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %err,
                "input file unreadable, benchmarking zero lines"
            );
            return Vec::new();
        }
    };
    BufReader::new(file)
        .lines()
        .map_while(io::Result::ok)
        .collect()
}

#[cfg(test)]
mod tests {
    use tempfile::NamedTempFile;

    use super::*;

    const RULES: &str = r#"
user_agent_parsers:
  - regex: '(Firefox)/(\d+)'
"#;

    fn parser() -> UserAgentParser {
        UserAgentParser::from_yaml_str(RULES).unwrap()
    }

    fn lines(buf: &[u8]) -> Vec<&str> {
        std::str::from_utf8(buf).unwrap().lines().collect()
    }

    #[test]
    fn three_lines_twice_yields_twelve_output_lines() {
        let input = vec![
            "Firefox/1".to_string(),
            "Firefox/2".to_string(),
            "curl".to_string(),
        ];
        let mut out = Vec::new();
        bench_loop(&parser(), &input, 2, true, &mut out).unwrap();

        let lines = lines(&out);
        // 3 lines x 2 repetitions x (line + result).
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[0], "Firefox/1");
        assert_eq!(lines[1], "Firefox 1/Other/Other");
        assert_eq!(lines[4], "curl");
        assert_eq!(lines[5], "Other/Other/Other");
    }

    #[test]
    fn repetitions_are_consecutive_not_interleaved() {
        let input = vec!["Firefox/1".to_string(), "Firefox/2".to_string()];
        let mut out = Vec::new();
        bench_loop(&parser(), &input, 3, true, &mut out).unwrap();

        let echoed: Vec<&str> = lines(&out).into_iter().step_by(2).collect();
        assert_eq!(
            echoed,
            [
                "Firefox/1",
                "Firefox/2",
                "Firefox/1",
                "Firefox/2",
                "Firefox/1",
                "Firefox/2"
            ]
        );
    }

    #[test]
    fn no_echo_produces_no_output() {
        let input = vec!["Firefox/1".to_string()];
        let mut out = Vec::new();
        bench_loop(&parser(), &input, 5, false, &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn empty_input_is_a_valid_benchmark() {
        let mut out = Vec::new();
        bench_loop(&parser(), &[], 100, true, &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn read_lines_preserves_file_order() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "first").unwrap();
        writeln!(file, "second").unwrap();
        writeln!(file, "third").unwrap();

        let lines = read_lines(file.path());
        assert_eq!(lines, ["first", "second", "third"]);
    }

    #[test]
    fn summary_line_format() {
        // A freshly composed, never-stopped watch reads zero elapsed.
        let watch = Stopwatch::from_parts(ClockSource::Fine, 0, false);
        let mut out = Vec::new();
        report(&mut out, &watch).unwrap();
        assert_eq!(std::str::from_utf8(&out).unwrap(), "program runs for 0 ms.\n");
    }

    #[test]
    fn missing_input_file_degrades_to_zero_lines() {
        // Deliberately lenient: an unopenable input reports a zero-line run
        // instead of failing.
        assert!(read_lines(Path::new("/no/such/agents.txt")).is_empty());
    }
}
