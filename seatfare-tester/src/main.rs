mod fixture;
mod reports;
mod scenarios;
mod util;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use scenarios::{ScenarioResult, expand_scenarios, get_scenario, list_scenarios};
use util::split_csv;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Console,
    Json,
    Markdown,
}

#[derive(Debug, Parser)]
#[command(name = "seatfare-tester", version = "0.1.0")]
#[command(about = "Acceptance scenarios and seat fixtures for Seatfare seat selection")]
struct Args {
    /// Scenarios to run (comma-separated, or `all`)
    #[arg(long, default_value = "all")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report or fixture instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Write a seat fixture instead of running scenarios
    #[arg(long)]
    emit_layout: bool,

    /// Bus id for the generated fixture
    #[arg(long, default_value_t = 1)]
    bus_id: u32,

    /// First primary key of the generated fixture
    #[arg(long, default_value_t = 1)]
    start_pk: u32,

    /// Seat rows (lettered A..Z)
    #[arg(long, default_value_t = 10)]
    rows: u32,

    /// Seats per row
    #[arg(long, default_value_t = 4)]
    cols: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    if args.emit_layout {
        let mut output_target = OutputTarget::new(args.output.clone())?;
        let count = fixture::write_seater_fixture(
            &mut output_target,
            args.bus_id,
            args.start_pk,
            args.rows,
            args.cols,
        )?;
        output_target.flush_inner()?;
        if args.output.is_some() {
            println!("✅ Generated {count} seats for bus {}", args.bus_id);
        }
        return Ok(());
    }

    if args.report == ReportFormat::Console {
        announce_banner();
    }

    let start_time = Instant::now();
    let results = run_scenarios(&args);
    write_reports(&args, &results, start_time)?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }
    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target.writer(), "  {key:18} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "💺 Seatfare Scenario Tester".bright_cyan().bold());
    println!("{}", "===========================".cyan());
}

fn run_scenarios(args: &Args) -> Vec<ScenarioResult> {
    let names = expand_scenarios(&split_csv(&args.scenarios));
    let mut results = Vec::with_capacity(names.len());
    for name in names {
        let Some(scenario) = get_scenario(&name) else {
            eprintln!("⚠️  Unknown scenario: {}", name.yellow());
            continue;
        };
        if args.verbose {
            eprintln!("▶ {} - {}", scenario.key.bold(), scenario.description);
        }
        results.push(scenario.execute());
    }
    results
}

fn write_reports(args: &Args, results: &[ScenarioResult], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;
    match args.report {
        ReportFormat::Json => reports::generate_json_report(&mut output_target, results)?,
        ReportFormat::Markdown => reports::generate_markdown_report(&mut output_target, results)?,
        ReportFormat::Console => {
            if results.is_empty() {
                writeln!(&mut output_target, "No scenarios executed.")?;
            } else {
                reports::generate_console_report(
                    &mut output_target,
                    results,
                    start_time.elapsed(),
                )?;
            }
        }
    }
    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args::parse_from(["seatfare-tester"])
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "seatfare-{name}-{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ))
    }

    #[test]
    fn defaults_run_every_scenario() {
        let args = base_args();
        assert_eq!(args.report, ReportFormat::Console);
        let results = run_scenarios(&args);
        assert_eq!(results.len(), list_scenarios().count());
        assert!(results.iter().all(|r| r.passed));
    }

    #[test]
    fn unknown_scenarios_are_skipped() {
        let args = Args::parse_from(["seatfare-tester", "--scenarios", "bogus,two-seats"]);
        let results = run_scenarios(&args);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].scenario_name, "two-seats");
    }

    #[test]
    fn write_reports_emits_json_output() {
        let path = temp_path("report.json");
        let args = Args {
            report: ReportFormat::Json,
            output: Some(path.clone()),
            ..base_args()
        };
        let results = run_scenarios(&args);
        write_reports(&args, &results, Instant::now()).expect("write report");
        let contents = std::fs::read_to_string(&path).expect("report exists");
        assert!(contents.contains("\"scenario_name\": \"empty-selection\""));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn list_scenarios_writes_catalog() {
        let path = temp_path("list.txt");
        let args = Args {
            list_scenarios: true,
            output: Some(path.clone()),
            ..base_args()
        };
        assert!(maybe_list_scenarios(&args).expect("list"));
        let contents = std::fs::read_to_string(&path).expect("list exists");
        assert!(contents.contains("subset-sweep"));
        let _ = std::fs::remove_file(path);
    }
}
