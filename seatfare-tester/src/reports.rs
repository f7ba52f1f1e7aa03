use anyhow::Result;
use chrono::Utc;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;
use std::time::Duration;

use crate::scenarios::ScenarioResult;

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    passed: usize,
    failed: usize,
    results: &'a [ScenarioResult],
}

fn counts(results: &[ScenarioResult]) -> (usize, usize) {
    let passed = results.iter().filter(|r| r.passed).count();
    (passed, results.len() - passed)
}

pub fn generate_console_report(
    out: &mut dyn Write,
    results: &[ScenarioResult],
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Seat Scenario Results".bright_cyan().bold())?;
    writeln!(out, "{}", "========================".cyan())?;

    let (passed, failed) = counts(results);
    writeln!(out, "Total scenarios: {}", results.len())?;
    writeln!(out, "Passed: {}", passed.to_string().green())?;
    writeln!(out, "Failed: {}", failed.to_string().red())?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        writeln!(
            out,
            "{status} {} ({:.3}ms)",
            result.scenario_name.bold(),
            result.duration_ms
        )?;
        for failure in &result.failures {
            writeln!(out, "     • {}", failure.red())?;
        }
    }
    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, results: &[ScenarioResult]) -> Result<()> {
    let (passed, failed) = counts(results);
    let report = JsonReport {
        generated_at: Utc::now().to_rfc3339(),
        passed,
        failed,
        results,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut dyn Write, results: &[ScenarioResult]) -> Result<()> {
    writeln!(out, "# Seatfare Scenario Results\n")?;
    writeln!(out, "_Generated {}_\n", Utc::now().format("%Y-%m-%d %H:%M:%S UTC"))?;
    writeln!(out, "| Scenario | Status | Time (ms) | Failures |")?;
    writeln!(out, "|----------|--------|-----------|----------|")?;
    for result in results {
        let status = if result.passed { "PASS" } else { "FAIL" };
        let failures = result.failures.join("; ").replace('|', "\\|");
        writeln!(
            out,
            "| {} | {status} | {:.3} | {failures} |",
            result.scenario_name, result.duration_ms
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<ScenarioResult> {
        vec![
            ScenarioResult {
                scenario_name: "single-seat".to_string(),
                passed: true,
                duration_ms: 0.25,
                failures: Vec::new(),
            },
            ScenarioResult {
                scenario_name: "two-seats".to_string(),
                passed: false,
                duration_ms: 0.5,
                failures: vec!["total was \"0.00\" | expected".to_string()],
            },
        ]
    }

    #[test]
    fn json_report_counts_results() {
        let mut buf = Vec::new();
        generate_json_report(&mut buf, &sample()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["passed"], 1);
        assert_eq!(value["failed"], 1);
        assert_eq!(value["results"][1]["scenario_name"], "two-seats");
    }

    #[test]
    fn markdown_report_escapes_pipes() {
        let mut buf = Vec::new();
        generate_markdown_report(&mut buf, &sample()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("| single-seat | PASS |"));
        assert!(text.contains("\\| expected"));
    }

    #[test]
    fn console_report_lists_failures() {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        generate_console_report(&mut buf, &sample(), Duration::from_millis(3)).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Passed: 1"));
        assert!(text.contains("❌ FAIL two-seats"));
    }
}
