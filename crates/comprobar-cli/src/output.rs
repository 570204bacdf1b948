//! Styled terminal output for run reports.

use crate::runner::RunReport;
use console::style;

/// Print a run report to stdout
pub fn print_report(report: &RunReport) {
    println!();
    for outcome in &report.outcomes {
        let status = if outcome.passed {
            style("PASS").green().bold()
        } else {
            style("FAIL").red().bold()
        };
        println!(
            "  {status}  {}  ({} ms)",
            outcome.name,
            outcome.duration.as_millis()
        );
        if let Some(error) = &outcome.error {
            println!("        {}", style(error).red());
        }
    }
    println!();
    let summary = format!(
        "{} passed, {} failed, {} total in {:.2}s",
        report.passed_count(),
        report.failed_count(),
        report.total(),
        report.duration.as_secs_f64()
    );
    if report.all_passed() {
        println!("{}", style(summary).green());
    } else {
        println!("{}", style(summary).red());
    }
}
