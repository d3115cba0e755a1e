//! Summary printing.

use std::io::{self, Write};

use replcheck_domain::TestReport;

const RULE_WIDTH: usize = 50;

/// Writes the end-of-run summary table.
///
/// # Errors
/// Returns any error raised by `out`.
pub fn print_summary<W: Write>(out: &mut W, report: &TestReport) -> io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);

    writeln!(out)?;
    writeln!(out, "{rule}")?;
    writeln!(out, "TEST SUMMARY")?;
    writeln!(out, "{rule}")?;
    writeln!(
        out,
        "Health Check: {}",
        if report.health_passed { "PASS" } else { "FAIL" }
    )?;

    writeln!(out)?;
    writeln!(out, "Exec Tests:")?;
    for result in &report.exec_results {
        writeln!(out, "  {}: {}", result.test(), result.status())?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "Overall: {}/{} exec tests passed",
        report.passed(),
        report.total()
    )?;
    writeln!(out, "{rule}")
}
