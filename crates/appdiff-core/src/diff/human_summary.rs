//! Human-readable rendering of a [`DiffReport`].

use crate::diff::report::DiffReport;

/// Printed when local and remote states are equivalent
pub const NO_DIFFERENCES: &str = "Deployed app is identical to proposed version";

/// Heading printed above the entry lines
pub const CHANGES_HEADER: &str = "The following reflects the proposed changes to your app";

/// Render a report as text: the no-op message, or the heading followed by
/// one line per entry.
pub fn render_report(report: &DiffReport) -> String {
    if report.is_empty() {
        return NO_DIFFERENCES.to_string();
    }
    let mut out = String::from(CHANGES_HEADER);
    for line in report.lines() {
        out.push('\n');
        out.push_str(&line);
    }
    out
}
