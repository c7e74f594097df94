use gopkg_rewrite::RunSummary;
use std::time::Duration;

/// Closing line of the text report
pub fn summary_line(summary: &RunSummary, elapsed: Duration) -> String {
    let verb = if summary.dry_run { "Would rewrite" } else { "Rewrote" };
    let noun = if summary.rewritten == 1 { "file" } else { "files" };
    format!(
        "{} {} {} of {} in {} ({} up to date, {} skipped, {} failed)",
        verb,
        summary.rewritten,
        noun,
        summary.visited,
        elapsed_label(elapsed),
        summary.up_to_date,
        summary.skipped,
        summary.failed
    )
}

/// Microseconds below 1ms, milliseconds below 1s
fn elapsed_label(elapsed: Duration) -> String {
    match elapsed.as_micros() {
        0..=999 => format!("{}µs", elapsed.as_micros()),
        1_000..=999_999 => format!("{}ms", elapsed.as_millis()),
        _ => format!("{:.2}s", elapsed.as_secs_f64()),
    }
}
