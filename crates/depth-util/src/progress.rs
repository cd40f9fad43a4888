use std::io::Write;
use std::time::Duration;

use console::{Style, Term};
use indicatif::{ProgressBar, ProgressStyle};

/// Print a right-aligned status line to stderr: `   Resolving strings`
///
/// The `label` is right-padded to 12 characters and printed in bold green.
pub fn status(label: &str, message: &str) {
    write_status(Style::new().green().bold(), label, message);
}

/// Print a warning-style status line (bold yellow label).
pub fn status_warn(label: &str, message: &str) {
    write_status(Style::new().yellow().bold(), label, message);
}

fn write_status(style: Style, label: &str, message: &str) {
    let _ = writeln!(std::io::stderr(), "{:>12} {message}", style.apply_to(label));
}

/// Create a spinner on stderr for indeterminate progress.
///
/// When stderr is not a terminal the spinner is hidden, so piped output and
/// test harnesses stay clean.
pub fn spinner(message: &str) -> ProgressBar {
    if !Term::stderr().is_term() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}
