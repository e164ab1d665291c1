//! CLI output formatting.
//!
//! Each job is shown as a header line with its name, followed by indented
//! context: the source file, then what was written (or why nothing was).
//!
//! ```text
//! thumbnail
//!     Source: photos/20150213_185641.jpg
//!     → output/20150213_185641.thumb.jpg (160x120)
//! resize-gif
//!     Source: samples/snakeware.gif
//!     → output/snakeware.resized.gif (200x150, 12 frames)
//! resize-png
//!     Source: samples/snakeware.png
//!     failed: Source image not found: samples/snakeware.png
//!
//! 2 written, 1 failed
//! ```
//!
//! # Architecture
//!
//! Every view has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::imaging::{ExifProfile, GeneratedOutput, Ifd};
use crate::worker::{JobOutcome, JobReport, RunReport, WorkerEvent};
use std::path::Path;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `→ path (WxH)` or `→ path (WxH, N frames)`.
fn output_line(output: &GeneratedOutput) -> String {
    let size = match output.frames {
        Some(1) => format!("{}x{}, 1 frame", output.width, output.height),
        Some(n) => format!("{}x{}, {} frames", output.width, output.height, n),
        None => format!("{}x{}", output.width, output.height),
    };
    format!("→ {} ({})", output.path.display(), size)
}

fn outcome_line(outcome: &JobOutcome) -> String {
    match outcome {
        JobOutcome::Written { output } => output_line(output),
        JobOutcome::NoThumbnail => "no EXIF thumbnail".to_string(),
        JobOutcome::Failed { error } => format!("failed: {}", error),
    }
}

/// Format one finished job.
pub fn format_job_report(report: &JobReport) -> Vec<String> {
    vec![
        report.job.label().to_string(),
        format!("{}Source: {}", indent(1), report.source.display()),
        format!("{}{}", indent(1), outcome_line(&report.outcome)),
    ]
}

/// Format a worker progress event as display lines.
///
/// Start events are silent; the finished event carries everything.
pub fn format_worker_event(event: &WorkerEvent) -> Vec<String> {
    match event {
        WorkerEvent::JobStarted { .. } => Vec::new(),
        WorkerEvent::JobFinished(report) => format_job_report(report),
    }
}

/// Format the closing summary of a run.
pub fn format_run_summary(report: &RunReport) -> Vec<String> {
    let written = report
        .jobs
        .iter()
        .filter(|j| matches!(j.outcome, JobOutcome::Written { .. }))
        .count();
    let skipped = report
        .jobs
        .iter()
        .filter(|j| matches!(j.outcome, JobOutcome::NoThumbnail))
        .count();

    let mut parts = vec![format!("{} written", written)];
    if skipped > 0 {
        parts.push(format!("{} skipped", skipped));
    }
    parts.push(format!("{} failed", report.failed()));
    vec![String::new(), parts.join(", ")]
}

pub fn print_run_summary(report: &RunReport) {
    for line in format_run_summary(report) {
        println!("{}", line);
    }
}

/// Format an EXIF profile grouped by IFD.
///
/// ```text
/// photos/20150213_185641.jpg
///     Image
///         Make: Samsung
///         Orientation: row 0 at top and column 0 at left
///     Thumbnail
///         JPEGInterchangeFormat: 1026
/// ```
pub fn format_exif_profile(source: &Path, profile: Option<&ExifProfile>) -> Vec<String> {
    let mut lines = vec![source.display().to_string()];
    let Some(profile) = profile else {
        lines.push(format!("{}no EXIF profile", indent(1)));
        return lines;
    };

    let groups: [(&str, fn(Ifd) -> bool); 3] = [
        ("Image", |ifd| ifd == Ifd::Primary),
        ("Thumbnail", |ifd| ifd == Ifd::Thumbnail),
        ("Other", |ifd| matches!(ifd, Ifd::Other(_))),
    ];
    for (title, in_group) in groups {
        let entries: Vec<_> = profile
            .entries()
            .iter()
            .filter(|e| in_group(e.ifd))
            .collect();
        if entries.is_empty() {
            continue;
        }
        lines.push(format!("{}{}", indent(1), title));
        for entry in entries {
            lines.push(format!("{}{}: {}", indent(2), entry.tag, entry.value));
        }
    }
    if profile.has_thumbnail() {
        lines.push(format!("{}embedded JPEG thumbnail", indent(1)));
    }
    lines
}

pub fn print_exif_profile(source: &Path, profile: Option<&ExifProfile>) {
    for line in format_exif_profile(source, profile) {
        println!("{}", line);
    }
}
