//! Terminal output for the `algo` commands.
//!
//! Formatting lives in plain functions returning `String`s so it can be
//! tested; the `print_*` wrappers only add styling and write to stdout.

use std::path::Path;
use std::time::Duration;

use console::{style, Color, StyledObject};
use indicatif::{ProgressBar, ProgressStyle};

use algo_compiler::{CompileOutput, TargetKind};

const ACCENT: Color = Color::Color256(38);
const FAILURE: Color = Color::Color256(203);
const SUCCESS: Color = Color::Color256(114);

/// Kind of a one-line status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Done,
    Failed,
    Note,
    Quiet,
}

impl Status {
    fn mark(self) -> StyledObject<&'static str> {
        match self {
            Self::Done => style("✔").fg(SUCCESS).bold(),
            Self::Failed => style("✘").fg(FAILURE).bold(),
            Self::Note => style("›").fg(ACCENT),
            Self::Quiet => style(" ").dim(),
        }
    }
}

/// Prints `msg` after the status mark.
pub fn status(kind: Status, msg: &str) {
    let text = match kind {
        Status::Failed => style(msg).fg(FAILURE),
        Status::Quiet => style(msg).dim(),
        Status::Done | Status::Note => style(msg),
    };
    println!(" {} {}", kind.mark(), text);
}

/// Spinner shown while sources are translated.
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let spinner_style = ProgressStyle::default_spinner()
        .tick_strings(&["·  ", "·· ", "···", " ··", "  ·", "   "])
        .template(" {spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(spinner_style);
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

/// `path:line`, as an OSC 8 hyperlink in terminals that support it.
pub fn error_location(path: &Path, line: usize) -> String {
    let shown = format!("{}:{}", path.display(), line);
    match std::fs::canonicalize(path) {
        Ok(absolute) => format!(
            "\x1b]8;;file://{}#{}\x07{}\x1b]8;;\x07",
            absolute.display(),
            line,
            shown
        ),
        Err(_) => shown,
    }
}

/// Singular or plural count: `1 file`, `3 files`.
pub fn count(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{} {}", n, noun)
    } else {
        format!("{} {}s", n, noun)
    }
}

/// Lines of the report printed after `algo compile` writes files.
pub fn compile_summary(target: TargetKind, outputs: &[CompileOutput], elapsed: Duration) -> Vec<String> {
    let total: usize = outputs.iter().map(|o| o.lines).sum();
    let mut lines = vec![format!(
        "{} → {} ({} in {}ms)",
        count(outputs.len(), "file"),
        target,
        count(total, "line"),
        elapsed.as_millis()
    )];

    let width = outputs
        .iter()
        .map(|o| o.source.display().to_string().chars().count())
        .max()
        .unwrap_or(0);
    for output in outputs {
        lines.push(format!(
            "  {:<width$}  →  {}  [{}]",
            output.source.display().to_string(),
            output.output.display(),
            count(output.lines, "line"),
            width = width
        ));
    }
    lines
}

pub fn print_compile_summary(target: TargetKind, outputs: &[CompileOutput], elapsed: Duration) {
    if outputs.is_empty() {
        status(Status::Quiet, "No .algo files found.");
        return;
    }
    let mut lines = compile_summary(target, outputs, elapsed).into_iter();
    if let Some(headline) = lines.next() {
        status(Status::Done, &headline);
    }
    for line in lines {
        println!(" {}", style(line).dim());
    }
}

/// Headline of a successful `algo check`.
pub fn check_summary(files: usize) -> String {
    format!("{} valid for pseudo and cpp", count(files, "file"))
}

/// Shown when `algo` runs without a command on a terminal.
pub fn print_welcome(version: &str) {
    println!();
    println!(
        " {} {}",
        style("algo").fg(ACCENT).bold(),
        style(format!("v{}", version)).dim()
    );
    println!(" {}", style(".algo → pseudocode / C++").dim());
    println!();
    status(Status::Note, "algo init            create main.algo and algo.json");
    status(Status::Note, "algo compile <PATH>  translate a file or a directory");
    status(Status::Note, "algo watch <PATH>    recompile on every save");
    println!();
}

/// Lists the files written by `algo init`.
pub fn print_created(dir: &Path, files: &[(String, &str)]) {
    status(Status::Done, &format!("Created in {}:", dir.display()));
    let width = files.iter().map(|(name, _)| name.chars().count()).max().unwrap_or(0);
    for (name, description) in files {
        println!(
            "     {:<width$}  {}",
            style(name).fg(ACCENT),
            style(description).dim(),
            width = width
        );
    }
}
