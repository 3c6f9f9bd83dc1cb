//! Terminal notices and run summaries.
//!
//! Components report user-facing messages through the [`Notifier`] trait so
//! the pipeline can be driven headlessly in tests. [`ConsoleNotifier`] is the
//! terminal implementation.

pub mod icons;

use console::style;
use std::path::Path;

use crate::options::ProjectOptions;
use icons::{CHECK, CROSS, FOLDER, RUNNING, SPARKLE, WARN};

/// Sink for user-facing notices.
pub trait Notifier {
    fn success(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
    /// Announce the start of a pipeline step.
    fn step(&self, message: &str);
    /// Show the resolved project parameters before any command runs.
    fn summary(&self, name: &str, project_path: &Path, options: &ProjectOptions);
}

/// Writes notices to the terminal. Warnings and errors go to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        println!("{}{}", CHECK, style(message).green());
    }

    fn warning(&self, message: &str) {
        eprintln!("{}{}", WARN, style(message).yellow());
    }

    fn error(&self, message: &str) {
        eprintln!("{}{}", CROSS, style(message).red().bold());
    }

    fn step(&self, message: &str) {
        println!();
        println!("{}{}", RUNNING, style(message).bold());
    }

    fn summary(&self, name: &str, project_path: &Path, options: &ProjectOptions) {
        print_summary(name, project_path, options);
    }
}

fn print_summary(name: &str, project_path: &Path, options: &ProjectOptions) {
    println!();
    println!("{}{}", SPARKLE, style(format!("Creating \"{}\"", name)).bold());
    println!(
        "  {}{}",
        FOLDER,
        style(project_path.display()).underlined()
    );
    for (label, enabled) in options.toggles() {
        let mark = if enabled {
            style("yes").green()
        } else {
            style("no").dim()
        };
        println!("  {:<24} {}", style(label).dim(), mark);
    }
    println!(
        "  {:<24} {}",
        style("Import alias").dim(),
        options.import_alias
    );
}
