use std::io::{self, Write};
use std::time::Duration;

use colored::{ColoredString, Colorize};

use crate::diff::{DiffReport, DiffStatus};

/// Renders a [`DiffReport`] as the console summary.
pub struct ReportPrinter<'a> {
    report: &'a DiffReport,
    list_entries: bool,
}

impl<'a> ReportPrinter<'a> {
    pub fn new(report: &'a DiffReport, list_entries: bool) -> Self {
        Self {
            report,
            list_entries,
        }
    }

    /// Enables colored status labels when stdout supports them
    pub fn detect_color_support() {
        let enabled = supports_color::on(supports_color::Stream::Stdout).is_some();
        colored::control::set_override(enabled);
    }

    pub fn print(&self, out: &mut impl Write, elapsed: Duration) -> io::Result<()> {
        if self.list_entries {
            self.print_entries(out)?;
        }

        let summary = self.report.summary();
        writeln!(out, "Unchanged: {}", summary.unchanged)?;
        writeln!(out, "Modified: {}", summary.modified)?;
        writeln!(out, "Deleted: {}", summary.deleted)?;
        writeln!(out, "Added: {}", summary.added)?;
        if summary.failed > 0 {
            writeln!(out, "Failed: {}", summary.failed)?;
        }
        writeln!(out, "Running time: {}ms", elapsed.as_millis())
    }

    fn print_entries(&self, out: &mut impl Write) -> io::Result<()> {
        for entry in self.report.entries() {
            match &entry.status {
                Ok(status) => writeln!(out, "{} {}", Self::label(*status), entry.path)?,
                Err(error) => writeln!(out, "{} {}: {}", "FAILED".red().bold(), entry.path, error)?,
            }
        }
        Ok(())
    }

    fn label(status: DiffStatus) -> ColoredString {
        match status {
            DiffStatus::Unchanged => "UNCHANGED".dimmed(),
            DiffStatus::Modified => "MODIFIED".yellow(),
            DiffStatus::Deleted => "DELETED".red(),
            DiffStatus::Added => "ADDED".green(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::DiffEngine;
    use crate::digest::MetroDigester;
    use crate::filesystem::{Inventory, TraversalOptions};
    use std::fs;
    use tempfile::TempDir;

    async fn scenario_report() -> (TempDir, TempDir, DiffReport) {
        let old_dir = TempDir::new().unwrap();
        let new_dir = TempDir::new().unwrap();
        fs::write(old_dir.path().join("a.txt"), "hello").unwrap();
        fs::write(old_dir.path().join("b.txt"), "bbb").unwrap();
        fs::write(new_dir.path().join("a.txt"), "hellp").unwrap();
        fs::write(new_dir.path().join("c.txt"), "ccc").unwrap();

        let old = Inventory::build(old_dir.path(), &TraversalOptions::default());
        let new = Inventory::build(new_dir.path(), &TraversalOptions::default());
        let report = DiffEngine::new(&old, &new, &MetroDigester).run().await;
        (old_dir, new_dir, report)
    }

    fn render(report: &DiffReport, list_entries: bool) -> String {
        colored::control::set_override(false);
        let mut out = Vec::new();
        ReportPrinter::new(report, list_entries)
            .print(&mut out, Duration::from_millis(42))
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[compio::test]
    async fn prints_counts_and_running_time() {
        let (_old, _new, report) = scenario_report().await;

        assert_eq!(
            render(&report, false),
            "Unchanged: 0\nModified: 1\nDeleted: 1\nAdded: 1\nRunning time: 42ms\n"
        );
    }

    #[compio::test]
    async fn lists_entries_before_the_summary() {
        let (_old, _new, report) = scenario_report().await;

        let rendered = render(&report, true);

        assert!(rendered.starts_with("MODIFIED a.txt\nDELETED b.txt\nADDED c.txt\nUnchanged: 0\n"));
    }

    #[compio::test]
    async fn failed_comparisons_are_listed_and_counted() {
        let old_dir = TempDir::new().unwrap();
        let new_dir = TempDir::new().unwrap();
        fs::write(old_dir.path().join("gone.txt"), "data").unwrap();
        fs::write(new_dir.path().join("gone.txt"), "data").unwrap();
        let old = Inventory::build(old_dir.path(), &TraversalOptions::default());
        let new = Inventory::build(new_dir.path(), &TraversalOptions::default());
        fs::remove_file(new_dir.path().join("gone.txt")).unwrap();
        let report = DiffEngine::new(&old, &new, &MetroDigester).run().await;

        let rendered = render(&report, true);

        assert!(rendered.starts_with("FAILED gone.txt: Failed to query size of"));
        assert!(rendered.contains("Added: 0\nFailed: 1\nRunning time: 42ms\n"));
    }

    #[test]
    fn empty_report_prints_zero_counts() {
        let rendered = render(&DiffReport::default(), true);

        assert_eq!(
            rendered,
            "Unchanged: 0\nModified: 0\nDeleted: 0\nAdded: 0\nRunning time: 42ms\n"
        );
    }
}
