//! Terminal views for finished sessions
//!
//! Each view is rendered to a `String` and printed by the caller, so the
//! layout can be checked without a terminal.

use std::fmt::Write;

use console::Style;

use crate::diff::{DiffRecord, FileStatus};
use crate::installer::UpdateOutcome;
use crate::registry::Category;
use crate::session::{DiffReport, InstallLog, ListingEntry, SessionReport, SummaryReport};

/// Render any session report
pub fn render_report(report: &SessionReport) -> String {
    match report {
        SessionReport::Summary(summary) => render_summary(summary),
        SessionReport::Listing(entries) => render_listing(entries),
        SessionReport::Results(log) => render_results(log),
        SessionReport::Diff(diff) => render_diff(diff),
    }
}

/// Registry totals per category against what is installed
pub fn render_summary(summary: &SummaryReport) -> String {
    let bold = Style::new().bold();
    let not_found = summary.not_found_counts();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} {}",
        bold.apply_to("Registry:"),
        Style::new().cyan().apply_to(&summary.registry_url)
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  {:<12} {:>9} {:>10} {:>10}",
        bold.apply_to("Category"),
        "Registry",
        "Installed",
        "Not found"
    );
    for category in Category::ALL {
        let _ = writeln!(
            out,
            "  {:<12} {:>9} {:>10} {:>10}",
            category.label(),
            summary.registry.get(category),
            summary.installed.get(category),
            not_found.get(category)
        );
    }
    let _ = writeln!(
        out,
        "  {:<12} {:>9} {:>10} {:>10}",
        bold.apply_to("Total"),
        summary.registry.total(),
        summary.installed.total(),
        not_found.total()
    );

    if !summary.not_found.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{} {}",
            bold.apply_to("Not found locally:"),
            Style::new().dim().apply_to(summary.not_found.join(", "))
        );
        let _ = writeln!(
            out,
            "Run with {} to verify and install them.",
            Style::new().cyan().apply_to("--add-missing")
        );
    }
    out
}

/// Dry run of `--add-all`
pub fn render_listing(entries: &[ListingEntry]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({}):",
        Style::new().bold().apply_to("Would install"),
        entries.len()
    );
    for entry in entries {
        let marker = if entry.installed {
            Style::new().yellow().apply_to("overwrite")
        } else {
            Style::new().green().apply_to("add")
        };
        let _ = writeln!(out, "  {:<32} {marker}", entry.name);
    }
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Nothing was changed. Run with {} to apply.",
        Style::new().cyan().apply_to("--add-all --force")
    );
    out
}

fn outcome_style(outcome: UpdateOutcome) -> Style {
    match outcome {
        UpdateOutcome::Updated => Style::new().green(),
        UpdateOutcome::Skipped => Style::new().yellow(),
        UpdateOutcome::Failed => Style::new().red(),
    }
}

/// Per-item outcomes followed by the tally
pub fn render_results(log: &InstallLog) -> String {
    let mut out = String::new();
    if log.is_empty() {
        let _ = writeln!(out, "Nothing to install.");
    }
    for record in log.records() {
        let _ = writeln!(
            out,
            "  {:<32} {}",
            record.name,
            outcome_style(record.outcome).apply_to(record.outcome)
        );
    }

    let tally = log.tally();
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{} {} updated, {} skipped, {} failed",
        Style::new().bold().apply_to("Done:"),
        tally.updated,
        tally.skipped,
        tally.failed
    );
    out
}

fn render_diff_lines(out: &mut String, diff_text: &str) {
    for line in diff_text.lines() {
        let styled = if line.starts_with("---") || line.starts_with("+++") {
            Style::new().bold().apply_to(line)
        } else if line.starts_with("@@") {
            Style::new().cyan().apply_to(line)
        } else if line.starts_with('-') {
            Style::new().red().apply_to(line)
        } else if line.starts_with('+') {
            Style::new().green().apply_to(line)
        } else {
            Style::new().apply_to(line)
        };
        let _ = writeln!(out, "{styled}");
    }
}

fn record_heading(record: &DiffRecord, report: &DiffReport) -> String {
    match &record.local_path {
        Some(path) => {
            let shown = path.strip_prefix(&report.project_root).unwrap_or(path);
            format!("{} ({})", record.file_name, shown.display())
        }
        None => format!("{} (new file)", record.file_name),
    }
}

/// Unified diff per file and a closing tally
pub fn render_diff(report: &DiffReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}",
        Style::new().bold().apply_to("Diff for"),
        Style::new().bold().yellow().apply_to(&report.component)
    );

    let (mut changed, mut identical, mut new) = (0, 0, 0);
    for record in &report.records {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", Style::new().bold().apply_to(record_heading(record, report)));
        match record.status {
            FileStatus::Identical => {
                identical += 1;
                let _ = writeln!(out, "  {}", Style::new().dim().apply_to("No differences"));
            }
            FileStatus::Changed => {
                changed += 1;
                render_diff_lines(&mut out, &record.diff_text);
            }
            FileStatus::New => {
                new += 1;
                render_diff_lines(&mut out, &record.diff_text);
            }
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{} changed, {} identical, {} new",
        changed, identical, new
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::CategoryCounts;
    use std::path::PathBuf;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_summary_shows_totals_and_missing_names() {
        let summary = SummaryReport {
            registry_url: "http://localhost:3000".to_string(),
            registry: CategoryCounts::tally(&names(&["button", "card", "use-mobile", "theme"])),
            installed: CategoryCounts::tally(&names(&["button"])),
            not_found: names(&["card", "use-mobile", "theme"]),
        };

        let text = console::strip_ansi_codes(&render_summary(&summary)).to_string();
        assert!(text.contains("http://localhost:3000"));
        assert!(text.contains("Components"));
        assert!(text.contains("Hooks"));
        assert!(text.contains("card, use-mobile, theme"));
        let total = text.lines().find(|l| l.contains("Total")).unwrap();
        let counts: Vec<&str> = total.split_whitespace().skip(1).collect();
        assert_eq!(counts, vec!["4", "1", "3"]);
    }

    #[test]
    fn test_listing_marks_installed_entries() {
        let entries = vec![
            ListingEntry {
                name: "button".to_string(),
                installed: true,
            },
            ListingEntry {
                name: "card".to_string(),
                installed: false,
            },
        ];

        let text = console::strip_ansi_codes(&render_listing(&entries)).to_string();
        assert!(text.contains("Would install (2)"));
        let button = text.lines().find(|l| l.contains("button")).unwrap();
        assert!(button.ends_with("overwrite"));
        let card = text.lines().find(|l| l.contains("card")).unwrap();
        assert!(card.ends_with("add"));
    }

    #[test]
    fn test_results_tally() {
        let mut log = InstallLog::default();
        log.append("button", UpdateOutcome::Updated);
        log.append("card", UpdateOutcome::Failed);

        let text = console::strip_ansi_codes(&render_results(&log)).to_string();
        assert!(text.contains("failed"));
        assert!(text.contains("1 updated, 0 skipped, 1 failed"));
    }

    #[test]
    fn test_empty_results() {
        let text = render_results(&InstallLog::default());
        assert!(text.contains("Nothing to install."));
        assert!(text.contains("0 updated, 0 skipped, 0 failed"));
    }

    #[test]
    fn test_diff_view() {
        let report = DiffReport {
            component: "card".to_string(),
            project_root: PathBuf::from("/project"),
            records: vec![
                DiffRecord {
                    file_name: "card.tsx".to_string(),
                    diff_text: "--- card.tsx\n+++ card.tsx\n@@ -2,1 +2,1 @@\n-b\n+c\n".to_string(),
                    local_path: Some(PathBuf::from("/project/components/ui/card.tsx")),
                    status: FileStatus::Changed,
                },
                DiffRecord {
                    file_name: "utils.ts".to_string(),
                    diff_text: String::new(),
                    local_path: Some(PathBuf::from("/project/lib/utils.ts")),
                    status: FileStatus::Identical,
                },
            ],
        };

        let text = console::strip_ansi_codes(&render_diff(&report)).to_string();
        assert!(text.contains("card.tsx (components/ui/card.tsx)"));
        assert!(text.contains("@@ -2,1 +2,1 @@"));
        assert!(text.contains("No differences"));
        assert!(text.contains("1 changed, 1 identical, 0 new"));
    }
}
