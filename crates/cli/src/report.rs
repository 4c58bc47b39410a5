use crate::OutputFormat;
use colored::Colorize;
use graphql_codemod_types::{Diagnostic, LineIndex, Severity};
use serde::Serialize;
use std::path::Path;

/// What happened to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Changed,
    Unchanged,
    Failed,
}

/// A diagnostic resolved to a 1-based line and column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocatedDiagnostic {
    pub severity: &'static str,
    pub message: String,
    pub line: u32,
    pub column: u32,
}

impl LocatedDiagnostic {
    fn new(index: &LineIndex, severity: Severity, message: String, offset: usize) -> Self {
        let position = index.position(offset);
        Self {
            severity: match severity {
                Severity::Info => "info",
                Severity::Warning => "warning",
                Severity::Error => "error",
            },
            message,
            line: position.line + 1,
            column: position.character + 1,
        }
    }
}

/// The outcome of running a codemod over one file, ready for printing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub file: String,
    pub status: FileStatus,
    pub diagnostics: Vec<LocatedDiagnostic>,
}

impl FileReport {
    #[must_use]
    pub fn transformed(path: &Path, text: &str, changed: bool, diagnostics: &[Diagnostic]) -> Self {
        let index = LineIndex::new(text);
        Self {
            file: path.display().to_string(),
            status: if changed {
                FileStatus::Changed
            } else {
                FileStatus::Unchanged
            },
            diagnostics: diagnostics
                .iter()
                .map(|diagnostic| {
                    LocatedDiagnostic::new(
                        &index,
                        diagnostic.severity,
                        diagnostic.message.clone(),
                        diagnostic.offset_range.start,
                    )
                })
                .collect(),
        }
    }

    /// A file that was left untouched because of a hard error. Errors
    /// without a location point at the start of the file.
    #[must_use]
    pub fn failed(path: &Path, text: &str, message: String, offset: Option<usize>) -> Self {
        let index = LineIndex::new(text);
        Self {
            file: path.display().to_string(),
            status: FileStatus::Failed,
            diagnostics: vec![LocatedDiagnostic::new(
                &index,
                Severity::Error,
                message,
                offset.unwrap_or(0),
            )],
        }
    }
}

/// Totals printed after the last file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub changed: usize,
    pub unchanged: usize,
    pub failed: usize,
    pub dry_run: bool,
}

impl Summary {
    pub fn record(&mut self, status: FileStatus) {
        match status {
            FileStatus::Changed => self.changed += 1,
            FileStatus::Unchanged => self.unchanged += 1,
            FileStatus::Failed => self.failed += 1,
        }
    }
}

/// Prints reports as they are produced.
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    pub format: OutputFormat,
    pub quiet: bool,
}

impl Reporter {
    pub fn file(&self, report: &FileReport) {
        match self.format {
            OutputFormat::Human => self.human_file(report),
            OutputFormat::Json => {
                if !self.quiet || report.status == FileStatus::Failed {
                    println!("{}", serde_json::json!(report));
                }
            }
        }
    }

    fn human_file(&self, report: &FileReport) {
        if report.status == FileStatus::Failed {
            println!("{} {}", "✗".red(), report.file.bold());
        } else if self.quiet {
            return;
        } else if report.status == FileStatus::Changed {
            println!("{} {}", "✓".green(), report.file);
        } else {
            println!("{} {}", "·".dimmed(), report.file.dimmed());
        }

        for diagnostic in &report.diagnostics {
            let label = match diagnostic.severity {
                "error" => "error:".red().bold(),
                "warning" => "warning:".yellow().bold(),
                _ => "info:".cyan(),
            };
            println!(
                "  {}:{}:{}: {} {}",
                report.file, diagnostic.line, diagnostic.column, label, diagnostic.message
            );
        }
    }

    pub fn summary(&self, summary: &Summary) {
        match self.format {
            OutputFormat::Human => {
                if self.quiet && summary.failed == 0 {
                    return;
                }
                println!();
                let failed = format!("{} failed", summary.failed);
                println!(
                    "{} changed, {} unchanged, {}{}",
                    summary.changed.to_string().green(),
                    summary.unchanged,
                    if summary.failed > 0 {
                        failed.red().bold()
                    } else {
                        failed.normal()
                    },
                    if summary.dry_run {
                        " (dry run, no files written)".dimmed()
                    } else {
                        "".normal()
                    },
                );
            }
            OutputFormat::Json => {
                println!("{}", serde_json::json!({ "summary": summary }));
            }
        }
    }

    /// Report an error that stops the run before any file is processed.
    pub fn fatal(&self, message: &str) {
        match self.format {
            OutputFormat::Human => eprintln!("{} {}", "✗".red().bold(), message.red()),
            OutputFormat::Json => eprintln!("{}", serde_json::json!({ "error": message })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphql_codemod_types::OffsetRange;

    #[test]
    fn test_diagnostics_get_line_and_column() {
        let text = "const a = 1\nconst b = {\n  ...IDFields,\n}\n";
        let offset = text.find("...").unwrap();
        let diagnostics = vec![Diagnostic::warning(
            "Skipping spread of `IDFields`",
            OffsetRange::new(offset, offset + 11),
        )];

        let report = FileReport::transformed(Path::new("src/a.ts"), text, false, &diagnostics);
        assert_eq!(report.status, FileStatus::Unchanged);
        assert_eq!(
            report.diagnostics,
            vec![LocatedDiagnostic {
                severity: "warning",
                message: "Skipping spread of `IDFields`".to_string(),
                line: 3,
                column: 3,
            }]
        );
    }

    #[test]
    fn test_failed_report_without_offset() {
        let report = FileReport::failed(
            Path::new("a.ts"),
            "x",
            "The `migrate-ids` codemod needs a schema".to_string(),
            None,
        );
        assert_eq!(report.status, FileStatus::Failed);
        assert_eq!(report.diagnostics[0].line, 1);
        assert_eq!(report.diagnostics[0].column, 1);
        assert_eq!(report.diagnostics[0].severity, "error");
    }

    #[test]
    fn test_json_shape() {
        let report = FileReport::transformed(Path::new("a.ts"), "", true, &[]);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["status"], "changed");
        assert_eq!(value["file"], "a.ts");

        let mut summary = Summary::default();
        summary.record(FileStatus::Changed);
        summary.record(FileStatus::Failed);
        let value = serde_json::to_value(summary).unwrap();
        assert_eq!(value["changed"], 1);
        assert_eq!(value["failed"], 1);
        assert_eq!(value["dry_run"], false);
    }
}
