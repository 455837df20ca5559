/*!
 * Reporting functionality for dumpmd
 *
 * Renders a console summary of a finished run with the tabled crate.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::writer::FileFailure;

/// Information about an embedded file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileReportInfo {
    /// Number of lines in the embedded content
    pub lines: usize,
    /// Number of characters in the embedded content
    pub chars: usize,
}

/// Statistics for a finished run
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Output file path
    pub output_file: String,
    /// Time taken to scan and write
    pub duration: Duration,
    /// Directories included in the document
    pub directories: usize,
    /// Directories pruned by the ignore rules
    pub directories_ignored: usize,
    /// Files whose content was embedded
    pub files_processed: usize,
    /// Files listed without content because of their size
    pub files_skipped: usize,
    /// Total number of lines
    pub total_lines: usize,
    /// Total number of characters
    pub total_chars: usize,
    /// Details for each embedded file
    pub file_details: Vec<(String, FileReportInfo)>,
    /// Files that could not be read
    pub failures: Vec<FileFailure>,
}

/// Format of the report output
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
}

/// Report generator for finished runs
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Format a number with human-readable units
    fn format_number(&self, num: usize) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    /// Generate a report string
    pub fn generate_report(&self, report: &ScanReport) -> String {
        match self.format {
            ReportFormat::ConsoleTable => self.generate_console_report(report),
        }
    }

    /// Print the report to stdout
    pub fn print_report(&self, report: &ScanReport) {
        println!("\n{}", self.generate_report(report));
    }

    // Keep the trailing path segments that fit in `max_len`
    fn format_path(&self, path: &str, max_len: usize) -> String {
        if path.chars().count() <= max_len {
            return path.to_string();
        }

        let mut segments = Vec::new();
        let mut current_len = 3; // "..."
        for part in path.split('/').rev() {
            let part_len = part.chars().count() + 1;
            if current_len + part_len > max_len {
                break;
            }
            segments.push(part);
            current_len += part_len;
        }

        if segments.is_empty() {
            let tail: String = path
                .chars()
                .rev()
                .take(max_len.saturating_sub(3))
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            return format!("...{}", tail);
        }

        let mut result = String::from("...");
        for part in segments.iter().rev() {
            result.push('/');
            result.push_str(part);
        }
        result
    }

    fn styled(mut table: Table) -> String {
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));
        table.to_string()
    }

    fn create_summary_table(&self, report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: &'static str,

            #[tabled(rename = "Value")]
            value: String,
        }

        let mut rows = vec![
            SummaryRow {
                key: "📂 Output File",
                value: report.output_file.clone(),
            },
            SummaryRow {
                key: "⏱️ Process Time",
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "🗂️ Directories",
                value: format!(
                    "{} ({} ignored)",
                    self.format_number(report.directories),
                    self.format_number(report.directories_ignored)
                ),
            },
            SummaryRow {
                key: "📄 Files Embedded",
                value: self.format_number(report.files_processed),
            },
            SummaryRow {
                key: "📝 Total Lines",
                value: self.format_number(report.total_lines),
            },
            SummaryRow {
                key: "🔤 Total Characters",
                value: self.format_number(report.total_chars),
            },
        ];

        if report.files_skipped > 0 {
            rows.push(SummaryRow {
                key: "⏭️ Files Too Large",
                value: self.format_number(report.files_skipped),
            });
        }

        if !report.failures.is_empty() {
            rows.push(SummaryRow {
                key: "⚠️ Unreadable Files",
                value: self.format_number(report.failures.len()),
            });
        }

        Self::styled(Table::new(rows))
    }

    fn create_files_table(&self, report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct FileRow {
            #[tabled(rename = "File Path")]
            path: String,

            #[tabled(rename = "Lines")]
            lines: String,

            #[tabled(rename = "Characters")]
            chars: String,
        }

        let mut files: Vec<_> = report.file_details.iter().collect();
        files.sort_by(|(a_path, a), (b_path, b)| b.chars.cmp(&a.chars).then(a_path.cmp(b_path)));

        let files_to_show = if files.len() > 15 {
            &files[0..10]
        } else {
            &files[..]
        };

        let rows: Vec<FileRow> = files_to_show
            .iter()
            .map(|(path, info)| FileRow {
                path: self.format_path(path, 60),
                lines: self.format_number(info.lines),
                chars: self.format_number(info.chars),
            })
            .collect();

        Self::styled(Table::new(rows))
    }

    fn create_failures_table(&self, report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct FailureRow {
            #[tabled(rename = "File Path")]
            path: String,

            #[tabled(rename = "Reason")]
            reason: String,
        }

        let rows: Vec<FailureRow> = report
            .failures
            .iter()
            .map(|failure| FailureRow {
                path: self.format_path(&failure.path, 60),
                reason: failure.reason.clone(),
            })
            .collect();

        Self::styled(Table::new(rows))
    }

    // Generate a console table report
    fn generate_console_report(&self, report: &ScanReport) -> String {
        let files_title = if report.file_details.len() > 15 {
            "📋  TOP 10 LARGEST FILES BY CHARACTER COUNT  📋"
        } else {
            "📋  EMBEDDED FILES"
        };

        let mut sections = vec![format!("{}\n{}", files_title, self.create_files_table(report))];

        if !report.failures.is_empty() {
            sections.push(format!(
                "⚠️  UNREADABLE FILES\n{}",
                self.create_failures_table(report)
            ));
        }

        sections.push(format!(
            "✅  MARKDOWN GENERATED\n{}",
            self.create_summary_table(report)
        ));

        sections.join("\n\n")
    }
}
