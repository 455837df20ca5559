/*!
 * Markdown writer implementation for dumpmd
 */

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indicatif::ProgressBar;
use log::{debug, warn};

use crate::config::Config;
use crate::error::{Result, ResultExt};
use crate::language::LanguageMap;
use crate::report::FileReportInfo;
use crate::tree::render_tree;
use crate::types::DirectoryNode;
use crate::utils::format_file_size;

/// Heading level of the root folder in the file details section
pub const ROOT_HEADING_LEVEL: usize = 2;

/// Heading text used for the root folder
pub const ROOT_HEADING: &str = "Root";

/// A file whose content could not be included
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    /// Path relative to the scan root
    pub path: String,
    /// Human readable reason
    pub reason: String,
}

/// Statistics gathered while aggregating file contents
#[derive(Debug, Clone, Default)]
pub struct AggregateStats {
    /// Files whose content was embedded
    pub files_read: usize,
    /// Files listed without content because of their size
    pub files_skipped: usize,
    /// Total lines of embedded content
    pub total_lines: usize,
    /// Total characters of embedded content
    pub total_chars: usize,
    /// Files that could not be read
    pub failures: Vec<FileFailure>,
    /// Line and character counts per embedded file
    pub file_details: Vec<(String, FileReportInfo)>,
}

/// Markdown writer for a scanned project
pub struct MarkdownWriter {
    /// Extension to fence tag lookup
    languages: LanguageMap,
    /// Files above this size are listed without content
    max_file_size: Option<u64>,
    /// Progress bar, advanced once per file
    progress: Arc<ProgressBar>,
    /// Statistics of the last aggregation
    statistics: RefCell<AggregateStats>,
}

impl MarkdownWriter {
    /// Create a new markdown writer
    pub fn new(config: &Config, progress: Arc<ProgressBar>) -> Result<Self> {
        let mut writer = Self::with_languages(config.language_map()?, progress);
        writer.max_file_size = config.max_file_size;
        Ok(writer)
    }

    /// Create a writer with an explicit language table and no size limit
    pub fn with_languages(languages: LanguageMap, progress: Arc<ProgressBar>) -> Self {
        Self {
            languages,
            max_file_size: None,
            progress,
            statistics: RefCell::new(AggregateStats::default()),
        }
    }

    /// Get statistics of the last aggregation
    pub fn get_statistics(&self) -> AggregateStats {
        self.statistics.borrow().clone()
    }

    /// Assemble the complete document: title, directory tree and file details
    pub fn document(&self, tree: &DirectoryNode, root: &Path) -> String {
        let mut content = String::from("# Project Structure\n\n## Directory Tree\n\n");
        content.push_str(&render_tree(tree));
        content.push_str("## File Details\n\n");
        content.push_str(&self.aggregate(tree, root));
        content
    }

    /// Walk the tree depth-first and emit one section per folder.
    ///
    /// Each section holds a heading, then every file of the folder with its
    /// content in a fenced block, then the sections of its subfolders. A
    /// file that cannot be read gets an inline note and the walk goes on.
    pub fn aggregate(&self, tree: &DirectoryNode, root: &Path) -> String {
        let mut output = String::new();
        let mut stats = AggregateStats::default();

        self.write_folder(
            tree,
            ROOT_HEADING,
            root,
            Path::new(""),
            ROOT_HEADING_LEVEL,
            &mut output,
            &mut stats,
        );

        *self.statistics.borrow_mut() = stats;
        output
    }

    #[allow(clippy::too_many_arguments)]
    fn write_folder(
        &self,
        node: &DirectoryNode,
        name: &str,
        root: &Path,
        rel_dir: &Path,
        level: usize,
        output: &mut String,
        stats: &mut AggregateStats,
    ) {
        output.push_str(&format!("{} {}\n", "#".repeat(level), name));

        for file in &node.files {
            let file_name = file.to_string_lossy();
            self.write_file(&file_name, root, &rel_dir.join(file), output, stats);
        }

        if node.files.is_empty() {
            output.push_str(&format!("*No files in folder {}*\n", name));
        }

        for (folder, child) in &node.subfolders {
            self.write_folder(
                child,
                &folder.to_string_lossy(),
                root,
                &rel_dir.join(folder),
                level + 1,
                output,
                stats,
            );
        }
    }

    /// `name` is for display only; the file is read from `root.join(rel_path)`
    fn write_file(
        &self,
        name: &str,
        root: &Path,
        rel_path: &Path,
        output: &mut String,
        stats: &mut AggregateStats,
    ) {
        self.progress.inc(1);
        self.progress.set_message(format!("Current file: {}", name));

        output.push_str(&format!("- `{}`\n", name));

        let abs_path = root.join(rel_path);
        let display_path = rel_path.to_string_lossy().to_string();

        if let Some(limit) = self.max_file_size {
            match fs::metadata(&abs_path) {
                Ok(metadata) if metadata.len() > limit => {
                    debug!("Skipping content of {} ({} bytes)", display_path, metadata.len());
                    output.push_str(&format!(
                        "\n*Skipped {}: file too large ({})*\n",
                        name,
                        format_file_size(metadata.len())
                    ));
                    stats.files_skipped += 1;
                    return;
                }
                _ => {}
            }
        }

        match fs::read_to_string(&abs_path) {
            Ok(content) => {
                // Line endings are normalized to `\n`
                let content = content.replace("\r\n", "\n").replace('\r', "\n");
                let content = content.trim();
                let language = self.languages.detect(name);
                output.push_str(&format!("\n```{}\n{}\n```\n", language, content));

                let info = FileReportInfo {
                    lines: content.lines().count(),
                    chars: content.chars().count(),
                };
                stats.files_read += 1;
                stats.total_lines += info.lines;
                stats.total_chars += info.chars;
                stats.file_details.push((display_path, info));
            }
            Err(e) => {
                warn!("Error reading {}: {}", abs_path.display(), e);
                output.push_str(&format!("\n*Error reading {}: {}*\n", name, e));
                stats.failures.push(FileFailure {
                    path: display_path,
                    reason: e.to_string(),
                });
            }
        }
    }
}

/// Destination for a finished document
pub trait DocumentSink {
    /// Store `document` under `file_name` and return where it went
    fn write(&self, file_name: &Path, document: &str) -> Result<PathBuf>;
}

/// Writes documents as UTF-8 files inside a directory
#[derive(Debug, Clone, Default)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    /// Sink writing into `dir`; absolute file names are used as given
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Sink writing relative to the current working directory
    pub fn current_dir() -> Self {
        Self::default()
    }
}

impl DocumentSink for FileSink {
    fn write(&self, file_name: &Path, document: &str) -> Result<PathBuf> {
        let path = self.dir.join(file_name);
        fs::write(&path, document)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}
