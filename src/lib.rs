/*!
 * dumpmd - Generate a markdown snapshot of a project directory
 *
 * This library scans a project, leaves out VCS metadata, dependency caches
 * and build output, and produces a markdown document with a directory tree
 * followed by the content of every remaining file.
 */

pub mod config;
pub mod error;
pub mod ignore_rules;
pub mod language;
pub mod provider;
pub mod report;
pub mod scanner;
pub mod tree;
pub mod types;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use config::Config;
pub use error::{DumpMdError, Result};
pub use ignore_rules::IgnoreRules;
pub use language::{detect_language, LanguageMap};
pub use provider::{ArgPathProvider, PathProvider, PromptPathProvider};
pub use report::{FileReportInfo, ReportFormat, Reporter, ScanReport};
pub use scanner::Scanner;
pub use tree::{build_tree, render_tree};
pub use types::{DirectoryNode, FlatStructure};
pub use utils::format_file_size;
pub use writer::{DocumentSink, FileSink, MarkdownWriter};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
