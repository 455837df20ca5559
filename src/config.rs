/*!
 * Configuration handling for dumpmd
 */

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use clap_complete::Shell;

use crate::error::Result;
use crate::ignore_rules::IgnoreRules;
use crate::language::LanguageMap;
use crate::{bail, ensure};

/// Suffix appended to the root's basename to name the output document
pub const OUTPUT_SUFFIX: &str = "_structure.md";

/// Command-line arguments for dumpmd
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "dumpmd",
    version = env!("CARGO_PKG_VERSION"),
    about = "Generate a markdown document describing a project directory",
    long_about = "Scans a project directory, skips VCS metadata, dependency caches and build output, and writes a markdown document with a tree of the project followed by the content of every file."
)]
pub struct Args {
    /// Project directory to process (prompted for when omitted)
    pub directory_path: Option<String>,

    /// Output markdown file (default: <directory name>_structure.md in the current directory)
    #[clap(short, long)]
    pub output: Option<String>,

    /// Comma-separated list of extra directory names to ignore
    #[clap(long, value_delimiter = ',')]
    pub ignore: Vec<String>,

    /// Do not use the built-in list of ignored directory names
    #[clap(long)]
    pub no_default_ignores: bool,

    /// Treat ignore entries containing `*`, `?` or `[` as glob patterns
    #[clap(long)]
    pub glob_ignores: bool,

    /// Comma-separated extension overrides for fence tags, e.g. `.tpl=html,.rs=rust`
    #[clap(long = "lang", value_delimiter = ',')]
    pub languages: Vec<String>,

    /// Skip the content of files larger than this many bytes
    #[clap(long, value_name = "BYTES")]
    pub max_file_size: Option<u64>,

    /// Do not print the summary report
    #[clap(long)]
    pub no_report: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Silence logs, progress and the report
    #[clap(short, long)]
    pub quiet: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Project directory to process
    pub target_dir: PathBuf,

    /// Output markdown file path
    pub output_file: PathBuf,

    /// Extra directory names to ignore
    pub ignore_patterns: Vec<String>,

    /// Whether the built-in ignore list is used
    pub use_default_ignores: bool,

    /// Whether glob-like ignore entries are matched as globs
    pub glob_ignores: bool,

    /// Raw `.ext=tag` language overrides
    pub language_overrides: Vec<String>,

    /// Files above this size are listed without content
    pub max_file_size: Option<u64>,
}

impl Config {
    /// Configuration with default settings for a project directory
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        let target_dir = target_dir.into();
        let output_file = default_output_file(&target_dir);

        Self {
            target_dir,
            output_file,
            ignore_patterns: Vec::new(),
            use_default_ignores: true,
            glob_ignores: false,
            language_overrides: Vec::new(),
            max_file_size: None,
        }
    }

    /// Create configuration from command-line arguments and the chosen root
    pub fn from_args(args: Args, target_dir: PathBuf) -> Self {
        let mut config = Self::new(target_dir);
        if let Some(output) = args.output {
            config.output_file = PathBuf::from(output);
        }
        config.ignore_patterns = args.ignore;
        config.use_default_ignores = !args.no_default_ignores;
        config.glob_ignores = args.glob_ignores;
        config.language_overrides = args.languages;
        config.max_file_size = args.max_file_size;
        config
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.target_dir.is_dir() {
            bail!(
                PathNotFound,
                "Target directory not found: {}",
                self.target_dir.display()
            );
        }

        if let Some(parent) = self.output_file.parent() {
            ensure!(
                parent.as_os_str().is_empty() || parent.is_dir(),
                PathNotFound,
                "Output directory not found: {}",
                parent.display()
            );
        }

        self.language_map().map(|_| ())
    }

    /// Ignore rules described by this configuration
    pub fn ignore_rules(&self) -> IgnoreRules {
        IgnoreRules::new(
            self.use_default_ignores,
            self.ignore_patterns.iter().cloned(),
            self.glob_ignores,
        )
    }

    /// Language table with the configured overrides applied
    pub fn language_map(&self) -> Result<LanguageMap> {
        LanguageMap::with_overrides(&self.language_overrides)
    }
}

/// Display name of a project root: its basename, or `root` for a filesystem root
pub fn root_name(target_dir: &Path) -> String {
    let resolved = fs::canonicalize(target_dir).unwrap_or_else(|_| target_dir.to_path_buf());
    resolved
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "root".to_string())
}

/// `<basename>_structure.md` relative to the current directory
pub fn default_output_file(target_dir: &Path) -> PathBuf {
    PathBuf::from(format!("{}{}", root_name(target_dir), OUTPUT_SUFFIX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_output_file_uses_basename() {
        let temp_dir = tempdir().unwrap();
        let project = temp_dir.path().join("my-app");
        fs::create_dir(&project).unwrap();

        assert_eq!(
            default_output_file(&project),
            PathBuf::from("my-app_structure.md")
        );
        assert_eq!(root_name(&project.join("..").join("my-app")), "my-app");
    }

    #[test]
    fn test_from_args() {
        let args = Args::parse_from([
            "dumpmd",
            "some/dir",
            "--ignore",
            "fixtures,snapshots",
            "--lang",
            ".tpl=html",
            "--glob-ignores",
            "-o",
            "out.md",
        ]);
        let config = Config::from_args(args, PathBuf::from("some/dir"));

        assert_eq!(config.output_file, PathBuf::from("out.md"));
        assert_eq!(config.ignore_patterns, vec!["fixtures", "snapshots"]);
        assert_eq!(config.language_overrides, vec![".tpl=html"]);
        assert!(config.glob_ignores);
        assert!(config.use_default_ignores);
        assert!(config.ignore_rules().is_ignored("snapshots"));
    }

    #[test]
    fn test_validate() {
        let temp_dir = tempdir().unwrap();
        let mut config = Config::new(temp_dir.path());
        config.output_file = temp_dir.path().join("out.md");
        assert!(config.validate().is_ok());

        config.language_overrides = vec!["tpl".to_string()];
        assert!(config.validate().is_err());

        let missing = Config::new(temp_dir.path().join("missing"));
        assert!(missing.validate().is_err());

        let mut bad_output = Config::new(temp_dir.path());
        bad_output.output_file = temp_dir.path().join("nope").join("out.md");
        assert!(bad_output.validate().is_err());
    }
}
