/*!
 * Directory scanning functionality
 */

use std::cell::RefCell;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, trace, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::Config;
use crate::error::Result;
use crate::ignore_rules::IgnoreRules;
use crate::types::{FlatStructure, ROOT_KEY};
use crate::{bail, error};

/// Scanner statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannerStatistics {
    /// Directories recorded in the flat structure
    pub directories_visited: usize,
    /// Directories pruned by the ignore rules
    pub directories_ignored: usize,
    /// Directories that could not be listed
    pub directories_unreadable: usize,
    /// Files recorded across all directories
    pub files_found: usize,
}

/// Scanner for directory contents
pub struct Scanner {
    /// Root of the scan
    target_dir: PathBuf,
    /// Directory-name classifier
    rules: IgnoreRules,
    /// Absolute path of a file never to list (the output document)
    excluded_file: Option<PathBuf>,
    /// Scanner statistics
    statistics: RefCell<ScannerStatistics>,
}

impl Scanner {
    /// Create a new scanner
    pub fn new(config: &Config) -> Self {
        Self {
            target_dir: config.target_dir.clone(),
            rules: config.ignore_rules(),
            excluded_file: absolute_file_path(&config.output_file),
            statistics: RefCell::new(ScannerStatistics::default()),
        }
    }

    /// Create a scanner with explicit rules and no excluded file
    pub fn with_rules(target_dir: impl Into<PathBuf>, rules: IgnoreRules) -> Self {
        Self {
            target_dir: target_dir.into(),
            rules,
            excluded_file: None,
            statistics: RefCell::new(ScannerStatistics::default()),
        }
    }

    /// Get scanner statistics
    pub fn get_statistics(&self) -> ScannerStatistics {
        self.statistics.borrow().clone()
    }

    /// Walk the target directory and record the files of every visited directory.
    ///
    /// Ignored directories are pruned before descending, so nothing below
    /// them is ever listed. A subdirectory that cannot be listed is logged
    /// and left out; only a failure on the root itself is an error.
    pub fn scan(&self) -> Result<FlatStructure> {
        let root = fs::canonicalize(&self.target_dir).map_err(|e| {
            error!(
                PathNotFound,
                "{}: {}",
                self.target_dir.display(),
                e
            )
        })?;
        if !root.is_dir() {
            bail!(PathNotFound, "Not a directory: {}", root.display());
        }

        let mut flat = FlatStructure::new();
        let mut stats = ScannerStatistics::default();
        let mut ignored = 0;

        // Root listing failures are fatal
        let root_files = self.list_files(&root)?;
        stats.files_found += root_files.len();
        flat.insert(ROOT_KEY, root_files);

        let walker = WalkDir::new(&root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                if !entry.file_type().is_dir() {
                    return false;
                }
                if self.rules.is_ignored(&entry_name(entry)) {
                    debug!("Skipping ignored directory {}", entry.path().display());
                    ignored += 1;
                    return false;
                }
                true
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    trace!("Walk error: {}", e);
                    continue;
                }
            };

            let rel_path = match entry.path().strip_prefix(&root) {
                Ok(rel) => rel.to_path_buf(),
                Err(_) => continue,
            };

            match self.list_files(entry.path()) {
                Ok(files) => {
                    debug!("Visited {} ({} files)", rel_path.display(), files.len());
                    stats.files_found += files.len();
                    flat.insert(rel_path, files);
                }
                Err(e) => {
                    warn!("Skipping unreadable directory {}: {}", entry.path().display(), e);
                    stats.directories_unreadable += 1;
                }
            }
        }

        stats.directories_ignored = ignored;
        stats.directories_visited = flat.len();
        *self.statistics.borrow_mut() = stats;

        Ok(flat)
    }

    /// Names of the non-directory entries directly inside `dir`
    fn list_files(&self, dir: &Path) -> io::Result<Vec<OsString>> {
        let mut files = Vec::new();

        for entry in fs::read_dir(dir)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("Skipping entry in {}: {}", dir.display(), e);
                    continue;
                }
            };

            if is_directory(&entry) {
                continue;
            }

            let path = entry.path();
            if self.excluded_file.as_deref() == Some(path.as_path()) {
                debug!("Not listing output file {}", path.display());
                continue;
            }

            files.push(entry.file_name());
        }

        Ok(files)
    }
}

fn entry_name(entry: &DirEntry) -> String {
    entry.file_name().to_string_lossy().to_string()
}

/// Directories, and symlinks resolving to directories, are not files
fn is_directory(entry: &fs::DirEntry) -> bool {
    match entry.file_type() {
        Ok(ft) if ft.is_dir() => true,
        Ok(ft) if ft.is_symlink() => fs::metadata(entry.path())
            .map(|m| m.is_dir())
            .unwrap_or(false),
        _ => false,
    }
}

/// Absolute form of a possibly not yet existing file path
fn absolute_file_path(path: &Path) -> Option<PathBuf> {
    let file_name = path.file_name()?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::canonicalize(parent).ok().map(|p| p.join(file_name))
}
