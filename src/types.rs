/*!
 * Core types and data structures for the dumpmd application
 */

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Key under which the scan root is recorded in a [`FlatStructure`]
pub const ROOT_KEY: &str = ".";

/// Flat view of a scan: relative directory path to the files it directly holds
///
/// There is one entry per visited directory, empty directories included.
/// Entry order carries no meaning. Names are kept as the OS returned them
/// so they can be joined back into readable paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatStructure {
    entries: HashMap<PathBuf, Vec<OsString>>,
}

impl FlatStructure {
    /// Create an empty structure
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the files of a directory, replacing any previous entry
    pub fn insert(&mut self, rel_path: impl Into<PathBuf>, files: Vec<OsString>) {
        self.entries.insert(rel_path.into(), files);
    }

    /// Files recorded for a directory, if it was visited
    pub fn get(&self, rel_path: impl AsRef<Path>) -> Option<&[OsString]> {
        self.entries.get(rel_path.as_ref()).map(Vec::as_slice)
    }

    /// Whether a directory was visited
    pub fn contains(&self, rel_path: impl AsRef<Path>) -> bool {
        self.entries.contains_key(rel_path.as_ref())
    }

    /// Iterate over all entries in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&Path, &[OsString])> {
        self.entries
            .iter()
            .map(|(path, files)| (path.as_path(), files.as_slice()))
    }

    /// Number of visited directories
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no directory was visited
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of files across all directories
    pub fn file_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}

impl FromIterator<(PathBuf, Vec<OsString>)> for FlatStructure {
    fn from_iter<T: IntoIterator<Item = (PathBuf, Vec<OsString>)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// A directory in the nested tree
///
/// Both containers are ordered, so iterating them always yields names in
/// ascending byte order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryNode {
    /// Files directly inside this directory
    pub files: BTreeSet<OsString>,
    /// Child directories by name
    pub subfolders: BTreeMap<OsString, DirectoryNode>,
}

impl DirectoryNode {
    /// Create an empty node
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether this node has neither files nor subfolders
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.subfolders.is_empty()
    }

    /// Follow a chain of folder names from this node
    pub fn descend<'a, I>(&self, segments: I) -> Option<&DirectoryNode>
    where
        I: IntoIterator<Item = &'a str>,
    {
        segments
            .into_iter()
            .try_fold(self, |node, segment| node.subfolders.get(OsStr::new(segment)))
    }

    /// Total number of files in this node and all descendants
    pub fn file_count(&self) -> usize {
        self.files.len()
            + self
                .subfolders
                .values()
                .map(DirectoryNode::file_count)
                .sum::<usize>()
    }

    /// Total number of directories below this node, itself excluded
    pub fn folder_count(&self) -> usize {
        self.subfolders.len()
            + self
                .subfolders
                .values()
                .map(DirectoryNode::folder_count)
                .sum::<usize>()
    }
}
