//! Nested directory tree construction and rendering.
//!
//! Turns the scanner's flat path-to-files mapping into a [`DirectoryNode`]
//! hierarchy and renders that hierarchy with box-drawing characters.

use std::ffi::OsString;
use std::path::{Component, Path};

use crate::types::{DirectoryNode, FlatStructure, ROOT_KEY};

const BRANCH: &str = "├── ";
const CORNER: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// Build the nested tree from a flat scan result.
///
/// Entries may come in any order: every missing ancestor is created empty
/// and filled in if its own entry shows up later.
pub fn build_tree(flat: &FlatStructure) -> DirectoryNode {
    let mut root = DirectoryNode::new();

    for (path, files) in flat.iter() {
        let node = if path == Path::new(ROOT_KEY) {
            &mut root
        } else {
            path_segments(path).fold(&mut root, |node, segment| {
                node.subfolders.entry(segment).or_default()
            })
        };
        node.files = files.iter().cloned().collect();
    }

    root
}

/// Folder names along a relative path, skipping `.` components
fn path_segments(path: &Path) -> impl Iterator<Item = OsString> + '_ {
    path.components().filter_map(|component| match component {
        Component::Normal(name) => Some(name.to_os_string()),
        _ => None,
    })
}

/// Render the tree as a fenced block rooted at `.`.
///
/// Folders come before files, each group sorted ascending. Folders are
/// suffixed with `/`.
pub fn render_tree(tree: &DirectoryNode) -> String {
    let mut output = String::from("```\n.\n");
    render_node(tree, "", &mut output);
    output.push_str("```\n\n");
    output
}

fn render_node(node: &DirectoryNode, indent: &str, output: &mut String) {
    let folder_count = node.subfolders.len();

    for (i, (name, child)) in node.subfolders.iter().enumerate() {
        let last = i + 1 == folder_count && node.files.is_empty();
        output.push_str(indent);
        output.push_str(if last { CORNER } else { BRANCH });
        output.push_str(&name.to_string_lossy());
        output.push_str("/\n");

        let child_indent = format!("{}{}", indent, if last { SPACE } else { PIPE });
        render_node(child, &child_indent, output);
    }

    let file_count = node.files.len();
    for (i, name) in node.files.iter().enumerate() {
        output.push_str(indent);
        output.push_str(if i + 1 == file_count { CORNER } else { BRANCH });
        output.push_str(&name.to_string_lossy());
        output.push('\n');
    }
}
