/*!
 * Integration tests for the dumpmd binary
 */

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::tempdir;

fn write_file(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[test]
fn cli_writes_structure_file_in_current_directory() {
    let dir = tempdir().unwrap();
    let project = dir.path().join("demo");
    let work = dir.path().join("work");
    fs::create_dir_all(&work).unwrap();

    write_file(&project.join("src").join("main.rs"), "fn main() {}\n");
    write_file(&project.join("README.md"), "# Demo\n");
    write_file(&project.join("target").join("debug").join("demo"), "binary");

    let output = Command::new(env!("CARGO_BIN_EXE_dumpmd"))
        .current_dir(&work)
        .args([project.to_str().unwrap(), "--no-report"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("File generated: demo_structure.md"));

    let document = fs::read_to_string(work.join("demo_structure.md")).unwrap();
    assert!(document.starts_with("# Project Structure\n\n## Directory Tree\n\n```\n.\n"));
    assert!(document.contains("├── src/\n│   └── main.rs\n└── README.md\n"));
    assert!(document.contains("### src\n- `main.rs`\n\n```rust\nfn main() {}\n```\n"));
    assert!(!document.contains("target"));
}

#[test]
fn cli_respects_output_and_extra_ignores() {
    let dir = tempdir().unwrap();
    let project = dir.path().join("proj");
    write_file(&project.join("keep.txt"), "keep");
    write_file(&project.join("fixtures").join("skip.txt"), "skip");

    let out_file = project.join("dump.md");
    let output = Command::new(env!("CARGO_BIN_EXE_dumpmd"))
        .args([
            project.to_str().unwrap(),
            "--output",
            out_file.to_str().unwrap(),
            "--ignore",
            "fixtures",
            "--quiet",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let document = fs::read_to_string(&out_file).unwrap();
    assert!(document.contains("└── keep.txt\n"));
    assert!(!document.contains("skip.txt"));
    // The output file lives inside the project but is never listed
    assert!(!document.contains("dump.md"));
}

#[test]
fn cli_fails_on_missing_directory() {
    let dir = tempdir().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_dumpmd"))
        .current_dir(dir.path())
        .arg(dir.path().join("missing").to_str().unwrap())
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Target directory not found"));
    assert!(fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[test]
fn cli_rejects_malformed_language_override() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("a.txt"), "a");

    let output = Command::new(env!("CARGO_BIN_EXE_dumpmd"))
        .current_dir(dir.path())
        .args([dir.path().to_str().unwrap(), "--lang", "tpl"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Expected `.ext=tag`"));
}
