use std::path::{Path, PathBuf};
use std::process::Command;

fn htmldiff_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_htmldiff"))
}

fn write_pair(dir: &Path, old: &str, new: &str) -> (PathBuf, PathBuf) {
    let old_path = dir.join("old.txt");
    let new_path = dir.join("new.txt");
    std::fs::write(&old_path, old).expect("write old");
    std::fs::write(&new_path, new).expect("write new");
    (old_path, new_path)
}

#[test]
fn identical_files_exit_2_without_output() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let (old, new) = write_pair(tmp.path(), "same\n", "same\n");

    let output = htmldiff_cmd()
        .arg("--builtin")
        .args([&old, &new])
        .output()
        .expect("failed to run htmldiff");

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("HTMLDIFF_006"));
}

#[test]
fn raw_html_leaves_markup_alone() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let (old, new) = write_pair(tmp.path(), "<b>old</b>\n", "<b>new</b>\n");

    let escaped = htmldiff_cmd()
        .arg("--builtin")
        .args([&old, &new])
        .output()
        .expect("failed to run htmldiff");
    assert!(String::from_utf8_lossy(&escaped.stdout).contains("&lt;b>old&lt;/b>"));

    let raw = htmldiff_cmd()
        .args(["--builtin", "--raw-html"])
        .args([&old, &new])
        .output()
        .expect("failed to run htmldiff");
    assert_eq!(raw.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&raw.stdout).contains("<b>new</b>"));
}

#[test]
fn different_files_exit_1_with_highlights() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let (old, new) = write_pair(tmp.path(), "1\n2\n3\n4\n5\n", "1\n2\nx\ny\n4\n5\n");

    let output = htmldiff_cmd()
        .args(["--builtin", "-n"])
        .args([&old, &new])
        .output()
        .expect("failed to run htmldiff");

    assert_eq!(
        output.status.code(),
        Some(1),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    let html = String::from_utf8_lossy(&output.stdout);
    assert!(html.contains("== change =="));
    assert!(html.contains("background-color: #ffffaa"));
    assert!(html.contains("3 x\n4 y"));
    assert!(html.contains("<tr><th>change</th><td>1</td><td>1</td></tr>"));
}

#[test]
fn output_file_and_only_changes() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let (old, new) = write_pair(tmp.path(), "keep\ndrop\nkeep too\n", "keep\nkeep too\n");
    let out = tmp.path().join("report.html");

    let status = htmldiff_cmd()
        .args(["--builtin", "--only-changes", "-o"])
        .arg(&out)
        .args([&old, &new])
        .status()
        .expect("failed to run htmldiff");
    assert_eq!(status.code(), Some(1));

    let html = std::fs::read_to_string(&out).expect("report written");
    assert!(html.contains("drop"));
    assert!(!html.contains("keep too"));
    assert_eq!(html.matches("<tr><td>").count(), 1);
}

#[test]
fn duplicate_colors_exit_2() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let (old, new) = write_pair(tmp.path(), "a\n", "b\n");

    let output = htmldiff_cmd()
        .args(["--builtin", "--add-color", "red", "--change-color", "RED"])
        .args([&old, &new])
        .output()
        .expect("failed to run htmldiff");

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("HTMLDIFF_005"));
}

#[test]
fn quote_in_color_exit_2() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let (old, new) = write_pair(tmp.path(), "a\n", "b\n");

    let output = htmldiff_cmd()
        .args(["--builtin", "--change-color", "red\" onclick=\"x"])
        .args([&old, &new])
        .output()
        .expect("failed to run htmldiff");

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("HTMLDIFF_008"));
}

#[test]
fn conflicting_numbering_flags_rejected() {
    let output = htmldiff_cmd()
        .args(["-n", "-b", "a", "b"])
        .output()
        .expect("failed to run htmldiff");
    assert!(!output.status.success());
}

#[test]
fn missing_diff_program_exit_2() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let (old, new) = write_pair(tmp.path(), "a\n", "b\n");

    let output = htmldiff_cmd()
        .args(["--diff-program", "htmldiff-no-such-program"])
        .args([&old, &new])
        .output()
        .expect("failed to run htmldiff");

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("HTMLDIFF_006"));
}

#[cfg(unix)]
#[test]
fn system_diff_is_the_default_source() {
    if Command::new("diff").arg("--version").output().is_err() {
        return;
    }
    let tmp = tempfile::tempdir().expect("tempdir");
    let (old, new) = write_pair(tmp.path(), "a\nb\nc\n", "a\nc\nd\n");

    let output = htmldiff_cmd()
        .args([&old, &new])
        .output()
        .expect("failed to run htmldiff");

    assert_eq!(output.status.code(), Some(1));
    let html = String::from_utf8_lossy(&output.stdout);
    assert!(html.contains("== delete =="));
    assert!(html.contains("== add =="));
}
