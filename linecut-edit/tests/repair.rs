//! End-to-end repair tests against a temporary working root.

use camino::Utf8PathBuf;
use linecut_edit::{GUARD_MARKER, GuardError, RepairError, RunOptions, TARGET_PATH, load, run};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

fn create_temp_root() -> (TempDir, Utf8PathBuf) {
    let td = tempfile::tempdir().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(td.path().to_path_buf()).expect("utf8");
    fs::create_dir_all(root.join("assets")).unwrap();
    (td, root)
}

/// `count` numbered lines; line index 274 carries the marker when `marked`.
fn app_js(count: usize, marked: bool) -> String {
    (0..count)
        .map(|i| {
            if i == 274 && marked {
                format!("  {GUARD_MARKER}: 'No title',\n")
            } else {
                format!("line {i}\n")
            }
        })
        .collect()
}

fn write_target(root: &Utf8PathBuf, contents: &str) {
    fs::write(root.join(TARGET_PATH), contents).unwrap();
}

fn read_target(root: &Utf8PathBuf) -> String {
    fs::read_to_string(root.join(TARGET_PATH)).unwrap()
}

#[test]
fn removes_154_lines_when_guard_matches() {
    let (_td, root) = create_temp_root();
    let original = app_js(500, true);
    write_target(&root, &original);

    let report = run(&root, &RunOptions::default()).expect("repair");

    let expected: String = original
        .split_inclusive('\n')
        .enumerate()
        .filter(|(i, _)| !(274..428).contains(i))
        .map(|(_, l)| l)
        .collect();
    assert_eq!(read_target(&root), expected);
    assert_eq!(report.lines_before, 500);
    assert_eq!(report.lines_after, 346);
    assert_eq!(report.lines_removed, 154);
    assert!(!report.dry_run);
    assert_ne!(report.before_sha256, report.after_sha256);
}

#[test]
fn short_file_is_left_untouched() {
    let (_td, root) = create_temp_root();
    let original = app_js(274, false);
    write_target(&root, &original);

    let err = run(&root, &RunOptions::default()).unwrap_err();

    assert_eq!(
        err.as_guard(),
        Some(&GuardError::TooShort {
            lines: 274,
            line_number: 275
        })
    );
    assert_eq!(read_target(&root), original);
}

#[test]
fn mismatched_guard_line_is_left_untouched() {
    let (_td, root) = create_temp_root();
    let original = app_js(500, false);
    write_target(&root, &original);

    let err = run(&root, &RunOptions::default()).unwrap_err();

    assert_eq!(
        err.as_guard().and_then(GuardError::actual_line),
        Some("line 274")
    );
    assert_eq!(read_target(&root), original);
}

#[test]
fn second_run_reports_mismatch() {
    let (_td, root) = create_temp_root();
    write_target(&root, &app_js(500, true));

    run(&root, &RunOptions::default()).expect("first run");
    let after_first = read_target(&root);

    let err = run(&root, &RunOptions::default()).unwrap_err();
    assert!(err.is_guard_failure());
    assert_eq!(read_target(&root), after_first);
}

#[test]
fn guard_passes_on_short_tail_and_truncates() {
    let (_td, root) = create_temp_root();
    let original = app_js(300, true);
    write_target(&root, &original);

    let report = run(&root, &RunOptions::default()).expect("repair");

    let expected: String = original.split_inclusive('\n').take(274).collect();
    assert_eq!(read_target(&root), expected);
    assert_eq!(report.lines_after, 274);
    assert_eq!(report.lines_removed, 26);
}

#[test]
fn guard_passes_on_275_lines_and_drops_the_guard_line() {
    let (_td, root) = create_temp_root();
    let original = app_js(275, true);
    write_target(&root, &original);

    let report = run(&root, &RunOptions::default()).expect("repair");

    let expected: String = original.split_inclusive('\n').take(274).collect();
    assert_eq!(read_target(&root), expected);
    assert_eq!(report.lines_after, 274);
    assert_eq!(report.lines_removed, 1);
}

#[test]
fn exactly_428_lines_leaves_the_first_274() {
    let (_td, root) = create_temp_root();
    let original = app_js(428, true);
    write_target(&root, &original);

    let report = run(&root, &RunOptions::default()).expect("repair");

    let expected: String = original.split_inclusive('\n').take(274).collect();
    assert_eq!(read_target(&root), expected);
    assert_eq!(report.lines_after, 274);
    assert_eq!(report.lines_removed, 154);
}

#[test]
fn form_feed_counts_as_a_line_boundary() {
    let (_td, root) = create_temp_root();
    let original: String = app_js(500, true)
        .split_inclusive('\n')
        .enumerate()
        .map(|(i, l)| if i == 1 { "a\x0cb\n".to_string() } else { l.to_string() })
        .collect();
    write_target(&root, &original);

    let err = run(&root, &RunOptions::default()).unwrap_err();

    // The form feed splits line 2 in two, shifting the marker to line 276.
    assert_eq!(
        err.as_guard().and_then(GuardError::actual_line),
        Some("line 273")
    );
    assert_eq!(read_target(&root), original);
}

#[test]
fn crlf_and_missing_final_newline_are_preserved() {
    let (_td, root) = create_temp_root();
    let mut original = String::new();
    for i in 0..430 {
        if i == 274 {
            original.push_str("emptyTitle\r\n");
        } else if i == 429 {
            original.push_str("tail");
        } else {
            original.push_str(&format!("l{i}\r\n"));
        }
    }
    write_target(&root, &original);

    run(&root, &RunOptions::default()).expect("repair");

    let out = read_target(&root);
    assert!(out.starts_with("l0\r\nl1\r\n"));
    assert!(out.ends_with("l273\r\nl428\r\ntail"));
    assert_eq!(out.split_inclusive('\n').count(), 276);
}

#[test]
fn dry_run_does_not_write() {
    let (_td, root) = create_temp_root();
    let original = app_js(450, true);
    write_target(&root, &original);

    let report = run(&root, &RunOptions { dry_run: true }).expect("dry run");

    assert!(report.dry_run);
    assert_eq!(report.lines_removed, 154);
    assert_eq!(read_target(&root), original);
}

#[test]
fn preview_lists_removed_guard_line() {
    let (_td, root) = create_temp_root();
    write_target(&root, &app_js(450, true));

    let loaded = load(&root).expect("load");
    loaded.check_guard().expect("guard");
    let patch = loaded.excise().preview();

    assert!(patch.contains(&format!("-  {GUARD_MARKER}: 'No title',")));
    assert!(patch.contains("-line 427"));
    assert!(!patch.contains("-line 428"));
}

#[test]
fn missing_file_is_runtime_error() {
    let (_td, root) = create_temp_root();

    let err = run(&root, &RunOptions::default()).unwrap_err();

    assert!(matches!(err, RepairError::Runtime(_)));
    assert!(err.to_string().contains("app.js"));
}

#[test]
fn invalid_utf8_is_runtime_error_and_file_untouched() {
    let (_td, root) = create_temp_root();
    let bytes = b"ok\n\xff\xfe broken\n".to_vec();
    fs::write(root.join(TARGET_PATH), &bytes).unwrap();

    let err = run(&root, &RunOptions::default()).unwrap_err();

    assert!(matches!(err, RepairError::Runtime(_)));
    assert!(format!("{err:#}").contains("UTF-8"));
    assert_eq!(fs::read(root.join(TARGET_PATH)).unwrap(), bytes);
}

#[test]
fn report_serializes_to_json() {
    let (_td, root) = create_temp_root();
    write_target(&root, &app_js(430, true));

    let report = run(&root, &RunOptions { dry_run: true }).expect("dry run");
    let json = serde_json::to_value(&report).expect("json");

    assert_eq!(json["lines_removed"], 154);
    assert_eq!(json["dry_run"], true);
    assert_eq!(json["before_sha256"].as_str().map(str::len), Some(64));
}
