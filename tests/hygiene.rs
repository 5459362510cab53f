//! Hygiene checks over the crate source.
//!
//! Scans `src/` for patterns that can crash the app in the browser or drop
//! errors on the floor. Each pattern has a budget; the budget only shrinks.
#![allow(clippy::absurd_extreme_comparisons)]

use std::fs;
use std::path::Path;

// Panics abort the wasm instance.
const MAX_UNWRAP: usize = 0;
const MAX_EXPECT: usize = 0;
const MAX_PANIC: usize = 0;
const MAX_UNREACHABLE: usize = 0;
const MAX_TODO: usize = 0;
const MAX_UNIMPLEMENTED: usize = 0;

// Silent loss: discarded results and `.ok()` conversions.
const MAX_SILENT_DISCARD: usize = 0;
const MAX_DOT_OK: usize = 15;

const MAX_ALLOW_DEAD_CODE: usize = 0;

struct SourceFile {
    path: String,
    content: String,
}

/// Production `.rs` files under `src/`; `*_test.rs` and the test fakes are skipped.
fn production_sources() -> Vec<SourceFile> {
    let mut files = Vec::new();
    walk(Path::new("src"), &mut files);
    files
}

fn walk(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            walk(&path, out);
            continue;
        }
        if !path.extension().is_some_and(|e| e == "rs") {
            continue;
        }
        let path_str = path.to_string_lossy().to_string();
        if path_str.ends_with("_test.rs") || path_str.ends_with("test_support.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: path_str, content });
        }
    }
}

/// Lines containing `pattern`, per file.
fn hits(pattern: &str) -> Vec<(String, usize)> {
    production_sources()
        .into_iter()
        .filter_map(|file| {
            let count = file.content.lines().filter(|line| line.contains(pattern)).count();
            (count > 0).then_some((file.path, count))
        })
        .collect()
}

fn assert_within(pattern: &str, max: usize) {
    let hits = hits(pattern);
    let count: usize = hits.iter().map(|(_, c)| c).sum();
    let detail = hits
        .iter()
        .map(|(path, c)| format!("  {path}: {c}"))
        .collect::<Vec<_>>()
        .join("\n");
    assert!(count <= max, "`{pattern}` budget exceeded: found {count}, max {max}.\n{detail}");
}

#[test]
fn sources_are_found() {
    assert!(!production_sources().is_empty(), "run from the crate root");
}

#[test]
fn unwrap_budget() {
    assert_within(".unwrap()", MAX_UNWRAP);
}

#[test]
fn expect_budget() {
    assert_within(".expect(", MAX_EXPECT);
}

#[test]
fn panic_budget() {
    assert_within("panic!(", MAX_PANIC);
}

#[test]
fn unreachable_budget() {
    assert_within("unreachable!(", MAX_UNREACHABLE);
}

#[test]
fn todo_budget() {
    assert_within("todo!(", MAX_TODO);
}

#[test]
fn unimplemented_budget() {
    assert_within("unimplemented!(", MAX_UNIMPLEMENTED);
}

#[test]
fn silent_discard_budget() {
    assert_within("let _ =", MAX_SILENT_DISCARD);
}

#[test]
fn dot_ok_budget() {
    assert_within(".ok()", MAX_DOT_OK);
}

#[test]
fn allow_dead_code_budget() {
    assert_within("#[allow(dead_code)]", MAX_ALLOW_DEAD_CODE);
}
