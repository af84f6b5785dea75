//! Hygiene: scans production sources under `src/` for panics, silently
//! discarded errors, and secrets passed to log macros. Every budget is zero;
//! `*_test.rs` files are exempt.

use std::fs;
use std::path::Path;

struct SourceFile {
    path: String,
    content: String,
}

/// (pattern, reason) pairs that must not appear in production code.
const FORBIDDEN: &[(&str, &str)] = &[
    (".unwrap()", "panics on error"),
    (".expect(", "panics on error"),
    ("panic!(", "crashes the client"),
    ("unreachable!(", "crashes the client"),
    ("todo!(", "unfinished stub"),
    ("unimplemented!(", "unfinished stub"),
    ("let _ =", "discards a result without inspecting it"),
    (".ok()", "discards the error value"),
    ("#[allow(dead_code)]", "hides unused code"),
];

const LOG_MACROS: [&str; 5] = ["trace!(", "debug!(", "info!(", "warn!(", "error!("];
const SECRETS: [&str; 3] = ["access_token", "password", "token = "];

fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
            continue;
        }
        let path_str = path.to_string_lossy().to_string();
        if !path_str.ends_with(".rs") || path_str.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: path_str, content });
        }
    }
}

fn offending_lines<'a>(files: &'a [SourceFile], hit: impl Fn(&str) -> bool) -> Vec<String> {
    files
        .iter()
        .flat_map(|file| {
            file.content
                .lines()
                .enumerate()
                .filter(|(_, line)| hit(line))
                .map(move |(n, line)| format!("  {}:{}: {}", file.path, n + 1, line.trim()))
        })
        .collect()
}

#[test]
fn production_sources_exist() {
    let files = source_files();
    assert!(files.iter().any(|f| f.path.ends_with("client.rs")), "scanner found no sources");
}

#[test]
fn forbidden_patterns_budget() {
    let files = source_files();
    let mut report = Vec::new();
    for (pattern, reason) in FORBIDDEN {
        let hits = offending_lines(&files, |line| line.contains(pattern));
        if !hits.is_empty() {
            report.push(format!("`{pattern}` ({reason}), found {}:\n{}", hits.len(), hits.join("\n")));
        }
    }
    assert!(report.is_empty(), "hygiene budget exceeded:\n{}", report.join("\n"));
}

#[test]
fn secrets_never_reach_log_macros() {
    let files = source_files();
    let hits = offending_lines(&files, |line| {
        LOG_MACROS.iter().any(|m| line.contains(m)) && SECRETS.iter().any(|s| line.contains(s))
    });
    assert!(hits.is_empty(), "secret logged:\n{}", hits.join("\n"));
}
