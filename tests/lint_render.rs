//! Lint: detect bracket-key text (`[X]`) rendered without click registration.
//!
//! Any `[X]`-style key hint drawn by a `render.rs` must be registered as a
//! click target through `ClickableList::push_clickable()`. A plain
//! `cl.push(Line::from("[1] ..."))` draws a button nobody can tap.
//!
//! This test scans every `render.rs` under `src/games/` and flags `push(`
//! calls whose string arguments contain bracket-key patterns.

use std::fs;
use std::path::Path;

/// Check if a string contains a bracket-key pattern like `[C]` or `[1]`.
fn contains_bracket_key(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() < 3 {
        return false;
    }
    for i in 0..bytes.len() - 2 {
        if bytes[i] == b'[' && bytes[i + 2] == b']' {
            let ch = bytes[i + 1];
            if ch.is_ascii_alphanumeric() || b"-=!~{}|\\".contains(&ch) {
                return true;
            }
        }
    }
    false
}

/// Scan source for non-clickable `push(` calls containing bracket keys.
fn find_bracket_key_in_push(source: &str) -> Vec<(usize, String)> {
    let mut violations = Vec::new();

    for (line_num_0, line) in source.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.starts_with("//") {
            continue;
        }
        if !contains_bracket_key(line) {
            continue;
        }
        if line.contains(".push(") && !line.contains("push_clickable(") {
            violations.push((line_num_0 + 1, trimmed.to_string()));
        }
    }

    violations
}

fn visit_render_files(dir: &Path, violations: &mut Vec<(String, usize, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            visit_render_files(&path, violations);
        } else if path.file_name().map(|n| n == "render.rs").unwrap_or(false) {
            let Ok(source) = fs::read_to_string(&path) else {
                continue;
            };
            let display_path = path.display().to_string();
            for (line_num, line) in find_bracket_key_in_push(&source) {
                violations.push((display_path.clone(), line_num, line));
            }
        }
    }
}

#[test]
fn no_bracket_keys_in_non_clickable_push() {
    let games_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/games");
    let mut all_violations = Vec::new();
    visit_render_files(&games_dir, &mut all_violations);

    if !all_violations.is_empty() {
        let mut msg = String::from(
            "Found bracket-key text [X] in non-clickable cl.push() calls.\n\
             Use push_clickable() so the hint is also a click target.\n\n",
        );
        for (file, line_num, line) in &all_violations {
            msg.push_str(&format!("  {}:{}: {}\n", file, line_num, line));
        }
        panic!("{}", msg);
    }
}

#[test]
fn render_files_exist() {
    let render = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/games/clicker/render.rs");
    assert!(render.is_file(), "lint would silently scan nothing");
}

#[test]
fn detects_bracket_key_in_push() {
    let source = r#"cl.push(Line::from(" [C] Click!"));"#;
    assert_eq!(find_bracket_key_in_push(source).len(), 1);
}

#[test]
fn allows_push_clickable() {
    let source = r#"cl.push_clickable(Line::from("[1] Server"), BUY_ITEM_BASE);"#;
    assert!(find_bracket_key_in_push(source).is_empty());
}

#[test]
fn ignores_comments() {
    let source = r#"// cl.push(Line::from(" [C] Click!"));"#;
    assert!(find_bracket_key_in_push(source).is_empty());
}

#[test]
fn bracket_key_detection() {
    assert!(contains_bracket_key("[C]"));
    assert!(contains_bracket_key("[1]"));
    assert!(contains_bracket_key("[-]"));
    assert!(!contains_bracket_key("[]"));
    assert!(!contains_bracket_key("[1-9]"));
    assert!(!contains_bracket_key("abc"));
}
