// src/graph/imports.rs
use crate::lang::Lang;
use crate::source::extension_of;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

fn compile(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(re) => re,
        Err(e) => panic!("Invalid import pattern: {e}"),
    }
}

static JS_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r#"(?m)^[ \t]*(?:import|export)\b[^;'"]*?\bfrom\s*['"]([^'"\n]+)['"]"#,
        r#"(?m)^[ \t]*import\s+['"]([^'"\n]+)['"]"#,
        r#"\brequire\(\s*['"]([^'"\n]+)['"]\s*\)"#,
        r#"\bimport\(\s*['"]([^'"\n]+)['"]\s*\)"#,
    ]
    .iter()
    .map(|p| compile(p))
    .collect()
});

static PY_IMPORT: LazyLock<Regex> = LazyLock::new(|| compile(r"(?m)^[ \t]*import[ \t]+([^\n#;]+)"));
static PY_FROM: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?m)^[ \t]*from[ \t]+(\.*\w*(?:\.\w+)*)[ \t]+import\b"));
static PY_NAME: LazyLock<Regex> = LazyLock::new(|| compile(r"^\w+(?:\.\w+)*$"));

static RUST_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?m)^[ \t]*(?:pub(?:\([^)]*\))?[ \t]+)?use[ \t]+(?:::)?(\w+(?:::\w+)*)",
        r"(?m)^[ \t]*extern[ \t]+crate[ \t]+(\w+)",
    ]
    .iter()
    .map(|p| compile(p))
    .collect()
});
static RUST_MOD: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?m)^[ \t]*(?:pub(?:\([^)]*\))?[ \t]+)?mod[ \t]+(\w+)[ \t]*;"));

/// Extracts raw, non-builtin import targets from a file.
///
/// Unsupported extensions yield nothing. The result is de-duplicated and in
/// order of first appearance. Rust `mod foo;` declarations are reported as
/// `self::foo`.
#[must_use]
pub fn extract(path: &str, content: &str) -> Vec<String> {
    let Some(lang) = Lang::from_ext(&extension_of(path)) else {
        return Vec::new();
    };

    let raw = match lang {
        Lang::JavaScript | Lang::TypeScript => capture_all(&JS_PATTERNS, content),
        Lang::Python => python_imports(content),
        Lang::Rust => rust_imports(content),
    };

    let mut seen = HashSet::new();
    raw.into_iter()
        .filter(|m| !m.is_empty() && !lang.is_builtin(m))
        .filter(|m| seen.insert(m.clone()))
        .collect()
}

fn capture_all(patterns: &[Regex], content: &str) -> Vec<String> {
    let mut out = Vec::new();
    for re in patterns {
        for caps in re.captures_iter(content) {
            if let Some(m) = caps.get(1) {
                out.push(m.as_str().trim().to_string());
            }
        }
    }
    out
}

fn python_imports(content: &str) -> Vec<String> {
    let mut out = Vec::new();
    for caps in PY_IMPORT.captures_iter(content) {
        let Some(list) = caps.get(1) else { continue };
        for item in list.as_str().split(',') {
            let name = item.split_whitespace().next().unwrap_or("");
            if PY_NAME.is_match(name) {
                out.push(name.to_string());
            }
        }
    }
    for caps in PY_FROM.captures_iter(content) {
        if let Some(m) = caps.get(1) {
            out.push(m.as_str().to_string());
        }
    }
    out
}

fn rust_imports(content: &str) -> Vec<String> {
    let mut out = capture_all(&RUST_PATTERNS, content);
    for caps in RUST_MOD.captures_iter(content) {
        if let Some(m) = caps.get(1) {
            out.push(format!("self::{}", m.as_str()));
        }
    }
    out
}
