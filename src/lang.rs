// src/lang.rs
//! Languages the dependency graph understands.

/// Extensions tried when resolving an extensionless relative import.
pub const RESOLVE_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "py", "rs"];

/// Extensions tried for `index.<ext>` directory imports.
pub const INDEX_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {
    JavaScript,
    TypeScript,
    Python,
    Rust,
}

const PYTHON_BUILTINS: &[&str] = &[
    "os", "sys", "re", "math", "datetime", "time", "json", "logging", "unittest", "collections",
    "argparse", "pathlib", "typing", "io", "random", "functools", "itertools", "urllib", "http",
    "threading", "multiprocessing", "abc", "asyncio", "copy", "csv", "dataclasses", "enum",
    "hashlib", "inspect", "pickle", "shutil", "socket", "string", "subprocess", "tempfile",
    "traceback", "uuid", "warnings",
];

const NODE_BUILTINS: &[&str] = &[
    "fs", "path", "os", "http", "https", "net", "dns", "crypto", "stream", "util", "events",
    "child_process", "url", "querystring", "assert", "buffer", "cluster", "console", "constants",
    "dgram", "domain", "punycode", "readline", "repl", "string_decoder", "timers", "tls", "tty",
    "v8", "vm", "zlib",
];

const RUST_BUILTINS: &[&str] = &["std", "core", "alloc", "test", "proc_macro"];

impl Lang {
    #[must_use]
    pub fn from_ext(ext: &str) -> Option<Self> {
        match ext {
            "js" | "jsx" | "mjs" | "cjs" => Some(Self::JavaScript),
            "ts" | "tsx" => Some(Self::TypeScript),
            "py" | "pyw" => Some(Self::Python),
            "rs" => Some(Self::Rust),
            _ => None,
        }
    }

    /// Python modules are addressed by dotted names, everything else by path.
    #[must_use]
    pub fn dotted_modules(self) -> bool {
        self == Self::Python
    }

    /// Returns `true` if `module` belongs to the language's standard library.
    #[must_use]
    pub fn is_builtin(self, module: &str) -> bool {
        match self {
            Self::Python => {
                let head = module.split('.').next().unwrap_or(module);
                PYTHON_BUILTINS.contains(&head)
            }
            Self::JavaScript | Self::TypeScript => {
                let name = module.strip_prefix("node:").unwrap_or(module);
                NODE_BUILTINS.contains(&name)
            }
            Self::Rust => {
                let head = module.split("::").next().unwrap_or(module);
                RUST_BUILTINS.contains(&head)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_extensions() {
        assert_eq!(Lang::from_ext("tsx"), Some(Lang::TypeScript));
        assert_eq!(Lang::from_ext("rs"), Some(Lang::Rust));
        assert_eq!(Lang::from_ext("go"), None);
    }

    #[test]
    fn builtin_checks_use_language_separator() {
        assert!(Lang::Python.is_builtin("os.path"));
        assert!(!Lang::Python.is_builtin("osmosis"));
        assert!(Lang::Rust.is_builtin("std::collections::HashMap"));
        assert!(!Lang::Rust.is_builtin("crate::std_ext"));
        assert!(Lang::JavaScript.is_builtin("node:fs"));
        assert!(!Lang::TypeScript.is_builtin("fs/promises-extra"));
    }
}
