//! Python import scanner
//!
//! Walks a source tree for `.py` files, extracts the top-level module of
//! every import statement, and answers whether a declared PyPI package is
//! imported anywhere. Every module name counts as-is; an alias table adds
//! the distribution name when it differs from the module name (`PIL` also
//! counts as `pillow`). Extraction is line-regex based, not a Python parse,
//! so an import spelled at the start of a line inside a triple-quoted
//! string also registers.

use crate::domain::normalize_name;
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;
use walkdir::WalkDir;

/// Directories never descended into during the scan
const SKIP_DIRS: [&str; 14] = [
    "venv",
    ".venv",
    "env",
    ".env",
    "node_modules",
    "__pycache__",
    ".git",
    "site-packages",
    "dist",
    "build",
    ".tox",
    ".nox",
    "eggs",
    ".eggs",
];

/// Import modules whose distribution name differs from the module name.
/// Kept as a plain slice so tests can substitute their own table.
pub const IMPORT_ALIASES: [(&str, &str); 19] = [
    ("PIL", "pillow"),
    ("cv2", "opencv-python"),
    ("sklearn", "scikit-learn"),
    ("bs4", "beautifulsoup4"),
    ("yaml", "pyyaml"),
    ("dotenv", "python-dotenv"),
    ("dateutil", "python-dateutil"),
    ("jwt", "pyjwt"),
    ("Crypto", "pycryptodome"),
    ("attr", "attrs"),
    ("pkg_resources", "setuptools"),
    ("serial", "pyserial"),
    ("magic", "python-magic"),
    ("psycopg2", "psycopg2-binary"),
    ("MySQLdb", "mysql-python"),
    ("google", "google-cloud"),
    ("usb", "pyusb"),
    ("gi", "pygobject"),
    ("wx", "wxpython"),
];

// `import a.b, c.d as x` and `from a.b import c` both open with the module path
static IMPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*import\s+([^\n#]+)").unwrap());
static FROM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*from\s+([A-Za-z_][A-Za-z0-9_.]*)\s+import").unwrap());

/// The set of distribution names observed as imports in a source tree.
///
/// Names are normalized; unreadable files are skipped.
pub fn scan_imports(root: &Path) -> HashSet<String> {
    scan_imports_with_aliases(root, &IMPORT_ALIASES)
}

/// Same as [`scan_imports`] with a caller-provided alias table
pub fn scan_imports_with_aliases(root: &Path, aliases: &[(&str, &str)]) -> HashSet<String> {
    let mut imports = HashSet::new();

    // The root itself is always scanned, whatever it is named
    let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
        let name = entry.file_name().to_string_lossy();
        entry.depth() == 0 || !(entry.file_type().is_dir() && SKIP_DIRS.contains(&name.as_ref()))
    });

    for entry in walker.filter_map(Result::ok) {
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|e| e.to_str()) != Some("py") {
            continue;
        }
        if let Ok(content) = std::fs::read_to_string(entry.path()) {
            collect_imports(&content, aliases, &mut imports);
        }
    }

    imports
}

/// Extract normalized import names from one file's import statements
fn collect_imports(content: &str, aliases: &[(&str, &str)], out: &mut HashSet<String>) {
    for caps in FROM_RE.captures_iter(content) {
        if let Some(module) = top_level_module(&caps[1]) {
            record_module(module, aliases, out);
        }
    }

    for caps in IMPORT_RE.captures_iter(content) {
        // `import a.b as x, c.d` declares several modules on one line
        for clause in caps[1].split(',') {
            let module = clause.split_whitespace().next().unwrap_or("");
            if let Some(module) = top_level_module(module) {
                record_module(module, aliases, out);
            }
        }
    }
}

/// First dotted component of a module path, when it is a valid identifier
fn top_level_module(path: &str) -> Option<&str> {
    let first = path.split('.').next()?.trim();
    let valid = !first.is_empty()
        && first.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
        && first.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    valid.then_some(first)
}

/// Record an imported module under its own name and, when the alias table
/// knows it, under the distribution name too. `import psycopg2` must match
/// both a declared `psycopg2` and a declared `psycopg2-binary`.
fn record_module(module: &str, aliases: &[(&str, &str)], out: &mut HashSet<String>) {
    out.insert(normalize_name(module));
    if let Some((_, distribution)) = aliases.iter().find(|(alias, _)| *alias == module) {
        out.insert(normalize_name(distribution));
    }
}

/// Whether a declared package appears in the observed import set
pub fn is_imported(package: &str, imports: &HashSet<String>) -> bool {
    imports.contains(&normalize_name(package))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn imports_of(content: &str) -> HashSet<String> {
        let mut out = HashSet::new();
        collect_imports(content, &IMPORT_ALIASES, &mut out);
        out
    }

    #[test]
    fn test_plain_import() {
        let imports = imports_of("import requests\n");
        assert!(is_imported("requests", &imports));
    }

    #[test]
    fn test_from_import() {
        let imports = imports_of("from flask import Flask\n");
        assert!(is_imported("flask", &imports));
    }

    #[test]
    fn test_dotted_import_keeps_top_level() {
        let imports = imports_of("import os.path\nfrom django.db import models\n");
        assert!(imports.contains("os"));
        assert!(is_imported("django", &imports));
    }

    #[test]
    fn test_comma_separated_imports() {
        let imports = imports_of("import json, requests, sys\n");
        assert!(is_imported("requests", &imports));
        assert!(imports.contains("json"));
        assert!(imports.contains("sys"));
    }

    #[test]
    fn test_import_with_alias() {
        let imports = imports_of("import numpy as np\n");
        assert!(is_imported("numpy", &imports));
    }

    #[test]
    fn test_indented_import() {
        let imports = imports_of("def f():\n    import requests\n");
        assert!(is_imported("requests", &imports));
    }

    #[test]
    fn test_alias_table_resolution() {
        let imports = imports_of("import cv2\nfrom PIL import Image\nimport yaml\n");
        assert!(is_imported("opencv-python", &imports));
        assert!(is_imported("pillow", &imports));
        assert!(is_imported("PyYAML", &imports));
    }

    #[test]
    fn test_aliased_module_also_matches_its_own_name() {
        // Some distributions are published under the module name itself
        // (psycopg2, attr); the alias must add a name, never shadow one.
        let imports = imports_of("import psycopg2\nimport attr\n");
        assert!(is_imported("psycopg2", &imports));
        assert!(is_imported("psycopg2-binary", &imports));
        assert!(is_imported("attr", &imports));
        assert!(is_imported("attrs", &imports));
    }

    #[test]
    fn test_hardware_and_cloud_aliases() {
        let imports = imports_of("import usb.core\nimport gi\nimport wx\nfrom google import cloud\n");
        assert!(is_imported("pyusb", &imports));
        assert!(is_imported("pygobject", &imports));
        assert!(is_imported("wxpython", &imports));
        assert!(is_imported("google-cloud", &imports));
    }

    #[test]
    fn test_name_normalization_matches() {
        let imports = imports_of("import typing_extensions\n");
        assert!(is_imported("typing-extensions", &imports));
        assert!(is_imported("Typing.Extensions", &imports));
    }

    #[test]
    fn test_commented_import_ignored() {
        let imports = imports_of("# import requests\n");
        assert!(!is_imported("requests", &imports));
    }

    #[test]
    fn test_relative_import_ignored() {
        let imports = imports_of("from . import helpers\nfrom .models import User\n");
        assert!(imports.is_empty());
    }

    #[test]
    fn test_scan_walks_tree() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("pkg")).unwrap();
        fs::write(dir.path().join("main.py"), "import requests\n").unwrap();
        fs::write(dir.path().join("pkg/util.py"), "from flask import Flask\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "import fake\n").unwrap();

        let imports = scan_imports(dir.path());
        assert!(is_imported("requests", &imports));
        assert!(is_imported("flask", &imports));
        assert!(!is_imported("fake", &imports));
    }

    #[test]
    fn test_scan_skips_virtualenv_and_caches() {
        let dir = TempDir::new().unwrap();
        for skipped in [".venv", "node_modules", "__pycache__", "build"] {
            let sub = dir.path().join(skipped);
            fs::create_dir(&sub).unwrap();
            fs::write(sub.join("vendored.py"), "import vendored_only\n").unwrap();
        }
        fs::write(dir.path().join("app.py"), "import requests\n").unwrap();

        let imports = scan_imports(dir.path());
        assert!(is_imported("requests", &imports));
        assert!(!is_imported("vendored_only", &imports));
    }

    #[test]
    fn test_custom_alias_table() {
        let aliases = [("fitz", "pymupdf")];
        let mut out = HashSet::new();
        collect_imports("import fitz\n", &aliases, &mut out);
        assert!(is_imported("PyMuPDF", &out));
        // The default table does not know this alias
        assert!(!is_imported("PyMuPDF", &imports_of("import fitz\n")));
    }

    #[test]
    fn test_scan_empty_tree() {
        let dir = TempDir::new().unwrap();
        assert!(scan_imports(dir.path()).is_empty());
    }
}
