//! Emitter tests: real directories via tempfile, enumerated with walkdir
//!
//! Run with: cargo test --test tests_emitter

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use pysplit::project::emit_package;
use pysplit::semantic::SymbolKind;
use pysplit::split_source;
use tempfile::TempDir;
use walkdir::WalkDir;

// ============================================================
// COMMON HELPER FUNCTIONS
// ============================================================

/// Split `source` and emit the package into a fresh temp directory
fn emit(source: &str) -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    let ctx = split_source(source, false).expect("split should succeed");
    emit_package(&ctx, source, dir.path()).expect("emit should succeed");
    dir
}

/// File names present in the emitted package
fn file_names(dir: &Path) -> BTreeSet<String> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect()
}

fn read(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).unwrap_or_else(|_| panic!("{name} should exist"))
}

// ============================================================
// PACKAGE LAYOUT
// ============================================================

#[test]
fn test_emits_expected_file_set() {
    let dir = emit("X = 1\ndef f():\n    return X\nclass C:\n    pass\n");
    let names = file_names(dir.path());
    let expected: BTreeSet<String> = ["constant.py", "f.py", "C.py", "__init__.py"]
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(names, expected);
}

#[test]
fn test_constant_file_absent_without_constants() {
    let dir = emit("def f():\n    pass\n");
    let names = file_names(dir.path());
    assert!(!names.contains("constant.py"));
    assert!(names.contains("__init__.py"));
}

#[test]
fn test_init_always_written() {
    let dir = emit("");
    assert_eq!(read(dir.path(), "__init__.py"), "");
}

// ============================================================
// FILE CONTENTS
// ============================================================

#[test]
fn test_declaration_file_with_global_import() {
    let dir = emit("import os\ndef g():\n    return os.getcwd()\n");
    assert_eq!(
        read(dir.path(), "g.py"),
        "import os\n\n\ndef g():\n    return os.getcwd()\n"
    );
}

#[test]
fn test_declaration_file_without_imports_has_no_leading_blanks() {
    let dir = emit("def f():\n    pass\n");
    assert_eq!(read(dir.path(), "f.py"), "def f():\n    pass\n");
}

#[test]
fn test_dependency_import_appended_after_globals() {
    let dir = emit("import sys\nX = 1\ndef f():\n    return X\n");
    assert_eq!(
        read(dir.path(), "f.py"),
        "import sys\nfrom .constant import X\n\n\ndef f():\n    return X\n"
    );
}

#[test]
fn test_constant_file_concatenates_statements() {
    let dir = emit("X = 1\nY = 2\ndef f():\n    return X + Y\n");
    assert_eq!(read(dir.path(), "constant.py"), "X = 1\nY = 2\n");
}

#[test]
fn test_multi_target_assignment_written_once_exported_twice() {
    let dir = emit("a = b = 0\n");
    assert_eq!(read(dir.path(), "constant.py"), "a = b = 0\n");
    assert_eq!(
        read(dir.path(), "__init__.py"),
        "from .constant import a\nfrom .constant import b\n"
    );
}

#[test]
fn test_decorated_function_keeps_decorator() {
    let dir = emit("def deco(f):\n    return f\n@deco\ndef h():\n    pass\n");
    let content = read(dir.path(), "h.py");
    assert_eq!(
        content,
        "from .deco import deco\n\n\n@deco\ndef h():\n    pass\n"
    );
}

#[test]
fn test_init_reexports_every_name_in_order() {
    let dir = emit("X = 1\ndef f():\n    return X\nclass C:\n    pass\n");
    assert_eq!(
        read(dir.path(), "__init__.py"),
        "from .constant import X\nfrom .f import f\nfrom .C import C\n"
    );
}

// ============================================================
// IDEMPOTENCE
// ============================================================

/// Splitting the concatenation of a split's own output (in aggregator
/// order) yields the same table membership as the original run.
#[test]
fn test_split_is_idempotent_over_recombination() {
    let source = "import os\n\
                  from functools import wraps\n\
                  LIMIT = 10\n\
                  def clamp(n):\n    return min(n, LIMIT)\n\
                  class Window:\n    def fit(self, n):\n        return clamp(n)\n";
    let dir = TempDir::new().unwrap();
    let ctx = split_source(source, false).unwrap();
    emit_package(&ctx, source, dir.path()).unwrap();

    let mut recombined = String::new();
    let mut constants_included = false;
    for symbol in ctx.symbols.iter() {
        let file = match symbol.kind() {
            SymbolKind::Constant => {
                if constants_included {
                    continue;
                }
                constants_included = true;
                "constant.py".to_string()
            }
            _ => format!("{}.py", symbol.name()),
        };
        recombined.push_str(&read(dir.path(), &file));
        recombined.push('\n');
    }

    let again = split_source(&recombined, false).expect("recombined output should split");
    assert_eq!(again.symbols.len(), ctx.symbols.len());
    for symbol in ctx.symbols.iter() {
        let other = again
            .symbols
            .lookup(symbol.name())
            .expect("symbol should survive recombination");
        assert_eq!(other.kind(), symbol.kind());
    }
}
