//! End-to-end pipeline tests: parse → scan → resolve → render
//!
//! Run with: cargo test --test tests_pipeline

use pysplit::semantic::SymbolKind;
use pysplit::{HeaderSynthesizer, SplitContext, SplitError, split_source};
use rstest::rstest;

// ============================================================
// COMMON HELPER FUNCTIONS
// ============================================================

/// Run the full in-memory pipeline over a source string
fn resolved(source: &str) -> SplitContext {
    split_source(source, false).expect("split should succeed")
}

/// Dependency names of one symbol, as plain strings
fn deps(ctx: &SplitContext, name: &str) -> Vec<String> {
    ctx.symbols
        .lookup(name)
        .expect("symbol should exist")
        .dependencies()
        .iter()
        .map(|d| d.to_string())
        .collect()
}

// ============================================================
// SYMBOL TABLE PROPERTIES
// ============================================================

#[test]
fn test_table_membership_in_source_order() {
    let ctx = resolved(
        "LIMIT = 10\n\
         def check(n):\n    return n < LIMIT\n\
         class Gate:\n    pass\n\
         def main():\n    return Gate()\n",
    );
    let names: Vec<_> = ctx.symbols.iter().map(|s| s.name().to_string()).collect();
    assert_eq!(names, vec!["LIMIT", "check", "Gate", "main"]);
    assert_eq!(ctx.symbols.len(), 4);
}

#[test]
fn test_no_symbol_depends_on_itself() {
    let ctx = resolved(
        "def rec(n):\n    return rec(n - 1) if n else 0\n\
         class Node:\n    def child(self):\n        return Node()\n",
    );
    for symbol in ctx.symbols.iter() {
        assert!(
            !symbol.dependencies().iter().any(|d| d == symbol.name()),
            "{} depends on itself",
            symbol.name()
        );
    }
}

#[test]
fn test_every_dependency_is_a_table_key() {
    let ctx = resolved(
        "A = 1\n\
         def f(x=A):\n    return g(x)\n\
         def g(y):\n    return y + A + outside\n",
    );
    for symbol in ctx.symbols.iter() {
        for dep in symbol.dependencies() {
            assert!(ctx.symbols.contains(dep), "unsound dependency {dep}");
        }
    }
}

#[test]
fn test_duplicate_declaration_aborts() {
    let err = split_source("def f():\n    pass\nf = 1\n", false).unwrap_err();
    assert!(matches!(err, SplitError::Semantic(_)));
    assert!(err.to_string().contains("duplicate"));
}

// ============================================================
// SCENARIO TESTS
// ============================================================

#[test]
fn test_scenario_constant_dependency() {
    let ctx = resolved("X = 1\ndef f():\n    return X\n");
    assert_eq!(ctx.symbols.lookup("X").unwrap().kind(), SymbolKind::Constant);
    assert_eq!(ctx.symbols.lookup("f").unwrap().kind(), SymbolKind::Function);
    assert_eq!(deps(&ctx, "f"), vec!["X"]);
    let synthesizer = HeaderSynthesizer::new(&ctx);
    assert!(
        synthesizer
            .file_header("f")
            .contains("from .constant import X")
    );
}

#[test]
fn test_scenario_external_import_only() {
    let ctx = resolved("import os\ndef g():\n    return os.getcwd()\n");
    assert_eq!(ctx.imports.plain().collect::<Vec<_>>(), vec!["os"]);
    let synthesizer = HeaderSynthesizer::new(&ctx);
    let header = synthesizer.file_header("g");
    assert!(header.starts_with("import os\n"));
    assert!(!header.contains("from ."));
}

#[test]
fn test_scenario_class_inheritance() {
    let ctx = resolved("class A:\n    pass\nclass B(A):\n    pass\n");
    assert_eq!(deps(&ctx, "B"), vec!["A"]);
    let synthesizer = HeaderSynthesizer::new(&ctx);
    assert!(synthesizer.file_header("B").contains("from .A import A"));
}

#[test]
fn test_scenario_repeated_from_import_collapses() {
    let ctx = resolved(
        "from collections import OrderedDict, defaultdict\n\
         X = 1\n\
         from collections import OrderedDict, defaultdict\n",
    );
    let from: Vec<_> = ctx.imports.from_imports().collect();
    assert_eq!(from, vec!["collections import (OrderedDict,defaultdict)"]);
}

// ============================================================
// HEADER SYNTHESIS
// ============================================================

#[test]
fn test_global_header_deterministic_across_calls() {
    let ctx = resolved("import sys\nfrom os import path\nimport json\n");
    let synthesizer = HeaderSynthesizer::new(&ctx);
    let first = synthesizer.global_header().to_string();
    let second = synthesizer.global_header().to_string();
    assert_eq!(first, second);
    assert_eq!(first, "import sys\nimport json\nfrom os import (path)\n");
}

#[rstest]
#[case("X = 1\ndef f():\n    return X\n", "f", "from .constant import X\n")]
#[case(
    "def a():\n    pass\ndef b():\n    return a()\n",
    "b",
    "from .a import a\n"
)]
#[case("class A:\n    pass\nclass B(A):\n    pass\n", "B", "from .A import A\n")]
#[case("X = 1\ndef f():\n    pass\n", "f", "")]
fn test_dependency_routing(#[case] source: &str, #[case] name: &str, #[case] expected: &str) {
    let ctx = resolved(source);
    let synthesizer = HeaderSynthesizer::new(&ctx);
    assert_eq!(synthesizer.dependency_header(name), expected);
}

#[test]
fn test_aggregator_covers_every_symbol() {
    let ctx = resolved("X = 1\ndef f():\n    pass\nclass C:\n    pass\n");
    let synthesizer = HeaderSynthesizer::new(&ctx);
    let aggregator = synthesizer.aggregator_header();
    assert_eq!(
        aggregator,
        "from .constant import X\nfrom .f import f\nfrom .C import C\n"
    );
}

// ============================================================
// RESOLUTION DETAILS
// ============================================================

#[test]
fn test_alias_import_does_not_become_dependency() {
    let ctx = resolved("import numpy as np\ndef f(v):\n    return np.sum(v)\n");
    assert!(deps(&ctx, "f").is_empty());
    assert_eq!(
        ctx.imports.plain().collect::<Vec<_>>(),
        vec!["numpy as np"]
    );
}

#[test]
fn test_transitive_chain_is_direct_edges_only() {
    let ctx = resolved(
        "def low():\n    pass\n\
         def mid():\n    return low()\n\
         def high():\n    return mid()\n",
    );
    assert_eq!(deps(&ctx, "mid"), vec!["low"]);
    assert_eq!(deps(&ctx, "high"), vec!["mid"]);
}

#[test]
fn test_parallel_resolution_matches_sequential() {
    let source = "X = 1\n\
                  Y = 2\n\
                  def a():\n    return X\n\
                  def b():\n    return a() + Y\n\
                  class C:\n    def m(self):\n        return b()\n";
    let sequential = split_source(source, false).unwrap();
    let parallel = split_source(source, true).unwrap();
    for symbol in sequential.symbols.iter() {
        let other = parallel.symbols.lookup(symbol.name()).unwrap();
        assert_eq!(symbol.dependencies(), other.dependencies());
        assert_eq!(symbol.kind(), other.kind());
    }
}

#[test]
fn test_other_statements_do_not_contribute() {
    let ctx = resolved(
        "X = 1\n\
         print(X)\n\
         if X:\n    print(\"positive\")\n\
         def f():\n    return X\n",
    );
    assert_eq!(ctx.symbols.len(), 2);
    assert_eq!(deps(&ctx, "f"), vec!["X"]);
}
