//! Whole-file symbol table for top-level declarations

use indexmap::IndexMap;
use indexmap::map::Entry;
use smol_str::SmolStr;

use super::error::SemanticError;

/// Classification of a top-level declaration.
///
/// Decided once at registration and never re-derived from syntax later.
/// Only `Constant` is treated specially downstream (constants are routed
/// to the shared constants module); functions and classes are equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Constant,
    Function,
    Class,
}

/// One top-level declaration: its kind and the sibling declarations it
/// references, in first-seen order with no duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    name: SmolStr,
    kind: SymbolKind,
    dependencies: Vec<SmolStr>,
}

impl Symbol {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    /// Sibling declarations this one references, in discovery order.
    /// Never contains the symbol's own name; every entry is a table key.
    pub fn dependencies(&self) -> &[SmolStr] {
        &self.dependencies
    }
}

/// Mapping from declaration name to [`Symbol`].
///
/// Iteration order equals declaration order in the source, which the
/// aggregator file relies on. Append-only during the scan phase; after
/// that only dependency insertion mutates it.
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: IndexMap<SmolStr, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_constant(&mut self, name: SmolStr) -> Result<(), SemanticError> {
        self.register(name, SymbolKind::Constant)
    }

    pub fn register_function(&mut self, name: SmolStr) -> Result<(), SemanticError> {
        self.register(name, SymbolKind::Function)
    }

    pub fn register_class(&mut self, name: SmolStr) -> Result<(), SemanticError> {
        self.register(name, SymbolKind::Class)
    }

    fn register(&mut self, name: SmolStr, kind: SymbolKind) -> Result<(), SemanticError> {
        match self.symbols.entry(name) {
            Entry::Occupied(entry) => Err(SemanticError::DuplicateDeclaration {
                name: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                let symbol = Symbol {
                    name: entry.key().clone(),
                    kind,
                    dependencies: Vec::new(),
                };
                entry.insert(symbol);
                Ok(())
            }
        }
    }

    /// Record that `owner` references `dep`. Appending an already-recorded
    /// dependency is a no-op; an unregistered `owner` is an error.
    pub fn add_dependency(&mut self, owner: &str, dep: &str) -> Result<(), SemanticError> {
        let symbol = self
            .symbols
            .get_mut(owner)
            .ok_or_else(|| SemanticError::UnknownSymbol {
                name: SmolStr::new(owner),
            })?;
        if !symbol.dependencies.iter().any(|d| d == dep) {
            symbol.dependencies.push(SmolStr::new(dep));
        }
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn lookup(&self, name: &str) -> Result<&Symbol, SemanticError> {
        self.get(name).ok_or_else(|| SemanticError::UnknownSymbol {
            name: SmolStr::new(name),
        })
    }

    /// Iterate symbols in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let mut table = SymbolTable::new();
        table.register_function("f".into()).unwrap();
        assert!(table.contains("f"));
        assert_eq!(table.lookup("f").unwrap().kind(), SymbolKind::Function);
    }

    #[test]
    fn test_duplicate_declaration_is_error() {
        let mut table = SymbolTable::new();
        table.register_constant("X".into()).unwrap();
        let err = table.register_function("X".into()).unwrap_err();
        assert_eq!(
            err,
            SemanticError::DuplicateDeclaration { name: "X".into() }
        );
    }

    #[test]
    fn test_lookup_unknown_is_error() {
        let table = SymbolTable::new();
        assert_eq!(
            table.lookup("missing").unwrap_err(),
            SemanticError::UnknownSymbol {
                name: "missing".into()
            }
        );
    }

    #[test]
    fn test_add_dependency_unknown_owner_is_error() {
        let mut table = SymbolTable::new();
        assert!(matches!(
            table.add_dependency("ghost", "dep"),
            Err(SemanticError::UnknownSymbol { .. })
        ));
    }

    #[test]
    fn test_dependencies_ordered_and_deduplicated() {
        let mut table = SymbolTable::new();
        table.register_function("f".into()).unwrap();
        table.register_constant("A".into()).unwrap();
        table.register_constant("B".into()).unwrap();
        table.add_dependency("f", "B").unwrap();
        table.add_dependency("f", "A").unwrap();
        table.add_dependency("f", "B").unwrap();
        let deps = table.lookup("f").unwrap().dependencies();
        assert_eq!(deps, &["B", "A"]);
    }

    #[test]
    fn test_iteration_order_is_declaration_order() {
        let mut table = SymbolTable::new();
        table.register_constant("Z".into()).unwrap();
        table.register_class("A".into()).unwrap();
        table.register_function("m".into()).unwrap();
        let names: Vec<_> = table.iter().map(|s| s.name().to_string()).collect();
        assert_eq!(names, vec!["Z", "A", "m"]);
    }
}
