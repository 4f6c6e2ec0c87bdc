//! Symbol table for one sentence.
//!
//! Records every named term (variables, atoms and functors) once, in the
//! order the names were first seen, and tracks which variable cell a name
//! refers to in the current scope so that repeated occurrences can be
//! linked into one co-bound set.

use std::collections::HashMap;

use crate::term::TermId;

/// Ordered table of names seen while parsing a sentence.
#[derive(Debug, Default)]
pub struct SymbolTable {
    /// Map from name to its position in `entries`
    positions: HashMap<String, usize>,
    /// Names in first-seen order, with the term first designated by each
    entries: Vec<(String, TermId)>,
    /// Variables visible in the current scope
    scope: HashMap<String, TermId>,
}

impl SymbolTable {
    /// Create a new empty symbol table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a name, returning its position.
    ///
    /// If the name already exists its original position is returned and the
    /// designated term is left unchanged.
    pub fn register(&mut self, name: &str, term: TermId) -> usize {
        if let Some(&idx) = self.positions.get(name) {
            idx
        } else {
            let idx = self.entries.len();
            self.positions.insert(name.to_string(), idx);
            self.entries.push((name.to_string(), term));
            idx
        }
    }

    /// Look up a name, returning the term it first designated.
    pub fn lookup(&self, name: &str) -> Option<TermId> {
        self.positions.get(name).map(|&idx| self.entries[idx].1)
    }

    /// Get the position of a name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// Get the entry at a position.
    pub fn get(&self, idx: usize) -> Option<(&str, TermId)> {
        self.entries.get(idx).map(|(name, term)| (name.as_str(), *term))
    }

    /// Get the name at a position.
    pub fn name(&self, idx: usize) -> Option<&str> {
        self.get(idx).map(|(name, _)| name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str, TermId)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, (name, term))| (i, name.as_str(), *term))
    }

    /// The variable cell a name refers to in the current scope.
    pub fn scoped_variable(&self, name: &str) -> Option<TermId> {
        self.scope.get(name).copied()
    }

    /// Make `name` refer to `var` for the rest of the current scope, unless
    /// it already refers to an earlier cell.
    pub fn declare_variable(&mut self, name: &str, var: TermId) {
        self.scope.entry(name.to_string()).or_insert(var);
    }

    /// Start a fresh variable scope. Recorded names are kept.
    pub fn open_scope(&mut self) {
        self.scope.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::TermArena;

    #[test]
    fn test_first_seen_order() {
        let mut arena = TermArena::new();
        let x = arena.variable("X");
        let s = arena.structure("s", vec![]);
        let x_again = arena.variable("X");

        let mut table = SymbolTable::new();
        assert_eq!(table.register("X", x), 0);
        assert_eq!(table.register("s", s), 1);
        assert_eq!(table.register("X", x_again), 0);

        assert_eq!(table.len(), 2);
        assert_eq!(table.name(0), Some("X"));
        assert_eq!(table.name(1), Some("s"));
        assert_eq!(table.lookup("X"), Some(x));
        assert_eq!(table.position("s"), Some(1));
        assert_eq!(table.lookup("Y"), None);
    }

    #[test]
    fn test_scopes() {
        let mut arena = TermArena::new();
        let x = arena.variable("X");
        let x_again = arena.variable("X");

        let mut table = SymbolTable::new();
        table.declare_variable("X", x);
        table.declare_variable("X", x_again);
        assert_eq!(table.scoped_variable("X"), Some(x));

        table.open_scope();
        assert_eq!(table.scoped_variable("X"), None);
        table.declare_variable("X", x_again);
        assert_eq!(table.scoped_variable("X"), Some(x_again));
    }

    #[test]
    fn test_iter() {
        let mut arena = TermArena::new();
        let tom = arena.atom("tom");
        let y = arena.variable("Y");
        let mut table = SymbolTable::new();
        table.register("tom", tom);
        table.register("Y", y);
        let names: Vec<&str> = table.iter().map(|(_, name, _)| name).collect();
        assert_eq!(names, vec!["tom", "Y"]);
    }
}
