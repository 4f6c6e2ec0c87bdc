//! Term model for one parsed sentence.
//!
//! Terms live in a [`TermArena`] and refer to each other by [`TermId`].
//! Structs and lists own their arguments through the tree shape of the
//! parse, while variable bindings and co-bound peers are plain indices into
//! the same arena, so cyclic references never dangle.

use std::collections::HashSet;

/// Index of a term within its arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TermId(usize);

impl TermId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A list cell: either the empty list `[]` or a cons of head and tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListCell {
    Empty,
    Cons(TermId, TermId),
}

/// A variable binding cell.
///
/// The cells of a co-bound set form a tree; the root is the set's
/// representative and holds the shared binding and the member list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    name: String,
    /// Next cell towards the representative; the cell itself at the root
    parent: TermId,
    /// The non-variable term the set is bound to. Root only.
    binding: Option<TermId>,
    /// Every cell of the set, the root included. Root only.
    members: Vec<TermId>,
}

impl Variable {
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A parsed term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// Unsigned integer literal, in its written form
    Number(String),
    /// Symbolic constant
    Atom(String),
    /// Mutable binding cell
    Variable(Variable),
    /// Compound term: functor(arg1, arg2, ...)
    Struct { functor: String, args: Vec<TermId> },
    /// List built from cons cells
    List(ListCell),
}

impl Term {
    /// Returns true if this term is a variable.
    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    /// Returns true for terms with arguments (structs and lists).
    pub fn is_compound(&self) -> bool {
        matches!(self, Term::Struct { .. } | Term::List(_))
    }

    /// Get the functor name and arity.
    ///
    /// Lists answer as the `.`/2 struct they stand for, and `[]`/0 when empty.
    pub fn functor_arity(&self) -> Option<(&str, usize)> {
        match self {
            Term::Struct { functor, args } => Some((functor.as_str(), args.len())),
            Term::List(ListCell::Cons(_, _)) => Some((".", 2)),
            Term::List(ListCell::Empty) => Some(("[]", 0)),
            _ => None,
        }
    }

    /// Arguments of a struct-like term, in position order.
    pub fn arguments(&self) -> Vec<TermId> {
        match self {
            Term::Struct { args, .. } => args.clone(),
            Term::List(ListCell::Cons(head, tail)) => vec![*head, *tail],
            _ => Vec::new(),
        }
    }
}

/// Arena holding every term of a sentence.
#[derive(Debug, Default, Clone)]
pub struct TermArena {
    terms: Vec<Term>,
}

impl TermArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a term, returning its id.
    pub fn alloc(&mut self, term: Term) -> TermId {
        let id = TermId(self.terms.len());
        self.terms.push(term);
        id
    }

    pub fn number(&mut self, text: impl Into<String>) -> TermId {
        self.alloc(Term::Number(text.into()))
    }

    pub fn atom(&mut self, name: impl Into<String>) -> TermId {
        self.alloc(Term::Atom(name.into()))
    }

    /// Create a fresh, unbound variable cell.
    pub fn variable(&mut self, name: impl Into<String>) -> TermId {
        let id = TermId(self.terms.len());
        self.alloc(Term::Variable(Variable {
            name: name.into(),
            parent: id,
            binding: None,
            members: vec![id],
        }))
    }

    pub fn structure(&mut self, functor: impl Into<String>, args: Vec<TermId>) -> TermId {
        self.alloc(Term::Struct {
            functor: functor.into(),
            args,
        })
    }

    pub fn empty_list(&mut self) -> TermId {
        self.alloc(Term::List(ListCell::Empty))
    }

    pub fn cons(&mut self, head: TermId, tail: TermId) -> TermId {
        self.alloc(Term::List(ListCell::Cons(head, tail)))
    }

    /// Create a list from its elements, as right-nested cons cells.
    pub fn list(&mut self, elements: Vec<TermId>) -> TermId {
        let mut result = self.empty_list();
        for element in elements.into_iter().rev() {
            result = self.cons(element, result);
        }
        result
    }

    /// Replace the arguments of a struct allocated before its arguments
    /// were parsed. Other terms are left untouched.
    pub(crate) fn set_arguments(&mut self, id: TermId, new_args: Vec<TermId>) {
        if let Term::Struct { args, .. } = &mut self.terms[id.0] {
            *args = new_args;
        }
    }

    pub fn get(&self, id: TermId) -> &Term {
        &self.terms[id.0]
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn as_variable(&self, id: TermId) -> Option<&Variable> {
        match self.get(id) {
            Term::Variable(var) => Some(var),
            _ => None,
        }
    }

    fn variable_mut(&mut self, id: TermId) -> Option<&mut Variable> {
        match &mut self.terms[id.0] {
            Term::Variable(var) => Some(var),
            _ => None,
        }
    }

    /// The representative of a variable's co-bound set.
    fn root(&self, id: TermId) -> TermId {
        let mut current = id;
        while let Some(var) = self.as_variable(current) {
            if var.parent == current {
                break;
            }
            current = var.parent;
        }
        current
    }

    /// The co-bound set of a variable, itself included. Empty for
    /// non-variables.
    pub fn group(&self, id: TermId) -> Vec<TermId> {
        self.as_variable(self.root(id))
            .map(|root| root.members.clone())
            .unwrap_or_default()
    }

    /// The binding shared by a variable's co-bound set.
    pub fn group_binding(&self, id: TermId) -> Option<TermId> {
        self.as_variable(self.root(id)).and_then(|root| root.binding)
    }

    /// Returns true if both ids are variables of one co-bound set.
    pub fn same_group(&self, a: TermId, b: TermId) -> bool {
        self.get(a).is_variable() && self.get(b).is_variable() && self.root(a) == self.root(b)
    }

    /// Bind the co-bound set of `var` to `target`.
    pub(crate) fn bind_group(&mut self, var: TermId, target: TermId) {
        let root = self.root(var);
        if let Some(cell) = self.variable_mut(root) {
            log::trace!("bind {}#{} -> #{}", cell.name, var.0, target.0);
            cell.binding = Some(target);
        }
    }

    /// Merge the co-bound sets of two variables, bound to `binding`.
    ///
    /// The smaller set hangs under the larger one's representative, which
    /// keeps the path from any cell to its root logarithmic.
    pub(crate) fn merge_groups(&mut self, a: TermId, b: TermId, binding: Option<TermId>) {
        let (ra, rb) = (self.root(a), self.root(b));
        let size = |arena: &Self, root| arena.as_variable(root).map_or(0, |v| v.members.len());
        let (root, child) = if size(self, ra) >= size(self, rb) { (ra, rb) } else { (rb, ra) };

        let mut moved = Vec::new();
        if root != child {
            if let Some(cell) = self.variable_mut(child) {
                cell.parent = root;
                cell.binding = None;
                moved = std::mem::take(&mut cell.members);
            }
        }
        if let Some(cell) = self.variable_mut(root) {
            cell.members.extend(moved);
            cell.binding = binding;
        }
    }

    /// Returns true if any member of `var`'s co-bound set occurs inside
    /// `term`, looking through the bindings of variables met on the way.
    pub fn occurs(&self, var: TermId, term: TermId) -> bool {
        if !self.get(var).is_variable() {
            return false;
        }
        let target = self.root(var);
        let mut visited = HashSet::new();
        let mut pending = vec![term];
        while let Some(current) = pending.pop() {
            match self.get(current) {
                Term::Variable(_) => {
                    let root = self.root(current);
                    if root == target {
                        return true;
                    }
                    if visited.insert(root) {
                        pending.extend(self.group_binding(root));
                    }
                }
                Term::Struct { args, .. } => pending.extend(args.iter().copied()),
                Term::List(ListCell::Cons(head, tail)) => {
                    pending.push(*tail);
                    pending.push(*head);
                }
                Term::List(ListCell::Empty) | Term::Number(_) | Term::Atom(_) => {}
            }
        }
        false
    }

    /// Does variable `var` occur among the elements of `list`?
    ///
    /// Non-list terms answer false.
    pub fn list_contains_variable(&self, list: TermId, var: TermId) -> bool {
        matches!(self.get(list), Term::List(_)) && self.occurs(var, list)
    }

    /// The elements of a proper list, or `None` for anything else.
    pub fn elements(&self, list: TermId) -> Option<Vec<TermId>> {
        let mut elements = Vec::new();
        let mut current = list;
        loop {
            match self.get(current) {
                Term::List(ListCell::Empty) => return Some(elements),
                Term::List(ListCell::Cons(head, tail)) => {
                    elements.push(*head);
                    current = *tail;
                }
                _ => return None,
            }
        }
    }

    /// The textual form of a term as it was written.
    pub fn symbol(&self, id: TermId) -> String {
        match self.get(id) {
            Term::Number(text) | Term::Atom(text) => text.clone(),
            Term::Variable(var) => var.name.clone(),
            Term::Struct { functor, args } => {
                let args: Vec<String> = args.iter().map(|&arg| self.symbol(arg)).collect();
                format!("{}({})", functor, args.join(", "))
            }
            Term::List(_) => self.render_list(id, &mut |arena, element| arena.symbol(element)),
        }
    }

    /// The current resolved form of a term.
    ///
    /// Bound variables render as what they are bound to. An unbound variable
    /// renders as the name of the earliest cell of its co-bound set.
    pub fn value(&self, id: TermId) -> String {
        let mut visiting = HashSet::new();
        self.resolve(id, &mut visiting)
    }

    fn resolve(&self, id: TermId, visiting: &mut HashSet<TermId>) -> String {
        match self.get(id) {
            Term::Number(text) | Term::Atom(text) => text.clone(),
            Term::Variable(var) => match self.group_binding(id) {
                Some(bound) if visiting.insert(id) => {
                    let value = self.resolve(bound, visiting);
                    visiting.remove(&id);
                    value
                }
                // Cyclic binding, only reachable with the occurs check off
                Some(_) => var.name.clone(),
                None => self.representative_name(id),
            },
            Term::Struct { functor, args } => {
                let args: Vec<String> = args.iter().map(|&arg| self.resolve(arg, visiting)).collect();
                format!("{}({})", functor, args.join(", "))
            }
            Term::List(_) => self.render_list(id, &mut |arena, element| arena.resolve(element, visiting)),
        }
    }

    fn representative_name(&self, id: TermId) -> String {
        self.as_variable(self.root(id))
            .and_then(|root| root.members.iter().min().copied())
            .and_then(|first| self.as_variable(first))
            .map(|var| var.name.clone())
            .unwrap_or_default()
    }

    fn render_list(&self, id: TermId, render: &mut dyn FnMut(&Self, TermId) -> String) -> String {
        let mut parts = Vec::new();
        let mut current = id;
        loop {
            match self.get(current) {
                Term::List(ListCell::Empty) => return format!("[{}]", parts.join(", ")),
                Term::List(ListCell::Cons(head, tail)) => {
                    parts.push(render(self, *head));
                    current = *tail;
                }
                _ => return format!("[{}|{}]", parts.join(", "), render(self, current)),
            }
        }
    }
}
