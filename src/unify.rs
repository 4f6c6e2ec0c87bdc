//! Unification of terms within one arena.
//!
//! Binding is a side effect on the arena's variable cells. Failure is a
//! plain `false`; bindings made before a failure was found stay in place.

use crate::config::Config;
use crate::term::{Term, TermArena, TermId};

/// Unifier over the terms of one sentence.
pub struct Unifier<'a> {
    arena: &'a mut TermArena,
    occurs_check: bool,
}

impl<'a> Unifier<'a> {
    pub fn new(arena: &'a mut TermArena, config: &Config) -> Self {
        Self {
            arena,
            occurs_check: config.occurs_check,
        }
    }

    pub fn arena(&self) -> &TermArena {
        &*self.arena
    }

    /// Attempt to make `a` and `b` equal, binding variables as needed.
    ///
    /// Argument pairs are kept on an explicit stack, so the depth of the
    /// call stack does not grow with the length of a list.
    pub fn unify(&mut self, a: TermId, b: TermId) -> bool {
        let mut pending = vec![(a, b)];
        while let Some((a, b)) = pending.pop() {
            if !self.unify_pair(a, b, &mut pending) {
                log::trace!("unify #{} = #{} fails", a.index(), b.index());
                return false;
            }
        }
        true
    }

    /// Settle one pair, pushing any argument pairs it depends on.
    fn unify_pair(&mut self, a: TermId, b: TermId, pending: &mut Vec<(TermId, TermId)>) -> bool {
        if a == b {
            return true;
        }
        match (self.arena.get(a).is_variable(), self.arena.get(b).is_variable()) {
            (true, true) => self.unify_variables(a, b),
            (true, false) => self.unify_variable(a, b, pending),
            (false, true) => self.unify_variable(b, a, pending),
            (false, false) => self.unify_values(a, b, pending),
        }
    }

    /// A variable against a non-variable term.
    fn unify_variable(&mut self, var: TermId, term: TermId, pending: &mut Vec<(TermId, TermId)>) -> bool {
        if self.occurs_check && self.arena.get(term).is_compound() && self.arena.occurs(var, term) {
            log::trace!("occurs check rejects #{} in #{}", var.index(), term.index());
            return false;
        }
        match self.arena.group_binding(var) {
            Some(bound) => pending.push((bound, term)),
            None => self.arena.bind_group(var, term),
        }
        true
    }

    /// Two variables: their co-bound sets merge and share one binding.
    fn unify_variables(&mut self, a: TermId, b: TermId) -> bool {
        if self.arena.same_group(a, b) {
            return true;
        }
        let binding = match (self.arena.group_binding(a), self.arena.group_binding(b)) {
            (None, None) => None,
            (Some(bound), None) => {
                if self.occurs_check && self.arena.occurs(b, bound) {
                    return false;
                }
                Some(bound)
            }
            (None, Some(bound)) => {
                if self.occurs_check && self.arena.occurs(a, bound) {
                    return false;
                }
                Some(bound)
            }
            // Settled before merging, so a failure leaves both sets apart
            (Some(left), Some(right)) => {
                if !self.unify(left, right) {
                    return false;
                }
                Some(left)
            }
        };
        self.arena.merge_groups(a, b, binding);
        true
    }

    /// Two non-variable terms.
    fn unify_values(&mut self, a: TermId, b: TermId, pending: &mut Vec<(TermId, TermId)>) -> bool {
        let (left, right) = (self.arena.get(a), self.arena.get(b));
        match (left, right) {
            (Term::Number(x) | Term::Atom(x), Term::Number(y) | Term::Atom(y)) => x == y,
            _ if left.is_compound() && right.is_compound() => {
                if left.functor_arity() != right.functor_arity() {
                    return false;
                }
                // Reversed so that arguments are settled left to right
                let pairs: Vec<(TermId, TermId)> =
                    left.arguments().into_iter().zip(right.arguments()).collect();
                pending.extend(pairs.into_iter().rev());
                true
            }
            _ => false,
        }
    }
}

/// Unify two terms of `arena` under `config`.
pub fn unify(arena: &mut TermArena, a: TermId, b: TermId, config: &Config) -> bool {
    Unifier::new(arena, config).unify(a, b)
}
