//! Expression trees over equalities.
//!
//! A sentence is first read as a flat in-order sequence of [`Infix`] items
//! and then folded into a [`Node`] tree by precedence: `=` binds tightest,
//! then `,`, then `;`. Both `,` and `;` group to the right.

use crate::parser::ParseError;
use crate::term::TermId;
use crate::unify::Unifier;

/// A connective between terms or sub-expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    /// = (unification)
    Equality,
    /// , (conjunction)
    Comma,
    /// ; (disjunction)
    Semicolon,
}

impl Connective {
    /// Binding strength; higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            Connective::Equality => 3,
            Connective::Comma => 2,
            Connective::Semicolon => 1,
        }
    }
}

/// One item of the flat in-order sequence read from a sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Infix {
    Operand(TermId),
    Operator(Connective),
}

impl Infix {
    pub fn payload(&self) -> Payload {
        match self {
            Infix::Operand(_) => Payload::Term,
            Infix::Operator(Connective::Equality) => Payload::Equality,
            Infix::Operator(Connective::Comma) => Payload::Comma,
            Infix::Operator(Connective::Semicolon) => Payload::Semicolon,
        }
    }
}

/// The kind of a node, without its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    Term,
    Equality,
    Comma,
    Semicolon,
}

/// Expression tree vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Leaf holding one term
    Term(TermId),
    /// Left = Right
    Equality(Box<Node>, Box<Node>),
    /// Left, Right
    Comma(Box<Node>, Box<Node>),
    /// Left; Right
    Semicolon(Box<Node>, Box<Node>),
}

impl Node {
    /// Join two sub-trees with a connective.
    ///
    /// `=` takes exactly two term leaves; `,` and `;` take two complete
    /// sub-expressions.
    fn join(op: Connective, left: Node, right: Node) -> Result<Node, ParseError> {
        let leaves = (left.is_term(), right.is_term());
        let (left, right) = (Box::new(left), Box::new(right));
        match (op, leaves) {
            (Connective::Equality, (true, true)) => Ok(Node::Equality(left, right)),
            (Connective::Comma, (false, false)) => Ok(Node::Comma(left, right)),
            (Connective::Semicolon, (false, false)) => Ok(Node::Semicolon(left, right)),
            _ => Err(ParseError::unbalanced(None)),
        }
    }

    pub fn payload(&self) -> Payload {
        match self {
            Node::Term(_) => Payload::Term,
            Node::Equality(_, _) => Payload::Equality,
            Node::Comma(_, _) => Payload::Comma,
            Node::Semicolon(_, _) => Payload::Semicolon,
        }
    }

    pub fn is_term(&self) -> bool {
        matches!(self, Node::Term(_))
    }

    /// The term held by a leaf.
    pub fn term(&self) -> Option<TermId> {
        match self {
            Node::Term(id) => Some(*id),
            _ => None,
        }
    }

    pub fn left(&self) -> Option<&Node> {
        match self {
            Node::Term(_) => None,
            Node::Equality(left, _) | Node::Comma(left, _) | Node::Semicolon(left, _) => Some(left),
        }
    }

    pub fn right(&self) -> Option<&Node> {
        match self {
            Node::Term(_) => None,
            Node::Equality(_, right) | Node::Comma(_, right) | Node::Semicolon(_, right) => {
                Some(right)
            }
        }
    }

    /// All nodes of the tree in pre-order.
    pub fn preorder(&self) -> Vec<&Node> {
        let mut nodes = Vec::new();
        self.collect_preorder(&mut nodes);
        nodes
    }

    fn collect_preorder<'a>(&'a self, nodes: &mut Vec<&'a Node>) {
        nodes.push(self);
        if let (Some(left), Some(right)) = (self.left(), self.right()) {
            left.collect_preorder(nodes);
            right.collect_preorder(nodes);
        }
    }

    /// Evaluate the tree, unifying the operands of every equality.
    ///
    /// Both sides of `,` and `;` are always evaluated, so the bindings of
    /// each side are applied whatever the other side's outcome.
    pub fn evaluate(&self, unifier: &mut Unifier<'_>) -> bool {
        match self {
            Node::Term(_) => {
                log::warn!("a bare term has no truth value");
                false
            }
            Node::Equality(left, right) => match (left.term(), right.term()) {
                (Some(a), Some(b)) => unifier.unify(a, b),
                _ => false,
            },
            Node::Comma(left, right) => {
                let l = left.evaluate(unifier);
                let r = right.evaluate(unifier);
                l && r
            }
            Node::Semicolon(left, right) => {
                let l = left.evaluate(unifier);
                let r = right.evaluate(unifier);
                l || r
            }
        }
    }
}

/// Precedence climbing over the flat item sequence.
struct TreeBuilder<I: Iterator<Item = Infix>> {
    items: std::iter::Peekable<I>,
}

impl<I: Iterator<Item = Infix>> TreeBuilder<I> {
    fn operand(&mut self) -> Result<Node, ParseError> {
        match self.items.next() {
            Some(Infix::Operand(id)) => Ok(Node::Term(id)),
            _ => Err(ParseError::unbalanced(None)),
        }
    }

    fn expression(&mut self, min_precedence: u8) -> Result<Node, ParseError> {
        let mut lhs = self.operand()?;
        while let Some(&Infix::Operator(op)) = self.items.peek() {
            if op.precedence() < min_precedence {
                break;
            }
            self.items.next();
            let rhs = self.expression(op.precedence())?;
            lhs = Node::join(op, lhs, rhs)?;
        }
        Ok(lhs)
    }
}

/// Fold a flat in-order sequence into an expression tree.
///
/// The sequence must have the shape
/// `TERM = TERM [(, | ;) TERM = TERM]*`; anything else is reported as an
/// unbalanced operator.
pub fn inorder_to_preorder(items: Vec<Infix>) -> Result<Node, ParseError> {
    let mut builder = TreeBuilder {
        items: items.into_iter().peekable(),
    };
    let root = builder.expression(Connective::Semicolon.precedence())?;
    if builder.items.next().is_some() {
        return Err(ParseError::unbalanced(None));
    }
    if root.is_term() {
        return Err(ParseError::unbalanced(None));
    }
    log::debug!("expression tree rooted at {:?}", root.payload());
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::parser::ParseErrorKind;
    use crate::term::TermArena;

    fn equality(arena: &mut TermArena, items: &mut Vec<Infix>, name: &str, value: &str) {
        let var = arena.variable(name);
        let num = arena.number(value);
        items.push(Infix::Operand(var));
        items.push(Infix::Operator(Connective::Equality));
        items.push(Infix::Operand(num));
    }

    #[test]
    fn test_single_equality() {
        let mut arena = TermArena::new();
        let mut items = Vec::new();
        equality(&mut arena, &mut items, "X", "1");
        let root = inorder_to_preorder(items).unwrap();
        assert_eq!(root.payload(), Payload::Equality);
        assert_eq!(root.left().map(Node::payload), Some(Payload::Term));
        assert_eq!(root.right().map(Node::payload), Some(Payload::Term));
    }

    #[test]
    fn test_conjunction_groups_right() {
        let mut arena = TermArena::new();
        let mut items = Vec::new();
        equality(&mut arena, &mut items, "X", "1");
        items.push(Infix::Operator(Connective::Comma));
        equality(&mut arena, &mut items, "Y", "2");
        items.push(Infix::Operator(Connective::Comma));
        equality(&mut arena, &mut items, "Z", "3");

        let root = inorder_to_preorder(items).unwrap();
        assert_eq!(root.payload(), Payload::Comma);
        assert_eq!(root.left().map(Node::payload), Some(Payload::Equality));
        let right = root.right().unwrap();
        assert_eq!(right.payload(), Payload::Comma);
        assert_eq!(right.left().map(Node::payload), Some(Payload::Equality));
        assert_eq!(right.right().map(Node::payload), Some(Payload::Equality));
    }

    #[test]
    fn test_semicolon_is_outermost() {
        let mut arena = TermArena::new();
        let mut items = Vec::new();
        equality(&mut arena, &mut items, "X", "1");
        items.push(Infix::Operator(Connective::Comma));
        equality(&mut arena, &mut items, "Y", "2");
        items.push(Infix::Operator(Connective::Semicolon));
        equality(&mut arena, &mut items, "Z", "3");

        let root = inorder_to_preorder(items).unwrap();
        let payloads: Vec<Payload> = root.preorder().into_iter().map(Node::payload).collect();
        assert_eq!(
            payloads,
            vec![
                Payload::Semicolon,
                Payload::Comma,
                Payload::Equality,
                Payload::Term,
                Payload::Term,
                Payload::Equality,
                Payload::Term,
                Payload::Term,
                Payload::Equality,
                Payload::Term,
                Payload::Term,
            ]
        );
    }

    #[test]
    fn test_malformed_sequences() {
        let mut arena = TermArena::new();
        let x = arena.variable("X");
        let y = arena.variable("Y");
        let z = arena.variable("Z");

        // X = Y = Z
        let chained = vec![
            Infix::Operand(x),
            Infix::Operator(Connective::Equality),
            Infix::Operand(y),
            Infix::Operator(Connective::Equality),
            Infix::Operand(z),
        ];
        let err = inorder_to_preorder(chained).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Unbalanced);

        // X = Y, Z
        let dangling = vec![
            Infix::Operand(x),
            Infix::Operator(Connective::Equality),
            Infix::Operand(y),
            Infix::Operator(Connective::Comma),
            Infix::Operand(z),
        ];
        assert!(inorder_to_preorder(dangling).is_err());

        assert!(inorder_to_preorder(vec![Infix::Operand(x)]).is_err());
        assert!(inorder_to_preorder(Vec::new()).is_err());
    }

    #[test]
    fn test_evaluation_applies_both_sides() {
        let mut arena = TermArena::new();
        let mut items = Vec::new();
        equality(&mut arena, &mut items, "X", "1");
        items.push(Infix::Operator(Connective::Semicolon));
        equality(&mut arena, &mut items, "Y", "2");
        let root = inorder_to_preorder(items).unwrap();

        let config = Config::default();
        let mut unifier = Unifier::new(&mut arena, &config);
        assert!(root.evaluate(&mut unifier));

        let arena = unifier.arena();
        let x = root.left().and_then(Node::left).and_then(Node::term).unwrap();
        let y = root.right().and_then(Node::left).and_then(Node::term).unwrap();
        assert_eq!(arena.value(x), "1");
        assert_eq!(arena.value(y), "2");
    }

    #[test]
    fn test_bare_term_is_false() {
        let mut arena = TermArena::new();
        let x = arena.variable("X");
        let config = Config::default();
        let mut unifier = Unifier::new(&mut arena, &config);
        assert!(!Node::Term(x).evaluate(&mut unifier));
    }
}
