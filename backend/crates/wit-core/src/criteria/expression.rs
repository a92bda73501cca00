use crate::criteria::literal::Literal;

use std::fmt;

/// Boolean filter over work item fields.
///
/// Composition consumes both operands and returns a new root, so a tree is
/// only ever built bottom-up and never shares or mutates a subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Equals { field: String, value: Literal },
    IsNull { field: String },
    And(Box<Expression>, Box<Expression>),
    Or(Box<Expression>, Box<Expression>),
}

impl Expression {
    pub fn equals(field: impl Into<String>, value: impl Into<Literal>) -> Self {
        Expression::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn is_null(field: impl Into<String>) -> Self {
        Expression::IsNull {
            field: field.into(),
        }
    }

    pub fn and(self, other: Expression) -> Self {
        Expression::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Expression) -> Self {
        Expression::Or(Box::new(self), Box::new(other))
    }

    /// And-combine `exprs` into a balanced tree. `None` for an empty input.
    pub fn all<I: IntoIterator<Item = Expression>>(exprs: I) -> Option<Self> {
        balanced(exprs.into_iter().collect(), &Expression::and)
    }

    /// Or-combine `exprs` into a balanced tree. `None` for an empty input.
    pub fn any<I: IntoIterator<Item = Expression>>(exprs: I) -> Option<Self> {
        balanced(exprs.into_iter().collect(), &Expression::or)
    }

    /// Longest path from the root to a leaf, counting the leaf.
    pub fn depth(&self) -> usize {
        match self {
            Expression::Equals { .. } | Expression::IsNull { .. } => 1,
            Expression::And(l, r) | Expression::Or(l, r) => 1 + l.depth().max(r.depth()),
        }
    }

    /// Number of leaf predicates in the tree.
    pub fn leaf_count(&self) -> usize {
        match self {
            Expression::Equals { .. } | Expression::IsNull { .. } => 1,
            Expression::And(l, r) | Expression::Or(l, r) => l.leaf_count() + r.leaf_count(),
        }
    }

    fn fmt_operand(&self, parent_is_and: bool, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let needs_parens = match self {
            Expression::And(..) => !parent_is_and,
            Expression::Or(..) => parent_is_and,
            _ => false,
        };
        if needs_parens {
            write!(f, "({self})")
        } else {
            write!(f, "{self}")
        }
    }
}

/// Halves `exprs` recursively. The result is `ceil(log2(n)) + 1` levels deep,
/// and operand order is preserved left to right.
fn balanced(
    mut exprs: Vec<Expression>,
    combine: &dyn Fn(Expression, Expression) -> Expression,
) -> Option<Expression> {
    match exprs.len() {
        0 => None,
        1 => exprs.pop(),
        n => {
            let right = exprs.split_off(n.div_ceil(2));
            let left = balanced(exprs, combine)?;
            let right = balanced(right, combine)?;
            Some(combine(left, right))
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Equals { field, value } => write!(f, "{field} = {value}"),
            Expression::IsNull { field } => write!(f, "{field} IS NULL"),
            Expression::And(l, r) => {
                l.fmt_operand(true, f)?;
                write!(f, " AND ")?;
                r.fmt_operand(true, f)
            }
            Expression::Or(l, r) => {
                l.fmt_operand(false, f)?;
                write!(f, " OR ")?;
                r.fmt_operand(false, f)
            }
        }
    }
}
