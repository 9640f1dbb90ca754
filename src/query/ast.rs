use serde::{Deserialize, Serialize};

use crate::core::types::Value;

/// How an atom's value is matched against a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchKind {
    /// Exact value equality.
    Fullmatch,
    /// The column value starts with the queried value (sequences only).
    Prefix,
}

/// A single column/value/match-kind predicate; the leaf of the query AST.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    pub column: String,
    pub value: Value,
    pub kind: MatchKind,
}

impl Atom {
    pub fn new(column: &str, value: impl Into<Value>, kind: MatchKind) -> Self {
        Atom {
            column: column.to_string(),
            value: value.into(),
            kind,
        }
    }

    pub fn fullmatch(column: &str, value: impl Into<Value>) -> Self {
        Atom::new(column, value, MatchKind::Fullmatch)
    }

    pub fn prefix(column: &str, value: impl Into<Value>) -> Self {
        Atom::new(column, value, MatchKind::Prefix)
    }
}

/// Query AST evaluated against a collection.
///
/// Constructed by the caller, immutable, never mutated by evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Query {
    Atom(Atom),
    /// All children must match; empty means "no constraint" (the universe).
    And(Vec<Query>),
    /// At least one child must match; empty means no record matches.
    Or(Vec<Query>),
    /// Material implication: excludes ids satisfying left but not right.
    Implication(Atom, Atom),
    /// Complement of the atom's result over the universe.
    Negation(Atom),
    /// Inclusive range over an ordered column; either bound may be open.
    Range {
        column: String,
        lower: Option<Value>,
        upper: Option<Value>,
    },
}

impl Query {
    pub fn fullmatch(column: &str, value: impl Into<Value>) -> Self {
        Query::Atom(Atom::fullmatch(column, value))
    }

    pub fn prefix(column: &str, value: impl Into<Value>) -> Self {
        Query::Atom(Atom::prefix(column, value))
    }

    pub fn and(children: Vec<Query>) -> Self {
        Query::And(children)
    }

    pub fn or(children: Vec<Query>) -> Self {
        Query::Or(children)
    }

    pub fn implies(left: Atom, right: Atom) -> Self {
        Query::Implication(left, right)
    }

    pub fn not(atom: Atom) -> Self {
        Query::Negation(atom)
    }

    pub fn range(column: &str, lower: Option<Value>, upper: Option<Value>) -> Self {
        Query::Range {
            column: column.to_string(),
            lower,
            upper,
        }
    }
}
