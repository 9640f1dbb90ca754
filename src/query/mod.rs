pub mod ast;
pub mod eval;

pub use ast::{Atom, MatchKind, Query};
pub use eval::QueryEvaluator;
