use crate::core::codec::FieldCodec;
use crate::core::collection::Collection;
use crate::core::error::{Error, Result};
use crate::core::ids::IdSet;
use crate::core::types::Value;
use crate::index::PrimaryIndex;
use crate::query::ast::{Atom, MatchKind, Query};

/// Recursive, side-effect-free evaluation of a query AST against one
/// collection, producing the set of matching record ids.
///
/// The first error (unknown column, type mismatch) aborts the whole
/// evaluation; partial results are never returned.
pub struct QueryEvaluator<'a> {
    collection: &'a Collection,
}

impl<'a> QueryEvaluator<'a> {
    pub fn new(collection: &'a Collection) -> Self {
        QueryEvaluator { collection }
    }

    pub fn eval(&self, query: &Query) -> Result<IdSet> {
        match query {
            Query::Atom(atom) => self.eval_atom(atom),

            Query::And(children) => {
                // Identity element of intersection: no constraint
                if children.is_empty() {
                    return Ok(self.collection.universe());
                }
                let mut acc = self.eval(&children[0])?;
                for child in &children[1..] {
                    if acc.is_empty() {
                        break;
                    }
                    acc.intersect(&self.eval(child)?);
                }
                Ok(acc)
            }

            Query::Or(children) => {
                let universe_len = self.collection.len() as u64;
                let mut acc = IdSet::new();
                for child in children {
                    acc.merge(&self.eval(child)?);
                    if acc.len() == universe_len {
                        break;
                    }
                }
                Ok(acc)
            }

            Query::Implication(left, right) => {
                let le = self.eval_atom(left)?;
                let re = self.eval_atom(right)?;
                // Vacuous truth: false antecedent collapses to the consequent
                if le.is_empty() {
                    return Ok(re);
                }
                // Exclude from the universe exactly the ids in Le \ Re
                let failing = le.difference(&re);
                Ok(self.collection.universe().difference(&failing))
            }

            Query::Negation(atom) => {
                let matched = self.eval_atom(atom)?;
                Ok(self.collection.universe().difference(&matched))
            }

            Query::Range {
                column,
                lower,
                upper,
            } => self.eval_range(column, lower.as_ref(), upper.as_ref()),
        }
    }

    fn eval_atom(&self, atom: &Atom) -> Result<IdSet> {
        let schema = self.collection.schema();
        let position =
            schema
                .column_position(&atom.column)
                .ok_or_else(|| Error::ColumnNotFound {
                    column: atom.column.clone(),
                })?;
        let column = &schema.columns[position];

        if atom.kind == MatchKind::Prefix && !column.field_type.is_sequence() {
            return Err(Error::NotImplemented {
                what: format!(
                    "prefix matching on non-sequence column '{}' ({})",
                    column.name, column.field_type
                ),
            });
        }
        FieldCodec::check(&column.name, &atom.value, &column.field_type)?;

        if let Some(index) = self.collection.registry().select(position, atom.kind) {
            return index.lookup(&atom.value);
        }

        // No dedicated index: degrade to a primary-index scan
        let mut pattern: Vec<Option<Value>> = vec![None; schema.columns.len()];
        pattern[position] = Some(atom.value.clone());
        Ok(match atom.kind {
            MatchKind::Fullmatch => PrimaryIndex::filter_exact(self.collection.rows(), &pattern),
            MatchKind::Prefix => {
                PrimaryIndex::filter_prefix(self.collection.rows(), &pattern, position)
            }
        })
    }

    fn eval_range(
        &self,
        column: &str,
        lower: Option<&Value>,
        upper: Option<&Value>,
    ) -> Result<IdSet> {
        let schema = self.collection.schema();
        let position = schema
            .column_position(column)
            .ok_or_else(|| Error::ColumnNotFound {
                column: column.to_string(),
            })?;
        let def = &schema.columns[position];

        if !def.field_type.is_ordered() {
            return Err(Error::NotImplemented {
                what: format!(
                    "range matching on unordered column '{}' ({})",
                    def.name, def.field_type
                ),
            });
        }
        for bound in [lower, upper].into_iter().flatten() {
            FieldCodec::check(&def.name, bound, &def.field_type)?;
        }

        Ok(PrimaryIndex::filter_range(
            self.collection.rows(),
            position,
            lower,
            upper,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::FieldType;
    use crate::schema::schema::{IndexKind, Schema};

    fn mail() -> Collection {
        let schema = Schema::new("mail")
            .column("who", FieldType::Str)
            .column("whom", FieldType::Str)
            .column("size", FieldType::UInt)
            .index("who", IndexKind::Fullmatch);
        let mut coll = Collection::new(schema).unwrap();
        for (who, whom, size) in [
            ("a@b.cz", "c@d.com", 10u64),
            ("a@b.cz", "e@f.org", 25),
            ("x@y.net", "c@d.com", 40),
        ] {
            coll.insert(vec![Value::from(who), Value::from(whom), Value::UInt(size)])
                .unwrap();
        }
        coll
    }

    fn eval(coll: &Collection, query: &Query) -> IdSet {
        QueryEvaluator::new(coll).eval(query).unwrap()
    }

    fn ids(set: &IdSet) -> Vec<u64> {
        let mut out: Vec<u64> = set.iter().map(|id| id.0).collect();
        out.sort_unstable();
        out
    }

    #[test]
    fn empty_and_is_the_universe() {
        let coll = mail();
        assert_eq!(eval(&coll, &Query::And(vec![])), coll.universe());
    }

    #[test]
    fn empty_or_is_the_empty_set() {
        let coll = mail();
        assert!(eval(&coll, &Query::Or(vec![])).is_empty());
    }

    #[test]
    fn single_child_and_or_equal_the_child() {
        let coll = mail();
        let atom = Query::fullmatch("who", "a@b.cz");
        let direct = eval(&coll, &atom);
        assert_eq!(eval(&coll, &Query::And(vec![atom.clone()])), direct);
        assert_eq!(eval(&coll, &Query::Or(vec![atom])), direct);
    }

    #[test]
    fn and_intersects_indexed_and_scanned_atoms() {
        let coll = mail();
        // who is fullmatch-indexed; whom falls back to a primary scan
        let query = Query::And(vec![
            Query::fullmatch("who", "a@b.cz"),
            Query::fullmatch("whom", "c@d.com"),
        ]);
        assert_eq!(ids(&eval(&coll, &query)), vec![1]);
    }

    #[test]
    fn or_unions_children() {
        let coll = mail();
        let query = Query::Or(vec![
            Query::fullmatch("who", "x@y.net"),
            Query::fullmatch("whom", "e@f.org"),
        ]);
        assert_eq!(ids(&eval(&coll, &query)), vec![2, 3]);
    }

    #[test]
    fn negation_is_the_complement() {
        let coll = mail();
        let query = Query::not(Atom::fullmatch("who", "a@b.cz"));
        assert_eq!(ids(&eval(&coll, &query)), vec![3]);
    }

    #[test]
    fn implication_excludes_left_without_right() {
        let coll = mail();
        // who=a@b.cz holds for 1 and 2; whom=c@d.com holds for 1 and 3.
        // Excluded: ids satisfying left but not right, i.e. 2.
        let query = Query::implies(
            Atom::fullmatch("who", "a@b.cz"),
            Atom::fullmatch("whom", "c@d.com"),
        );
        assert_eq!(ids(&eval(&coll, &query)), vec![1, 3]);
    }

    #[test]
    fn implication_with_empty_antecedent_is_the_consequent() {
        let coll = mail();
        let query = Query::implies(
            Atom::fullmatch("who", "nobody@nowhere"),
            Atom::fullmatch("whom", "c@d.com"),
        );
        assert_eq!(ids(&eval(&coll, &query)), vec![1, 3]);
    }

    #[test]
    fn range_uses_inclusive_bounds() {
        let coll = mail();
        let query = Query::range("size", Some(Value::UInt(10)), Some(Value::UInt(25)));
        assert_eq!(ids(&eval(&coll, &query)), vec![1, 2]);

        let open_upper = Query::range("size", Some(Value::UInt(26)), None);
        assert_eq!(ids(&eval(&coll, &open_upper)), vec![3]);
    }

    #[test]
    fn unknown_column_aborts_evaluation() {
        let coll = mail();
        let query = Query::And(vec![
            Query::fullmatch("who", "a@b.cz"),
            Query::fullmatch("ghost", "x"),
        ]);
        assert!(matches!(
            QueryEvaluator::new(&coll).eval(&query),
            Err(Error::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn mismatched_atom_value_aborts_evaluation() {
        let coll = mail();
        let query = Query::fullmatch("size", "not a number");
        assert!(matches!(
            QueryEvaluator::new(&coll).eval(&query),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn prefix_atom_on_scalar_column_is_not_implemented() {
        let coll = mail();
        let query = Query::Atom(Atom::new("size", Value::UInt(1), MatchKind::Prefix));
        assert!(matches!(
            QueryEvaluator::new(&coll).eval(&query),
            Err(Error::NotImplemented { .. })
        ));
    }

    #[test]
    fn range_on_unordered_column_is_not_implemented() {
        let schema = Schema::new("flags").column("on", FieldType::Bool);
        let mut coll = Collection::new(schema).unwrap();
        coll.insert(vec![Value::Bool(true)]).unwrap();

        let query = Query::range("on", Some(Value::Bool(false)), None);
        assert!(matches!(
            QueryEvaluator::new(&coll).eval(&query),
            Err(Error::NotImplemented { .. })
        ));
    }

    #[test]
    fn prefix_scan_fallback_matches_unindexed_column() {
        let coll = mail();
        // whom has no dedicated index of any kind
        let query = Query::prefix("whom", "c@");
        assert_eq!(ids(&eval(&coll, &query)), vec![1, 3]);
    }
}
