use std::collections::HashMap;

use crate::core::error::{Error, Result};
use crate::core::ids::IdSet;
use crate::core::types::{RecordId, Value};
use crate::index::ColumnIndex;
use crate::query::ast::MatchKind;
use crate::schema::schema::IndexKind;

/// Per-column exact-match index: value to ordered id list.
pub struct FullmatchIndex {
    column: String,
    buckets: HashMap<Value, Vec<RecordId>>,
}

impl FullmatchIndex {
    pub fn new(column: &str) -> Self {
        FullmatchIndex {
            column: column.to_string(),
            buckets: HashMap::new(),
        }
    }

    /// Ids stored under exactly `value`; empty if the value is absent.
    pub fn get(&self, value: &Value) -> IdSet {
        match self.buckets.get(value) {
            Some(ids) => ids.iter().copied().collect(),
            None => IdSet::new(),
        }
    }

    /// Whether a bucket exists for `value` at all.
    pub fn has_bucket(&self, value: &Value) -> bool {
        self.buckets.contains_key(value)
    }
}

impl ColumnIndex for FullmatchIndex {
    fn kind(&self) -> IndexKind {
        IndexKind::Fullmatch
    }

    fn serves(&self, kind: MatchKind) -> bool {
        kind == MatchKind::Fullmatch
    }

    fn add(&mut self, value: &Value, id: RecordId) -> Result<()> {
        let bucket = self.buckets.entry(value.clone()).or_default();
        if !bucket.contains(&id) {
            bucket.push(id);
        }
        Ok(())
    }

    fn remove(&mut self, value: &Value, id: RecordId) -> Result<()> {
        let Some(bucket) = self.buckets.get_mut(value) else {
            return Err(Error::NotFound {
                what: format!("value in fullmatch index on '{}'", self.column),
            });
        };
        let Some(pos) = bucket.iter().position(|&existing| existing == id) else {
            return Err(Error::NotFound {
                what: format!("record {id} in fullmatch index on '{}'", self.column),
            });
        };
        bucket.remove(pos);
        if bucket.is_empty() {
            self.buckets.remove(value);
        }
        Ok(())
    }

    fn lookup(&self, value: &Value) -> Result<IdSet> {
        Ok(self.get(value))
    }

    fn entries(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    fn is_structurally_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_then_get_returns_bucket() {
        let mut index = FullmatchIndex::new("who");
        index.add(&Value::from("a@b.cz"), RecordId(1)).unwrap();
        index.add(&Value::from("a@b.cz"), RecordId(2)).unwrap();
        index.add(&Value::from("c@d.com"), RecordId(3)).unwrap();

        let hits = index.get(&Value::from("a@b.cz"));
        assert_eq!(hits.len(), 2);
        assert!(hits.contains(RecordId(1)));
        assert!(hits.contains(RecordId(2)));
        assert!(index.get(&Value::from("nobody")).is_empty());
    }

    #[test]
    fn add_deduplicates_ids() {
        let mut index = FullmatchIndex::new("who");
        index.add(&Value::from("x"), RecordId(1)).unwrap();
        index.add(&Value::from("x"), RecordId(1)).unwrap();
        assert_eq!(index.entries(), 1);
    }

    #[test]
    fn remove_drops_empty_bucket() {
        let mut index = FullmatchIndex::new("who");
        index.add(&Value::from("x"), RecordId(1)).unwrap();
        index.remove(&Value::from("x"), RecordId(1)).unwrap();

        assert!(!index.has_bucket(&Value::from("x")));
        assert!(index.is_structurally_empty());
    }

    #[test]
    fn remove_of_absent_value_or_id_fails() {
        let mut index = FullmatchIndex::new("who");
        index.add(&Value::from("x"), RecordId(1)).unwrap();

        assert!(matches!(
            index.remove(&Value::from("y"), RecordId(1)),
            Err(Error::NotFound { .. })
        ));
        assert!(matches!(
            index.remove(&Value::from("x"), RecordId(2)),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn float_keys_are_usable() {
        let mut index = FullmatchIndex::new("score");
        index.add(&Value::Float(1.5), RecordId(1)).unwrap();
        assert_eq!(index.get(&Value::Float(1.5)).len(), 1);
        assert!(index.get(&Value::Float(2.5)).is_empty());
    }

    #[test]
    fn serves_fullmatch_only() {
        let index = FullmatchIndex::new("who");
        assert!(index.serves(MatchKind::Fullmatch));
        assert!(!index.serves(MatchKind::Prefix));
    }
}
