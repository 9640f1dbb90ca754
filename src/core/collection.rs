use std::collections::BTreeMap;

use tracing::error;

use crate::core::codec::FieldCodec;
use crate::core::error::{Error, Result};
use crate::core::ids::IdSet;
use crate::core::stats::{CollectionStats, IndexStats};
use crate::core::types::{Record, RecordId, Value};
use crate::index::IndexRegistry;
use crate::query::ast::Query;
use crate::query::eval::QueryEvaluator;
use crate::schema::schema::Schema;

/// The indexed collection engine.
///
/// Owns the row store (the single source of truth), the autoincrement id
/// counter, and the index registry. Every insert/delete/edit applies the
/// identical change to the row store and to every registered index for
/// the affected columns; mutation takes `&mut self`, so no reader can
/// observe a partially-updated state. Shared concurrent use goes through
/// [`Store`](crate::core::store::Store).
pub struct Collection {
    schema: Schema,
    rows: BTreeMap<RecordId, Record>,
    next_id: u64,
    registry: IndexRegistry,
}

impl Collection {
    /// Build an empty collection; fails with `SchemaError` if the schema
    /// or its index declarations are invalid.
    pub fn new(schema: Schema) -> Result<Self> {
        let registry = IndexRegistry::from_schema(&schema)?;
        Ok(Collection {
            schema,
            rows: BTreeMap::new(),
            next_id: 1,
            registry,
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub(crate) fn registry(&self) -> &IndexRegistry {
        &self.registry
    }

    pub(crate) fn rows(&self) -> &BTreeMap<RecordId, Record> {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.rows.contains_key(&id)
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.rows.get(&id)
    }

    /// All record ids currently stored.
    pub fn universe(&self) -> IdSet {
        self.rows.keys().copied().collect()
    }

    /// Validate `record` against the schema, assign the next id, store the
    /// row, and add it to every registered index. Returns the new id.
    pub fn insert(&mut self, record: Record) -> Result<RecordId> {
        if record.len() != self.schema.columns.len() {
            return Err(Error::SchemaError {
                reason: format!(
                    "record has {} values, schema '{}' has {} columns",
                    record.len(),
                    self.schema.name,
                    self.schema.columns.len()
                ),
            });
        }

        let mut encoded = Vec::with_capacity(record.len());
        for (value, def) in record.into_iter().zip(self.schema.columns.iter()) {
            encoded.push(FieldCodec::encode(&def.name, value, &def.field_type)?);
        }

        let id = self.next_record_id()?;
        if let Err(err) = self.registry.add_record(&encoded, id) {
            error!(
                collection = %self.schema.name,
                %id,
                error = %err,
                "index update failed during insert; indexes may be stale"
            );
            return Err(err);
        }
        self.rows.insert(id, encoded);
        Ok(id)
    }

    /// Remove the row and its entries in every registered index.
    pub fn delete(&mut self, id: RecordId) -> Result<()> {
        let Some(record) = self.rows.remove(&id) else {
            return Err(Error::NotFound {
                what: format!("record {id}"),
            });
        };
        if let Err(err) = self.registry.remove_record(&record, id) {
            error!(
                collection = %self.schema.name,
                %id,
                error = %err,
                "index update failed during delete; indexes may be stale"
            );
            return Err(err);
        }
        Ok(())
    }

    /// Replace one column value of an existing record, swapping the old
    /// pairing for the new one in every index registered on that column.
    ///
    /// The row store stays authoritative: it is only overwritten after all
    /// index updates succeed. A mid-operation index failure can leave
    /// partial index state; it is logged and returned, never swallowed.
    /// Full rollback across N indexes is a documented limitation.
    pub fn edit(&mut self, id: RecordId, column: usize, value: Value) -> Result<()> {
        let Some(def) = self.schema.columns.get(column) else {
            return Err(Error::ColumnNotFound {
                column: format!("#{column}"),
            });
        };
        let value = FieldCodec::encode(&def.name, value, &def.field_type)?;

        let old = match self.rows.get(&id) {
            Some(row) => row[column].clone(),
            None => {
                return Err(Error::NotFound {
                    what: format!("record {id}"),
                });
            }
        };

        if let Err(err) = self.registry.replace(column, &old, &value, id) {
            error!(
                collection = %self.schema.name,
                %id,
                column = %def.name,
                error = %err,
                "index update failed during edit; indexes may be stale"
            );
            return Err(err);
        }
        if let Some(row) = self.rows.get_mut(&id) {
            row[column] = value;
        }
        Ok(())
    }

    /// Evaluate `query` and return the matching ids.
    pub fn filter_ids(&self, query: &Query) -> Result<IdSet> {
        QueryEvaluator::new(self).eval(query)
    }

    /// Evaluate `query` and materialize the matching records, decoded
    /// through the field codec. Order is unspecified.
    pub fn filter(&self, query: &Query) -> Result<Vec<(RecordId, Record)>> {
        let ids = self.filter_ids(query)?;
        let mut out = Vec::with_capacity(ids.len() as usize);
        for id in ids.iter() {
            let Some(row) = self.rows.get(&id) else {
                continue;
            };
            let mut record = Vec::with_capacity(row.len());
            for (value, def) in row.iter().zip(self.schema.columns.iter()) {
                record.push(FieldCodec::decode(&def.name, value, &def.field_type)?);
            }
            out.push((id, record));
        }
        Ok(out)
    }

    /// No-op for the in-memory engine; hook for external persistence
    /// layers implementing the same contract.
    pub fn commit(&mut self) -> Result<()> {
        Ok(())
    }

    pub fn stats(&self) -> CollectionStats {
        CollectionStats {
            name: self.schema.name.clone(),
            record_count: self.rows.len(),
            next_record_id: self.next_id,
            indexes: self
                .registry
                .entry_counts()
                .into_iter()
                .map(|(column, kind, entry_count)| IndexStats {
                    column: self.schema.columns[column].name.clone(),
                    kind,
                    entry_count,
                })
                .collect(),
        }
    }

    /// Whether every registered index is back to its initial empty state.
    /// Diagnostic; true for a collection whose records were all deleted.
    pub fn indexes_structurally_empty(&self) -> bool {
        self.registry.is_structurally_empty()
    }

    fn next_record_id(&mut self) -> Result<RecordId> {
        // The counter stops one short of u64::MAX, which is never assigned
        if self.next_id == u64::MAX {
            return Err(Error::IdPoolExhausted);
        }
        let id = RecordId(self.next_id);
        self.next_id += 1;
        Ok(id)
    }

    #[cfg(test)]
    pub(crate) fn force_next_id(&mut self, next_id: u64) {
        self.next_id = next_id;
    }
}
