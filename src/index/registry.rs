use crate::core::error::{Error, Result};
use crate::core::types::{Record, RecordId, Value};
use crate::index::{ColumnIndex, FullmatchIndex, PrefixIndex};
use crate::query::ast::MatchKind;
use crate::schema::schema::{IndexKind, Schema};

#[derive(Default)]
struct ColumnSlots {
    prefix: Option<Box<dyn ColumnIndex>>,
    fullmatch: Option<Box<dyn ColumnIndex>>,
}

impl ColumnSlots {
    fn iter(&self) -> impl Iterator<Item = &dyn ColumnIndex> {
        self.prefix
            .as_deref()
            .into_iter()
            .chain(self.fullmatch.as_deref())
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn ColumnIndex>> {
        self.prefix.iter_mut().chain(self.fullmatch.iter_mut())
    }
}

/// Holds the registered secondary indexes, one slot per (column, kind),
/// and selects the index answering a query atom.
///
/// Built once at collection construction from the schema's declarations;
/// owned exclusively by that collection and kept in lock-step with its
/// row store.
pub struct IndexRegistry {
    columns: Vec<ColumnSlots>,
}

impl IndexRegistry {
    pub fn from_schema(schema: &Schema) -> Result<Self> {
        schema.validate()?;

        let mut columns: Vec<ColumnSlots> = (0..schema.columns.len())
            .map(|_| ColumnSlots::default())
            .collect();

        for spec in &schema.indexes {
            let pos = schema.column_position(&spec.column).ok_or_else(|| {
                Error::SchemaError {
                    reason: format!("index declared on unknown column '{}'", spec.column),
                }
            })?;
            let column = &schema.columns[pos];
            match spec.kind {
                IndexKind::Prefix => {
                    columns[pos].prefix = Some(Box::new(PrefixIndex::for_column(
                        &column.name,
                        &column.field_type,
                        false,
                    )?));
                }
                IndexKind::Fullmatch => {
                    columns[pos].fullmatch = Some(Box::new(FullmatchIndex::new(&column.name)));
                }
            }
        }

        Ok(IndexRegistry { columns })
    }

    /// The dedicated index serving `(column, kind)`, if any.
    ///
    /// Fixed rule: a registered index whose mode serves the query's match
    /// kind wins; `None` means the caller falls back to a primary-index
    /// scan. Never fails outright.
    pub fn select(&self, column: usize, kind: MatchKind) -> Option<&dyn ColumnIndex> {
        self.columns
            .get(column)?
            .iter()
            .find(|index| index.serves(kind))
    }

    /// Add a freshly inserted record to every registered index.
    pub fn add_record(&mut self, record: &Record, id: RecordId) -> Result<()> {
        for (column, slots) in self.columns.iter_mut().enumerate() {
            for index in slots.iter_mut() {
                index.add(&record[column], id)?;
            }
        }
        Ok(())
    }

    /// Remove a deleted record from every registered index, using the
    /// record's old column values.
    pub fn remove_record(&mut self, record: &Record, id: RecordId) -> Result<()> {
        for (column, slots) in self.columns.iter_mut().enumerate() {
            for index in slots.iter_mut() {
                index.remove(&record[column], id)?;
            }
        }
        Ok(())
    }

    /// Swap `old` for `new` in every index registered on `column`.
    pub fn replace(&mut self, column: usize, old: &Value, new: &Value, id: RecordId) -> Result<()> {
        let Some(slots) = self.columns.get_mut(column) else {
            return Err(Error::ColumnNotFound {
                column: format!("#{column}"),
            });
        };
        if old == new {
            return Ok(());
        }
        for index in slots.iter_mut() {
            index.remove(old, id)?;
            index.add(new, id)?;
        }
        Ok(())
    }

    /// Per-index entry counts as `(column position, kind, entries)`.
    pub fn entry_counts(&self) -> Vec<(usize, IndexKind, usize)> {
        let mut out = Vec::new();
        for (column, slots) in self.columns.iter().enumerate() {
            for index in slots.iter() {
                out.push((column, index.kind(), index.entries()));
            }
        }
        out
    }

    /// True once every registered index is back to its initial empty state.
    pub fn is_structurally_empty(&self) -> bool {
        self.columns
            .iter()
            .all(|slots| slots.iter().all(|index| index.is_structurally_empty()))
    }
}
