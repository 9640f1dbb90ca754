use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result};
use crate::core::types::FieldType;

/// Kind of a declared secondary index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexKind {
    /// Trie index supporting "starts-with" queries over sequences.
    Prefix,
    /// Exact-value hash index.
    Fullmatch,
}

/// One typed column of a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    pub field_type: FieldType,
}

/// Declaration of a secondary index over one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSpec {
    pub column: String,
    pub kind: IndexKind,
}

/// Named, typed column layout and index declarations of a collection.
///
/// Immutable after collection construction. The schema (and only the
/// schema, never the rows) is serializable so an external layer can
/// persist and reconstruct collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub name: String,
    pub columns: Vec<ColumnDef>,
    pub indexes: Vec<IndexSpec>,
}

impl Schema {
    pub fn new(name: &str) -> Self {
        Schema {
            name: name.to_string(),
            columns: Vec::new(),
            indexes: Vec::new(),
        }
    }

    /// Append a column (builder style).
    pub fn column(mut self, name: &str, field_type: FieldType) -> Self {
        self.columns.push(ColumnDef {
            name: name.to_string(),
            field_type,
        });
        self
    }

    /// Declare an index over an existing column (builder style).
    pub fn index(mut self, column: &str, kind: IndexKind) -> Self {
        self.indexes.push(IndexSpec {
            column: column.to_string(),
            kind,
        });
        self
    }

    /// Position of a column by name.
    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column_type(&self, position: usize) -> Option<&FieldType> {
        self.columns.get(position).map(|c| &c.field_type)
    }

    /// Check the schema invariants enforced at collection construction.
    pub fn validate(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(Error::SchemaError {
                reason: format!("schema '{}' has no columns", self.name),
            });
        }

        for (i, col) in self.columns.iter().enumerate() {
            if self.columns[..i].iter().any(|c| c.name == col.name) {
                return Err(Error::SchemaError {
                    reason: format!("duplicate column '{}'", col.name),
                });
            }
        }

        for (i, spec) in self.indexes.iter().enumerate() {
            let Some(pos) = self.column_position(&spec.column) else {
                return Err(Error::SchemaError {
                    reason: format!("index declared on unknown column '{}'", spec.column),
                });
            };

            if self.indexes[..i]
                .iter()
                .any(|s| s.column == spec.column && s.kind == spec.kind)
            {
                return Err(Error::SchemaError {
                    reason: format!(
                        "duplicate {:?} index on column '{}'",
                        spec.kind, spec.column
                    ),
                });
            }

            // Prefix indexes only make sense over sequences
            if spec.kind == IndexKind::Prefix && !self.columns[pos].field_type.is_sequence() {
                return Err(Error::SchemaError {
                    reason: format!(
                        "prefix index on non-sequence column '{}' ({})",
                        spec.column, self.columns[pos].field_type
                    ),
                });
            }
        }

        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Schema> {
        let schema: Schema = serde_json::from_str(json)?;
        schema.validate()?;
        Ok(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_schema() -> Schema {
        Schema::new("files")
            .column("path", FieldType::Str)
            .column("size", FieldType::UInt)
            .column("tags", FieldType::Array(Box::new(FieldType::Str)))
            .index("path", IndexKind::Prefix)
            .index("path", IndexKind::Fullmatch)
            .index("tags", IndexKind::Prefix)
    }

    #[test]
    fn valid_schema_passes() {
        assert!(file_schema().validate().is_ok());
    }

    #[test]
    fn empty_schema_is_rejected() {
        assert!(Schema::new("empty").validate().is_err());
    }

    #[test]
    fn duplicate_column_is_rejected() {
        let schema = Schema::new("s")
            .column("a", FieldType::Str)
            .column("a", FieldType::Int);
        assert!(schema.validate().is_err());
    }

    #[test]
    fn index_on_unknown_column_is_rejected() {
        let schema = Schema::new("s")
            .column("a", FieldType::Str)
            .index("b", IndexKind::Fullmatch);
        assert!(schema.validate().is_err());
    }

    #[test]
    fn duplicate_index_kind_per_column_is_rejected() {
        let schema = Schema::new("s")
            .column("a", FieldType::Str)
            .index("a", IndexKind::Fullmatch)
            .index("a", IndexKind::Fullmatch);
        assert!(schema.validate().is_err());
    }

    #[test]
    fn prefix_index_requires_sequence_column() {
        let schema = Schema::new("s")
            .column("n", FieldType::UInt)
            .index("n", IndexKind::Prefix);
        assert!(schema.validate().is_err());
    }

    #[test]
    fn json_round_trip_preserves_schema() {
        let schema = file_schema();
        let json = schema.to_json().unwrap();
        assert_eq!(Schema::from_json(&json).unwrap(), schema);
    }
}
