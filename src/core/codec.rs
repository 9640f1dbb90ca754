use crate::core::error::{Error, Result};
use crate::core::types::{FieldType, Value};

/// Converts between schema-declared field types and stored column values.
///
/// Stored values share the runtime representation of typed values, so
/// encoding is validation plus canonicalization: the value's variant must
/// match the declared column type, recursively for arrays. No side effects.
pub struct FieldCodec;

impl FieldCodec {
    /// Validate `value` against the declared `ty` and return the stored value.
    pub fn encode(column: &str, value: Value, ty: &FieldType) -> Result<Value> {
        Self::check(column, &value, ty)?;
        Ok(value)
    }

    /// Re-check a stored value against the declared `ty` on the way out.
    pub fn decode(column: &str, stored: &Value, ty: &FieldType) -> Result<Value> {
        Self::check(column, stored, ty)?;
        Ok(stored.clone())
    }

    /// Check that a value's runtime variant matches the declared type.
    pub fn check(column: &str, value: &Value, ty: &FieldType) -> Result<()> {
        let ok = match (ty, value) {
            (FieldType::Str, Value::Str(_)) => true,
            (FieldType::Bool, Value::Bool(_)) => true,
            (FieldType::Int, Value::Int(_)) => true,
            (FieldType::UInt, Value::UInt(_)) => true,
            (FieldType::Float, Value::Float(_)) => true,
            (FieldType::Timestamp, Value::Timestamp(_)) => true,
            (FieldType::Array(elem), Value::Array(items)) => {
                for item in items {
                    Self::check(column, item, elem)?;
                }
                true
            }
            _ => false,
        };

        if ok {
            Ok(())
        } else {
            Err(Error::TypeMismatch {
                column: column.to_string(),
                expected: ty.to_string(),
                actual: value.type_name().to_string(),
            })
        }
    }
}
