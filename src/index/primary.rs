use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::core::ids::IdSet;
use crate::core::types::{Record, RecordId, Value};

/// The always-available table-scan index.
///
/// Stateless: every filter walks the row store. O(rows x columns) per
/// call, no auxiliary memory. Used whenever a queried column has no
/// dedicated index.
pub struct PrimaryIndex;

impl PrimaryIndex {
    /// Ids of rows matching every bound column of `pattern` by equality.
    /// `None` entries are wildcards.
    pub fn filter_exact(rows: &BTreeMap<RecordId, Record>, pattern: &[Option<Value>]) -> IdSet {
        rows.iter()
            .filter(|(_, record)| {
                pattern
                    .iter()
                    .zip(record.iter())
                    .all(|(want, have)| match want {
                        Some(value) => value == have,
                        None => true,
                    })
            })
            .map(|(&id, _)| id)
            .collect()
    }

    /// Like [`filter_exact`](Self::filter_exact), except the value bound at
    /// `prefix_column` is compared element-wise as a prefix: rune-wise for
    /// strings, element-wise for arrays, and the row's value must be at
    /// least as long as the queried value.
    pub fn filter_prefix(
        rows: &BTreeMap<RecordId, Record>,
        pattern: &[Option<Value>],
        prefix_column: usize,
    ) -> IdSet {
        rows.iter()
            .filter(|(_, record)| {
                pattern
                    .iter()
                    .zip(record.iter())
                    .enumerate()
                    .all(|(column, (want, have))| match want {
                        Some(value) if column == prefix_column => starts_with(have, value),
                        Some(value) => value == have,
                        None => true,
                    })
            })
            .map(|(&id, _)| id)
            .collect()
    }

    /// Ids of rows whose value at `column` lies within the inclusive
    /// bounds. Either bound may be absent. Rows whose value does not order
    /// against a bound (foreign variant) never match.
    pub fn filter_range(
        rows: &BTreeMap<RecordId, Record>,
        column: usize,
        lower: Option<&Value>,
        upper: Option<&Value>,
    ) -> IdSet {
        rows.iter()
            .filter(|(_, record)| {
                let value = &record[column];
                let above = lower.is_none_or(|bound| {
                    matches!(
                        value.compare(bound),
                        Some(Ordering::Greater) | Some(Ordering::Equal)
                    )
                });
                let below = upper.is_none_or(|bound| {
                    matches!(
                        value.compare(bound),
                        Some(Ordering::Less) | Some(Ordering::Equal)
                    )
                });
                above && below
            })
            .map(|(&id, _)| id)
            .collect()
    }
}

/// Element-wise prefix comparison: code points for strings, element values
/// for arrays. False for any other variant pairing.
fn starts_with(value: &Value, prefix: &Value) -> bool {
    match (value, prefix) {
        (Value::Str(v), Value::Str(p)) => {
            let mut candidate = v.chars();
            p.chars().all(|want| candidate.next() == Some(want))
        }
        (Value::Array(v), Value::Array(p)) => {
            v.len() >= p.len() && v.iter().zip(p.iter()).all(|(a, b)| a == b)
        }
        _ => false,
    }
}
