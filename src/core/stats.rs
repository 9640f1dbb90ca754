use serde::{Deserialize, Serialize};

use crate::schema::schema::IndexKind;

/// Point-in-time snapshot of one collection, for monitoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionStats {
    pub name: String,
    pub record_count: usize,
    /// The id the next insert would receive.
    pub next_record_id: u64,
    pub indexes: Vec<IndexStats>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexStats {
    pub column: String,
    pub kind: IndexKind,
    /// Total (value, id) entries currently held by the index.
    pub entry_count: usize,
}
