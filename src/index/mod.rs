pub mod hash;
pub mod primary;
pub mod registry;
pub mod trie;

pub use hash::FullmatchIndex;
pub use primary::PrimaryIndex;
pub use registry::IndexRegistry;
pub use trie::PrefixIndex;

use crate::core::error::Result;
use crate::core::ids::IdSet;
use crate::core::types::{RecordId, Value};
use crate::query::ast::MatchKind;
use crate::schema::schema::IndexKind;

/// One secondary index over a single column.
///
/// Implementations are registered in the [`IndexRegistry`] as trait
/// objects and kept in lock-step with the row store by the collection.
pub trait ColumnIndex {
    /// Declared kind of this index.
    fn kind(&self) -> IndexKind;

    /// Whether this index can answer a query atom of the given match kind.
    ///
    /// A trie in ignore-children mode answers fullmatch atoms, not prefix
    /// atoms, even though its declared kind is `Prefix`.
    fn serves(&self, kind: MatchKind) -> bool;

    fn add(&mut self, value: &Value, id: RecordId) -> Result<()>;

    fn remove(&mut self, value: &Value, id: RecordId) -> Result<()>;

    /// Ids matching `value` under this index's match semantics.
    fn lookup(&self, value: &Value) -> Result<IdSet>;

    /// Total number of (value, id) entries, for stats.
    fn entries(&self) -> usize;

    /// True once every inserted value has been removed again and the
    /// structure is back to its initial empty state.
    fn is_structurally_empty(&self) -> bool;
}
