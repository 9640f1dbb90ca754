use roaring::RoaringTreemap;

use crate::core::types::RecordId;

/// A set of record ids; the unit of index lookups and query evaluation.
///
/// Backed by a compressed 64-bit roaring bitmap, so union, intersection,
/// and difference stay cheap even for large collections. No ordering
/// guarantee is part of the contract.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdSet {
    bitmap: RoaringTreemap,
}

impl IdSet {
    pub fn new() -> Self {
        IdSet {
            bitmap: RoaringTreemap::new(),
        }
    }

    pub fn insert(&mut self, id: RecordId) {
        self.bitmap.insert(id.0);
    }

    pub fn remove(&mut self, id: RecordId) {
        self.bitmap.remove(id.0);
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.bitmap.contains(id.0)
    }

    pub fn len(&self) -> u64 {
        self.bitmap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bitmap.is_empty()
    }

    /// Union `other` into `self`.
    pub fn merge(&mut self, other: &IdSet) {
        self.bitmap |= &other.bitmap;
    }

    /// Keep only ids present in both sets.
    pub fn intersect(&mut self, other: &IdSet) {
        self.bitmap &= &other.bitmap;
    }

    /// Ids in `self` that are not in `other`.
    pub fn difference(&self, other: &IdSet) -> IdSet {
        IdSet {
            bitmap: &self.bitmap - &other.bitmap,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.bitmap.iter().map(RecordId)
    }
}

impl FromIterator<RecordId> for IdSet {
    fn from_iter<I: IntoIterator<Item = RecordId>>(iter: I) -> Self {
        IdSet {
            bitmap: iter.into_iter().map(|id| id.0).collect(),
        }
    }
}

impl Extend<RecordId> for IdSet {
    fn extend<I: IntoIterator<Item = RecordId>>(&mut self, iter: I) {
        for id in iter {
            self.insert(id);
        }
    }
}
