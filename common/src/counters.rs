use std::collections::HashMap;

use crate::DocId;

/// Sparse map from document id to occurrence count.
///
/// A count of zero means "absent": it is never yielded by [`Counters::iter`]
/// and does not take part in equality. Setting a key back to zero is how
/// ranking retires an entry without removing it.
///
/// Iteration order is whatever the underlying hash map yields and must not
/// be relied on.
#[derive(Debug, Clone, Default)]
pub struct Counters {
    counts: HashMap<DocId, u32>,
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count for `doc_id`, or 0 when it was never seen.
    pub fn get(&self, doc_id: DocId) -> u32 {
        self.counts.get(&doc_id).copied().unwrap_or(0)
    }

    pub fn set(&mut self, doc_id: DocId, count: u32) {
        self.counts.insert(doc_id, count);
    }

    /// Bump the count for `doc_id` and return the new value.
    pub fn increment(&mut self, doc_id: DocId) -> u32 {
        let slot = self.counts.entry(doc_id).or_insert(0);
        *slot = slot.saturating_add(1);
        *slot
    }

    /// Entries with a non-zero count, in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (DocId, u32)> + '_ {
        self.counts.iter().filter(|(_, count)| **count > 0).map(|(doc_id, count)| (*doc_id, *count))
    }

    pub fn for_each<F: FnMut(DocId, u32)>(&self, mut visit: F) {
        for (doc_id, count) in self.iter() {
            visit(doc_id, count);
        }
    }

    /// Number of documents with a non-zero count.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Documents present in both operands, each with the smaller of its two counts.
    pub fn intersect(&self, other: &Counters) -> Counters {
        let mut acc = Intersection { left: self, out: Counters::new() };
        other.for_each(|doc_id, count| acc.visit(doc_id, count));
        acc.out
    }

    /// Documents present in either operand, with the two counts summed.
    /// Sums clamp at `u32::MAX`.
    pub fn union(&self, other: &Counters) -> Counters {
        let mut out = self.clone();
        other.for_each(|doc_id, count| {
            let sum = out.get(doc_id).saturating_add(count);
            out.set(doc_id, sum);
        });
        out
    }
}

/// Accumulator threaded through one traversal while intersecting.
struct Intersection<'a> {
    left: &'a Counters,
    out: Counters,
}

impl Intersection<'_> {
    fn visit(&mut self, doc_id: DocId, count: u32) {
        let left = self.left.get(doc_id);
        if left > 0 {
            self.out.set(doc_id, left.min(count));
        }
    }
}

impl PartialEq for Counters {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(doc_id, count)| other.get(doc_id) == count)
    }
}

impl Eq for Counters {}

impl FromIterator<(DocId, u32)> for Counters {
    fn from_iter<I: IntoIterator<Item = (DocId, u32)>>(iter: I) -> Self {
        let mut counters = Counters::new();
        for (doc_id, count) in iter {
            counters.set(doc_id, count);
        }
        counters
    }
}
