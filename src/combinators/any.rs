use crate::matches::hit::outer_span;
use crate::matches::Hit;
use crate::rule::{Haystack, HitStream, Pattern, Region, Rule};
use std::cmp::{Ordering, Reverse};
use std::collections::{BTreeMap, BinaryHeap};
use tracing::trace;

/// Byte ranges already claimed by accepted matches during one scan.
#[derive(Debug, Default)]
pub struct Occupied {
    // start -> end, pairwise disjoint
    ranges: BTreeMap<usize, usize>,
}

impl Occupied {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any byte of `[start, end)` is claimed. An empty range at `p`
    /// conflicts with a claimed `[s, e)` when `s <= p < e`.
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        let upper = if start < end { end } else { start + 1 };
        self.ranges
            .range(..upper)
            .next_back()
            .is_some_and(|(_, &claimed_end)| claimed_end > start)
    }

    /// Claim `[start, end)`. Callers check [`Occupied::overlaps`] first.
    pub fn claim(&mut self, start: usize, end: usize) {
        if start < end {
            self.ranges.insert(start, end);
        }
    }
}

struct Candidate {
    start: usize,
    child: usize,
    hits: Vec<Hit>,
}

impl Candidate {
    fn key(&self) -> (usize, usize) {
        (self.start, self.child)
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Lazy, overlap-free merge of the match streams of several rules.
///
/// Each child contributes at most one pending candidate, kept in a min-heap
/// ordered by start offset and then by child index. A candidate claims its
/// bytes when it enters the heap; later candidates touching claimed bytes
/// are dropped and their stream advanced. Because children are seeded in
/// order, earlier children win overlaps.
///
/// Yields each accepted match together with the index of the child that
/// produced it.
pub struct UnionMerge<'a> {
    children: &'a [Rule],
    haystack: Haystack<'a>,
    region: Region,
    streams: Vec<HitStream<'a>>,
    heap: BinaryHeap<Reverse<Candidate>>,
    occupied: Occupied,
}

impl<'a> UnionMerge<'a> {
    pub fn new(children: &'a [Rule], haystack: Haystack<'a>, region: Region) -> Self {
        Self {
            children,
            haystack,
            region,
            streams: Vec::new(),
            heap: BinaryHeap::new(),
            occupied: Occupied::new(),
        }
    }

    fn seed(&mut self) {
        let haystack = &self.haystack;
        let region = self.region;
        self.streams = self
            .children
            .iter()
            .map(|child| child.hits(haystack.clone(), region))
            .collect();
        for child in 0..self.streams.len() {
            self.advance(child);
        }
    }

    /// Pull `child`'s next unclaimed match into the heap.
    fn advance(&mut self, child: usize) {
        for hits in self.streams[child].by_ref() {
            let (start, end) = outer_span(&hits);
            if self.occupied.overlaps(start, end) {
                trace!(child, start, end, "dropping overlapping candidate");
                continue;
            }
            self.occupied.claim(start, end);
            self.heap.push(Reverse(Candidate { start, child, hits }));
            return;
        }
    }
}

impl Iterator for UnionMerge<'_> {
    type Item = (Vec<Hit>, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.streams.is_empty() && !self.children.is_empty() {
            self.seed();
        }
        let Reverse(candidate) = self.heap.pop()?;
        self.advance(candidate.child);
        Some((candidate.hits, candidate.child))
    }
}
