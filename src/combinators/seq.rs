use crate::combinators::any::UnionMerge;
use crate::matches::Hit;
use crate::rule::{Haystack, Region, Rule};
use std::mem;
use tracing::trace;

/// Sequence: children observed through the union merge in declared order.
///
/// The stream waits for child 0, then child 1, and so on; completing the
/// sequence emits the collected hits and starts over. Matches from children
/// later than the expected one are ignored. A match from an earlier child
/// abandons the pending attempt; if it comes from child 0 it opens a new
/// attempt. An unfinished attempt at the end of the scan is dropped.
pub struct SequenceStream<'a> {
    merge: UnionMerge<'a>,
    len: usize,
    expected: usize,
    pending: Vec<Hit>,
}

impl<'a> SequenceStream<'a> {
    pub fn new(children: &'a [Rule], haystack: Haystack<'a>, region: Region) -> Self {
        Self {
            merge: UnionMerge::new(children, haystack, region),
            len: children.len(),
            expected: 0,
            pending: Vec::new(),
        }
    }
}

impl Iterator for SequenceStream<'_> {
    type Item = Vec<Hit>;

    fn next(&mut self) -> Option<Vec<Hit>> {
        loop {
            let (hits, child) = self.merge.next()?;

            if child == self.expected {
                self.pending.extend(hits);
                self.expected += 1;
                if self.expected == self.len {
                    self.expected = 0;
                    return Some(mem::take(&mut self.pending));
                }
            } else if child < self.expected {
                trace!(child, expected = self.expected, "sequence reset");
                self.pending.clear();
                if child == 0 {
                    self.pending.extend(hits);
                    self.expected = 1;
                } else {
                    self.expected = 0;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matches::hit::outer_span;

    fn sequence(patterns: &[&str], text: &str) -> Vec<(usize, usize)> {
        let children: Vec<Rule> = patterns.iter().map(|p| Rule::new(p).unwrap()).collect();
        SequenceStream::new(&children, Haystack::from(text), Region::full(text))
            .map(|hits| outer_span(&hits))
            .collect()
    }

    #[test]
    fn emits_when_order_is_respected() {
        assert_eq!(sequence(&["first", "second"], "first then second"), vec![(0, 17)]);
    }

    #[test]
    fn wrong_order_yields_nothing() {
        assert!(sequence(&["first", "second"], "second then first").is_empty());
    }

    #[test]
    fn repeats_after_completion() {
        assert_eq!(sequence(&["a", "b"], "ab ab a"), vec![(0, 2), (3, 5)]);
    }

    #[test]
    fn later_children_are_ignored_while_waiting() {
        assert_eq!(sequence(&["a", "b", "c"], "a c b c"), vec![(0, 7)]);
    }

    #[test]
    fn repeated_first_child_restarts_the_attempt() {
        assert_eq!(sequence(&["x", "y"], "x x y"), vec![(2, 5)]);
    }

    #[test]
    fn earlier_middle_child_discards_progress() {
        // a, b, then b again while waiting for c: back to waiting for a.
        assert_eq!(sequence(&["a", "b", "c"], "a b b c a b c"), vec![(8, 13)]);
    }

    #[test]
    fn same_rule_twice_pairs_consecutive_matches() {
        assert_eq!(sequence(&["a", "a"], "aaaa"), vec![(0, 2), (2, 4)]);
    }
}
