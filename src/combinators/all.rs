use crate::matches::Hit;
use crate::rule::{Haystack, HitStream, Pattern, Region, Rule};
use tracing::debug;

/// Conjunction: the first match of every child, as one composite match.
///
/// Children are scanned independently, so their first matches may overlap.
/// If any child has no match in the region the stream is empty. A single
/// composite is produced per scan.
pub fn first_of_each<'a>(
    children: &'a [Rule],
    haystack: Haystack<'a>,
    region: Region,
) -> HitStream<'a> {
    Box::new(std::iter::once_with(move || collect_first(children, &haystack, region)).flatten())
}

fn collect_first(children: &[Rule], haystack: &Haystack<'_>, region: Region) -> Option<Vec<Hit>> {
    let mut hits = Vec::with_capacity(children.len());
    for (index, child) in children.iter().enumerate() {
        match child.hits(haystack.clone(), region).next() {
            Some(first) => hits.extend(first),
            None => {
                debug!(child = index, rule = %child, "conjunction member has no match");
                return None;
            }
        }
    }
    hits.sort_by_key(|hit| hit.range().0);
    Some(hits)
}
