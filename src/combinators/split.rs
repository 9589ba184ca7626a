use crate::combinators::any::UnionMerge;
use crate::matches::hit::outer_span;
use crate::rule::{Haystack, HitStream, Pattern, Region, Rule};

/// Split: run `content` inside every non-empty segment of the region left
/// between matches of `delimiters` (merged as a union when there are
/// several).
///
/// Segments are sub-ranges of the same text, so the content rule's offsets
/// are already absolute. A region with no delimiter match is one segment.
pub fn segments<'a>(
    content: &'a Rule,
    delimiters: &'a [Rule],
    haystack: Haystack<'a>,
    region: Region,
) -> HitStream<'a> {
    let bounds = {
        let haystack = haystack.clone();
        std::iter::once_with(move || segment_regions(delimiters, haystack, region))
    };
    Box::new(
        bounds
            .flatten()
            .flat_map(move |segment| content.hits(haystack.clone(), segment)),
    )
}

fn segment_regions(delimiters: &[Rule], haystack: Haystack<'_>, region: Region) -> Vec<Region> {
    let mut segments = Vec::new();
    let mut start = region.pos;

    for (hits, _) in UnionMerge::new(delimiters, haystack, region) {
        let (delimiter_start, delimiter_end) = outer_span(&hits);
        if delimiter_start > start {
            segments.push(Region {
                pos: start,
                endpos: delimiter_start,
            });
        }
        start = start.max(delimiter_end);
    }

    if region.endpos > start {
        segments.push(Region {
            pos: start,
            endpos: region.endpos,
        });
    }
    segments
}
