use crate::matches::errors::MatchError;
use crate::matches::hit::{outer_span, GroupKey, Hit, Span, Spans};
use crate::rule::Rule;
use std::fmt;

/// A match produced by a [`Rule`], bound to the text it was found in.
///
/// The match aggregates one [`Hit`] per primitive match that took part,
/// sorted by start offset. Whatever masking the rule applied while matching,
/// every text accessor slices the original text.
#[derive(Clone)]
pub struct Match<'t> {
    hits: Vec<Hit>,
    rule: &'t Rule,
    text: &'t str,
}

impl<'t> Match<'t> {
    /// Spans reported against masked text may end inside a multi-byte
    /// character of `text`; every hit is snapped to whole characters here so
    /// all span queries agree with the slices they describe.
    pub(crate) fn new(hits: Vec<Hit>, rule: &'t Rule, text: &'t str) -> Self {
        debug_assert!(!hits.is_empty(), "a match needs at least one hit");
        let hits = hits.into_iter().map(|hit| hit.snapped(text)).collect();
        Self { hits, rule, text }
    }

    /// Constituent hits, sorted by start offset.
    pub fn hits(&self) -> &[Hit] {
        &self.hits
    }

    /// The rule that produced this match.
    pub fn rule(&self) -> &'t Rule {
        self.rule
    }

    /// The original text the match is bound to.
    pub fn text(&self) -> &'t str {
        self.text
    }

    /// Overall span: first hit's start to last hit's end.
    pub fn range(&self) -> Span {
        outer_span(&self.hits)
    }

    /// The matched slice of the original text.
    pub fn as_str(&self) -> &'t str {
        self.slice(self.range())
    }

    /// Text of a group, sliced from the original text by `span(key)`.
    pub fn group<'k>(&self, key: impl Into<GroupKey<'k>>) -> Result<Option<&'t str>, MatchError> {
        Ok(self.span(key)?.map(|span| self.slice(span)))
    }

    /// Every capture group of every hit, numbered as [`Spans::span`] numbers
    /// them.
    pub fn groups(&self) -> Vec<Option<&'t str>> {
        self.hits
            .iter()
            .flat_map(|hit| {
                (1..=hit.group_count()).map(move |index| {
                    hit.span(index)
                        .ok()
                        .flatten()
                        .map(|span| self.slice(span))
                })
            })
            .collect()
    }

    fn slice(&self, (start, end): Span) -> &'t str {
        &self.text[start..end]
    }
}

impl Spans for Match<'_> {
    fn span<'k>(&self, key: impl Into<GroupKey<'k>>) -> Result<Option<Span>, MatchError> {
        let key = key.into();
        match key {
            GroupKey::Index(0) => Ok(Some(self.range())),
            GroupKey::Name(name) => self
                .hits
                .iter()
                .find_map(|hit| hit.span(name).ok())
                .ok_or_else(|| MatchError::GroupNotFound(key.to_string())),
            GroupKey::Index(mut index) => {
                // Each hit owns a contiguous block of group numbers.
                for hit in &self.hits {
                    let count = hit.group_count();
                    if index <= count {
                        return hit.span(index);
                    }
                    index -= count;
                }
                Err(MatchError::GroupNotFound(key.to_string()))
            }
        }
    }

    fn group_count(&self) -> usize {
        self.hits.iter().map(Spans::group_count).sum()
    }
}

impl PartialEq for Match<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.range() == other.range() && self.text == other.text
    }
}

impl fmt::Debug for Match<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Match")
            .field("rule", &format_args!("{}", self.rule))
            .field("span", &self.range())
            .field("match", &self.as_str())
            .field("hits", &self.hits.len())
            .finish()
    }
}

impl fmt::Display for Match<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
