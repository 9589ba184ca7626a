use crate::matches::errors::MatchError;
use std::fmt;
use std::sync::Arc;

/// Byte range `(start, end)` into the scanned text.
pub type Span = (usize, usize);

/// Capture-group names indexed by group number (index 0 is the whole match
/// and is always unnamed).
pub type GroupNames = Arc<[Option<String>]>;

/// Address of a capture group: by number (0 = whole match) or by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey<'a> {
    Index(usize),
    Name(&'a str),
}

impl From<usize> for GroupKey<'_> {
    fn from(index: usize) -> Self {
        GroupKey::Index(index)
    }
}

// Untyped integer literals default to i32, so `m.span(1)` lands here.
// Negative indices never name a group.
impl From<i32> for GroupKey<'_> {
    fn from(index: i32) -> Self {
        GroupKey::Index(usize::try_from(index).unwrap_or(usize::MAX))
    }
}

impl<'a> From<&'a str> for GroupKey<'a> {
    fn from(name: &'a str) -> Self {
        GroupKey::Name(name)
    }
}

impl<'a> From<&'a String> for GroupKey<'a> {
    fn from(name: &'a String) -> Self {
        GroupKey::Name(name)
    }
}

impl fmt::Display for GroupKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Index(index) => write!(f, "{index}"),
            GroupKey::Name(name) => write!(f, "{name:?}"),
        }
    }
}

/// Span queries shared by single hits and composite matches.
///
/// `Ok(None)` means the group exists but did not take part in the match;
/// `Err(MatchError::GroupNotFound)` means no such group exists at all.
pub trait Spans {
    fn span<'k>(&self, key: impl Into<GroupKey<'k>>) -> Result<Option<Span>, MatchError>;

    /// Number of capture groups, not counting group 0.
    fn group_count(&self) -> usize;

    fn start<'k>(&self, key: impl Into<GroupKey<'k>>) -> Result<Option<usize>, MatchError> {
        Ok(self.span(key)?.map(|(start, _)| start))
    }

    fn end<'k>(&self, key: impl Into<GroupKey<'k>>) -> Result<Option<usize>, MatchError> {
        Ok(self.span(key)?.map(|(_, end)| end))
    }
}

/// One primitive match inside a composite result.
///
/// Spans are stored relative to wherever the producing pattern ran; `offset`
/// is added to every reported position, which lets a pattern that matched a
/// sub-slice report absolute positions without rewriting its spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    whole: Span,
    groups: Vec<Option<Span>>,
    names: GroupNames,
    offset: usize,
}

impl Hit {
    /// Create a hit from the whole-match span, the spans of groups `1..`,
    /// and the group-name table of the expression that produced it.
    pub fn new(whole: Span, groups: Vec<Option<Span>>, names: GroupNames) -> Self {
        Self {
            whole,
            groups,
            names,
            offset: 0,
        }
    }

    /// A hit with no capture groups.
    pub fn whole(start: usize, end: usize) -> Self {
        Self::new((start, end), Vec::new(), Arc::from(vec![None]))
    }

    /// Shift every position reported by this hit by `offset` bytes.
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset += offset;
        self
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Whole-match span, offset applied.
    pub fn range(&self) -> Span {
        self.shift(self.whole)
    }

    pub fn group_names(&self) -> &GroupNames {
        &self.names
    }

    /// The same hit with every span in absolute positions, widened to char
    /// boundaries of `text`.
    pub(crate) fn snapped(self, text: &str) -> Self {
        let whole = snap_to_chars(text, self.range());
        let groups = self
            .groups
            .iter()
            .map(|span| span.map(|span| snap_to_chars(text, self.shift(span))))
            .collect();
        Self {
            whole,
            groups,
            names: self.names,
            offset: 0,
        }
    }

    fn shift(&self, (start, end): Span) -> Span {
        (start + self.offset, end + self.offset)
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.names
            .iter()
            .position(|candidate| candidate.as_deref() == Some(name))
            .filter(|&index| index <= self.groups.len())
    }
}

impl Spans for Hit {
    fn span<'k>(&self, key: impl Into<GroupKey<'k>>) -> Result<Option<Span>, MatchError> {
        let key = key.into();
        let index = match key {
            GroupKey::Index(index) => index,
            GroupKey::Name(name) => self
                .index_of(name)
                .ok_or_else(|| MatchError::GroupNotFound(key.to_string()))?,
        };

        if index == 0 {
            return Ok(Some(self.range()));
        }
        match self.groups.get(index - 1) {
            Some(span) => Ok(span.map(|span| self.shift(span))),
            None => Err(MatchError::GroupNotFound(key.to_string())),
        }
    }

    fn group_count(&self) -> usize {
        self.groups.len()
    }
}

/// Overall span of a hit list: first hit's start to last hit's end.
pub(crate) fn outer_span(hits: &[Hit]) -> Span {
    match (hits.first(), hits.last()) {
        (Some(first), Some(last)) => (first.range().0, last.range().1),
        _ => (0, 0),
    }
}

/// Widen a byte span so both ends sit on char boundaries of `text`.
///
/// Masking replaces multi-byte characters byte-for-byte with an ASCII
/// placeholder, so a rule running on masked text can report a span that
/// starts or ends inside a character of the original.
pub(crate) fn snap_to_chars(text: &str, (start, end): Span) -> Span {
    let mut start = start.min(text.len());
    let mut end = end.clamp(start, text.len());
    while !text.is_char_boundary(start) {
        start -= 1;
    }
    while !text.is_char_boundary(end) {
        end += 1;
    }
    (start, end)
}
