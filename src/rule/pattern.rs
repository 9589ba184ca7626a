use crate::matches::Hit;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Lazy stream of matches. Each item is the hit list of one match, sorted
/// by start offset and never empty.
pub type HitStream<'a> = Box<dyn Iterator<Item = Vec<Hit>> + 'a>;

/// The capability every rule provides: scan a region of a haystack and
/// produce its non-overlapping matches, left to right.
///
/// Each call starts a fresh scan; no state survives between calls.
/// Implement this for custom matchers and wrap them with
/// [`Rule::custom`](crate::Rule::custom) to compose them with regex rules.
pub trait Pattern: fmt::Debug + Send + Sync {
    fn hits<'a>(&'a self, haystack: Haystack<'a>, region: Region) -> HitStream<'a>;
}

/// Text handed to a [`Pattern`].
///
/// Composite rules scan a masked copy of the caller's text; sharing it by
/// reference count lets every inner stream hold on to it for as long as the
/// outer iterator lives.
#[derive(Debug, Clone)]
pub enum Haystack<'t> {
    Borrowed(&'t str),
    Shared(Arc<str>),
}

impl Deref for Haystack<'_> {
    type Target = str;

    fn deref(&self) -> &str {
        match self {
            Haystack::Borrowed(text) => text,
            Haystack::Shared(text) => text,
        }
    }
}

impl<'t> From<&'t str> for Haystack<'t> {
    fn from(text: &'t str) -> Self {
        Haystack::Borrowed(text)
    }
}

impl From<String> for Haystack<'_> {
    fn from(text: String) -> Self {
        Haystack::Shared(Arc::from(text))
    }
}

/// Byte range `[pos, endpos)` being scanned.
///
/// Matching behaves as if the text ended at `endpos`; text before `pos` is
/// still visible to look-around assertions such as `\b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub pos: usize,
    pub endpos: usize,
}

impl Region {
    /// Clamp `[pos, endpos)` to `text` and snap both ends down to char
    /// boundaries.
    pub fn within(text: &str, pos: usize, endpos: usize) -> Self {
        let endpos = floor_char_boundary(text, endpos.min(text.len()));
        let pos = floor_char_boundary(text, pos.min(endpos));
        Self { pos, endpos }
    }

    /// The whole of `text`.
    pub fn full(text: &str) -> Self {
        Self {
            pos: 0,
            endpos: text.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.endpos
    }
}

fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}
