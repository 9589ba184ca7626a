use crate::cache;
use crate::flags::Flags;
use crate::matches::{GroupNames, Hit, Span};
use crate::rule::errors::RuleError;
use crate::rule::pattern::{Haystack, HitStream, Pattern, Region};
use regex::Regex;
use std::sync::Arc;

/// Leaf rule: a compiled regular expression adapted to [`Pattern`].
#[derive(Debug, Clone)]
pub struct RegexRule {
    regex: Arc<Regex>,
    names: GroupNames,
    flags: Flags,
}

impl RegexRule {
    pub fn new(pattern: &str) -> Result<Self, RuleError> {
        Self::with_flags(pattern, Flags::empty())
    }

    /// Compile `pattern` with `flags`, reusing the thread's compile cache.
    pub fn with_flags(pattern: &str, flags: Flags) -> Result<Self, RuleError> {
        let regex =
            cache::get_or_compile(pattern, flags).map_err(|source| RuleError::InvalidRule {
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(Self::from_shared(regex, flags))
    }

    /// Adopt an expression compiled elsewhere.
    pub fn from_regex(regex: Regex) -> Self {
        Self::from_shared(Arc::new(regex), Flags::empty())
    }

    fn from_shared(regex: Arc<Regex>, flags: Flags) -> Self {
        let names = regex
            .capture_names()
            .map(|name| name.map(str::to_string))
            .collect();
        Self {
            regex,
            names,
            flags,
        }
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }
}

impl Pattern for RegexRule {
    fn hits<'a>(&'a self, haystack: Haystack<'a>, region: Region) -> HitStream<'a> {
        Box::new(Captures {
            rule: self,
            haystack,
            at: region.pos,
            endpos: region.endpos,
            last_end: None,
        })
    }
}

/// Successive non-overlapping captures in `[at, endpos)`.
///
/// An empty match directly after the previous match is skipped by stepping
/// one character forward, so the scan always makes progress.
struct Captures<'a> {
    rule: &'a RegexRule,
    haystack: Haystack<'a>,
    at: usize,
    endpos: usize,
    last_end: Option<usize>,
}

impl Captures<'_> {
    fn capture(&self) -> Option<(Span, Vec<Option<Span>>)> {
        let text = &self.haystack[..self.endpos];
        let caps = self.rule.regex.captures_at(text, self.at)?;
        let whole = caps.get(0)?;
        let groups = (1..caps.len())
            .map(|index| caps.get(index).map(|m| (m.start(), m.end())))
            .collect();
        Some(((whole.start(), whole.end()), groups))
    }

    fn step_past(&mut self, index: usize) {
        let width = self.haystack[index..self.endpos]
            .chars()
            .next()
            .map_or(1, char::len_utf8);
        self.at = index + width;
    }
}

impl Iterator for Captures<'_> {
    type Item = Vec<Hit>;

    fn next(&mut self) -> Option<Vec<Hit>> {
        loop {
            if self.at > self.endpos {
                return None;
            }
            let Some(((start, end), groups)) = self.capture() else {
                self.at = self.endpos + 1;
                return None;
            };

            if start == end && self.last_end == Some(end) {
                self.step_past(end);
                continue;
            }

            self.at = end;
            self.last_end = Some(end);
            let hit = Hit::new((start, end), groups, Arc::clone(&self.rule.names));
            return Some(vec![hit]);
        }
    }
}
