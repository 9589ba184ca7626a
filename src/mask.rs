//! Position-preserving masking.
//!
//! A [`Masker`] overwrites every span its rule matches with a placeholder
//! character. The result has exactly the byte length of the input, so a rule
//! that runs on masked text reports spans that are valid in the original.

use crate::matches::hit::{outer_span, snap_to_chars};
use crate::rule::{Haystack, Pattern, Region, Rule, RuleError};
use std::fmt;

/// Placeholder used when none is given. `.` matches any character in most
/// expressions, so masked spans stay invisible to wildcard rules.
pub const DEFAULT_PLACEHOLDER: char = '.';

#[derive(Debug, Clone)]
pub struct Masker {
    rule: Rule,
    placeholder: char,
}

impl Masker {
    pub fn new(rule: Rule) -> Self {
        Self {
            rule,
            placeholder: DEFAULT_PLACEHOLDER,
        }
    }

    /// The placeholder must be ASCII: one character has to occupy exactly
    /// one byte for offsets to survive masking.
    pub fn with_placeholder(rule: Rule, placeholder: char) -> Result<Self, RuleError> {
        if !placeholder.is_ascii() {
            return Err(RuleError::InvalidPlaceholder(placeholder));
        }
        Ok(Self { rule, placeholder })
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn placeholder(&self) -> char {
        self.placeholder
    }

    /// Replace every byte matched by the rule inside `[pos, endpos)` with the
    /// placeholder. Text outside the region is copied unchanged.
    pub fn mask(&self, text: &str, pos: usize, endpos: usize) -> String {
        self.mask_region(text, Region::within(text, pos, endpos))
    }

    pub(crate) fn mask_region(&self, text: &str, region: Region) -> String {
        let mut masked = String::with_capacity(text.len());
        let mut copied = 0;

        for hits in self.rule.hits(Haystack::Borrowed(text), region) {
            // Masked multi-byte characters are replaced whole.
            let (start, end) = snap_to_chars(text, outer_span(&hits));
            let start = start.max(copied);
            if end <= start {
                continue;
            }
            masked.push_str(&text[copied..start]);
            masked.extend(std::iter::repeat(self.placeholder).take(end - start));
            copied = end;
        }

        masked.push_str(&text[copied..]);
        masked
    }
}

impl fmt::Display for Masker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} as {:?}", self.rule, self.placeholder)
    }
}
