//! Rules: the things that find matches.
//!
//! A [`Rule`] is either a compiled regular expression, a composite built with
//! the composition operators, or any custom [`Pattern`]. All three answer the
//! same queries ([`Rule::find_iter`], [`Rule::search`], [`Rule::findall`]),
//! so composites nest freely.

pub mod composite;
pub mod errors;
pub mod ops;
pub mod pattern;
pub mod primitive;

pub use composite::{CompositeRule, Mode};
pub use errors::RuleError;
pub use ops::IntoRule;
pub use pattern::{Haystack, HitStream, Pattern, Region};
pub use primitive::RegexRule;

use crate::flags::Flags;
use crate::matches::Match;
use std::fmt;
use std::sync::Arc;

/// Handle to a rule. Cloning is cheap; the rule itself is never mutated.
#[derive(Clone)]
pub enum Rule {
    Regex(Arc<RegexRule>),
    Composite(Arc<CompositeRule>),
    Custom(Arc<dyn Pattern>),
}

impl Rule {
    /// Compile a regular expression into a leaf rule.
    pub fn new(pattern: &str) -> Result<Self, RuleError> {
        Ok(Rule::from(RegexRule::new(pattern)?))
    }

    pub fn with_flags(pattern: &str, flags: Flags) -> Result<Self, RuleError> {
        Ok(Rule::from(RegexRule::with_flags(pattern, flags)?))
    }

    /// Wrap a user-defined matcher so it composes like any other rule.
    pub fn custom(pattern: impl Pattern + 'static) -> Self {
        Rule::Custom(Arc::new(pattern))
    }

    pub fn as_composite(&self) -> Option<&CompositeRule> {
        match self {
            Rule::Composite(rule) => Some(rule),
            _ => None,
        }
    }

    /// Iterate over matches in the whole of `text`.
    pub fn find_iter<'t>(&'t self, text: &'t str) -> Matches<'t> {
        self.find_iter_at(text, 0, text.len())
    }

    /// Iterate over matches in `text[pos..endpos]`. Offsets are absolute.
    pub fn find_iter_at<'t>(&'t self, text: &'t str, pos: usize, endpos: usize) -> Matches<'t> {
        let region = Region::within(text, pos, endpos);
        Matches {
            stream: self.hits(Haystack::Borrowed(text), region),
            rule: self,
            text,
        }
    }

    pub fn search<'t>(&'t self, text: &'t str) -> Option<Match<'t>> {
        self.find_iter(text).next()
    }

    pub fn search_at<'t>(&'t self, text: &'t str, pos: usize, endpos: usize) -> Option<Match<'t>> {
        self.find_iter_at(text, pos, endpos).next()
    }

    /// Matched text of every match.
    pub fn findall<'t>(&'t self, text: &'t str) -> Vec<&'t str> {
        self.find_iter(text).map(|m| m.as_str()).collect()
    }

    pub fn findall_at<'t>(&'t self, text: &'t str, pos: usize, endpos: usize) -> Vec<&'t str> {
        self.find_iter_at(text, pos, endpos)
            .map(|m| m.as_str())
            .collect()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.search(text).is_some()
    }

    pub fn count(&self, text: &str) -> usize {
        self.find_iter(text).count()
    }

    /// Replace the span of every match with `replacement`.
    ///
    /// Matches that start inside an already replaced span are left alone.
    pub fn replace_all(&self, text: &str, replacement: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut copied = 0;
        for m in self.find_iter(text) {
            let (start, end) = m.range();
            if start < copied {
                continue;
            }
            out.push_str(&text[copied..start]);
            out.push_str(replacement);
            copied = end;
        }
        out.push_str(&text[copied..]);
        out
    }

    /// Text between matches, including leading and trailing pieces.
    pub fn split<'t>(&'t self, text: &'t str) -> Vec<&'t str> {
        let mut pieces = Vec::new();
        let mut last = 0;
        for m in self.find_iter(text) {
            let (start, end) = m.range();
            if start < last {
                continue;
            }
            pieces.push(&text[last..start]);
            last = end;
        }
        pieces.push(&text[last..]);
        pieces
    }
}

impl Pattern for Rule {
    fn hits<'a>(&'a self, haystack: Haystack<'a>, region: Region) -> HitStream<'a> {
        match self {
            Rule::Regex(rule) => rule.hits(haystack, region),
            Rule::Composite(rule) => rule.hits(haystack, region),
            Rule::Custom(rule) => rule.hits(haystack, region),
        }
    }
}

impl From<RegexRule> for Rule {
    fn from(rule: RegexRule) -> Self {
        Rule::Regex(Arc::new(rule))
    }
}

impl From<CompositeRule> for Rule {
    fn from(rule: CompositeRule) -> Self {
        Rule::Composite(Arc::new(rule))
    }
}

impl From<regex::Regex> for Rule {
    fn from(regex: regex::Regex) -> Self {
        Rule::from(RegexRule::from_regex(regex))
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Regex(rule) => write!(f, "/{}/", rule.as_str()),
            Rule::Composite(rule) => write!(f, "{rule}"),
            Rule::Custom(rule) => write!(f, "{rule:?}"),
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rule({self})")
    }
}

/// Iterator over the matches of a rule; see [`Rule::find_iter`].
pub struct Matches<'t> {
    stream: HitStream<'t>,
    rule: &'t Rule,
    text: &'t str,
}

impl<'t> Iterator for Matches<'t> {
    type Item = Match<'t>;

    fn next(&mut self) -> Option<Match<'t>> {
        let hits = self.stream.next()?;
        Some(Match::new(hits, self.rule, self.text))
    }
}

/// Build a composite rule from several rules.
///
/// Strings are compiled with `flags`; already compiled rules are used as is.
///
/// ```no_run
/// use recompose::{compile, Flags, Mode};
///
/// # fn main() -> Result<(), recompose::RuleError> {
/// let rule = compile(["hello", "world"], Mode::All, Flags::IGNORE_CASE)?;
/// assert!(rule.is_match("World, HELLO"));
/// # Ok(())
/// # }
/// ```
pub fn compile<I>(patterns: I, mode: Mode, flags: Flags) -> Result<Rule, RuleError>
where
    I: IntoIterator,
    I::Item: IntoRule,
{
    let children = patterns
        .into_iter()
        .map(|pattern| pattern.into_rule(flags))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Rule::from(CompositeRule::new(mode, children)?))
}

/// Build a rule matching `content` inside each segment between `delimiter`
/// matches.
pub fn compile_split(
    content: impl IntoRule,
    delimiter: impl IntoRule,
    flags: Flags,
) -> Result<Rule, RuleError> {
    let children = vec![content.into_rule(flags)?, delimiter.into_rule(flags)?];
    Ok(Rule::from(CompositeRule::new(Mode::Split, children)?))
}
