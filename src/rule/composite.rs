use crate::combinators::{all, any::UnionMerge, seq::SequenceStream, split};
use crate::mask::{Masker, DEFAULT_PLACEHOLDER};
use crate::rule::errors::RuleError;
use crate::rule::pattern::{Haystack, HitStream, Pattern, Region};
use crate::rule::Rule;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// How a composite rule combines its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Union: every child's matches, merged without overlap.
    #[default]
    Any,
    /// Conjunction: one match made of the first match of every child.
    All,
    /// Sequence: children observed in declared order.
    Seq,
    /// Split: the first child matched inside the segments left between
    /// matches of the remaining children.
    Split,
}

impl Mode {
    /// Fewest children a rule of this mode can have.
    pub fn min_children(self) -> usize {
        match self {
            Mode::Split => 2,
            Mode::Any | Mode::All | Mode::Seq => 1,
        }
    }

    fn operator(self) -> &'static str {
        match self {
            Mode::Any => " | ",
            Mode::All => " & ",
            Mode::Seq => " + ",
            Mode::Split => " / ",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Any => "any",
            Mode::All => "all",
            Mode::Seq => "seq",
            Mode::Split => "split",
        };
        f.write_str(name)
    }
}

/// A rule built from other rules.
///
/// Immutable once built. Children are shared, so deriving a rule with a
/// different mask or deny rule only copies those two fields.
#[derive(Debug, Clone)]
pub struct CompositeRule {
    mode: Mode,
    children: Arc<[Rule]>,
    mask: Option<Masker>,
    deny: Option<Rule>,
}

impl CompositeRule {
    pub fn new(mode: Mode, children: Vec<Rule>) -> Result<Self, RuleError> {
        if children.len() < mode.min_children() {
            return Err(RuleError::EmptyComposition {
                mode,
                required: mode.min_children(),
                given: children.len(),
            });
        }
        Ok(Self::from_parts(mode, children))
    }

    /// Callers guarantee `children` satisfies `mode.min_children()`.
    pub(crate) fn from_parts(mode: Mode, children: Vec<Rule>) -> Self {
        debug_assert!(children.len() >= mode.min_children());
        Self {
            mode,
            children: children.into(),
            mask: None,
            deny: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn children(&self) -> &[Rule] {
        &self.children
    }

    pub fn mask(&self) -> Option<&Masker> {
        self.mask.as_ref()
    }

    pub fn deny(&self) -> Option<&Rule> {
        self.deny.as_ref()
    }

    /// Copy of this rule that also yields nothing wherever `rule` matches.
    pub fn with_deny(&self, rule: Rule) -> Self {
        let deny = match &self.deny {
            Some(existing) => Rule::from(Self::from_parts(
                Mode::Any,
                vec![existing.clone(), rule],
            )),
            None => rule,
        };
        Self {
            deny: Some(deny),
            ..self.clone()
        }
    }

    /// Copy of this rule that also hides `rule`'s matches from its children.
    ///
    /// Without an explicit placeholder the current one (or `.`) is kept.
    pub fn with_mask(&self, rule: Rule, placeholder: Option<char>) -> Result<Self, RuleError> {
        let (rule, current) = match &self.mask {
            Some(existing) => (
                Rule::from(Self::from_parts(
                    Mode::Any,
                    vec![existing.rule().clone(), rule],
                )),
                existing.placeholder(),
            ),
            None => (rule, DEFAULT_PLACEHOLDER),
        };
        let masker = Masker::with_placeholder(rule, placeholder.unwrap_or(current))?;
        Ok(Self {
            mask: Some(masker),
            ..self.clone()
        })
    }

    fn denied(&self, haystack: &Haystack<'_>, region: Region) -> bool {
        let Some(deny) = &self.deny else {
            return false;
        };
        let denied = deny.hits(haystack.clone(), region).next().is_some();
        if denied {
            debug!(rule = %self, "deny rule matched, suppressing all matches");
        }
        denied
    }
}

impl Pattern for CompositeRule {
    fn hits<'a>(&'a self, haystack: Haystack<'a>, region: Region) -> HitStream<'a> {
        let haystack = match &self.mask {
            Some(masker) => Haystack::from(masker.mask_region(&haystack, region)),
            None => haystack,
        };

        if self.denied(&haystack, region) {
            return Box::new(std::iter::empty());
        }

        match self.mode {
            Mode::Any => {
                Box::new(UnionMerge::new(&self.children, haystack, region).map(|(hits, _)| hits))
            }
            Mode::All => all::first_of_each(&self.children, haystack, region),
            Mode::Seq => Box::new(SequenceStream::new(&self.children, haystack, region)),
            Mode::Split => match self.children.split_first() {
                Some((content, delimiters)) => {
                    split::segments(content, delimiters, haystack, region)
                }
                None => Box::new(std::iter::empty()),
            },
        }
    }
}

impl fmt::Display for CompositeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (index, child) in self.children.iter().enumerate() {
            if index > 0 {
                f.write_str(self.mode.operator())?;
            }
            write!(f, "{child}")?;
        }
        if self.children.len() == 1 {
            write!(f, " as {}", self.mode)?;
        }
        f.write_str(")")?;
        if let Some(deny) = &self.deny {
            write!(f, " ^ {deny}")?;
        }
        if let Some(mask) = &self.mask {
            write!(f, " @ {mask}")?;
        }
        Ok(())
    }
}
