//! Composition operators.
//!
//! | operation   | operator | method                          |
//! |-------------|----------|---------------------------------|
//! | union       | `a | b`  | [`Rule::or`]                    |
//! | conjunction | `a & b`  | [`Rule::and`]                   |
//! | sequence    | `a + b`  | [`Rule::then`]                  |
//! | split       | `a / b`  | [`Rule::split_by`]              |
//! | exclusion   | `a ^ b`  | [`Rule::exclude`]               |
//! | mask        |          | [`Rule::mask`], [`Rule::mask_with`] |
//!
//! Operators take rules on both sides and cannot fail. Methods accept
//! anything implementing [`IntoRule`] (including raw expression strings) and
//! return an error when the operand does not compile. Neither form touches
//! its operands: the result is always a new rule.

use crate::flags::Flags;
use crate::rule::composite::{CompositeRule, Mode};
use crate::rule::errors::RuleError;
use crate::rule::primitive::RegexRule;
use crate::rule::Rule;
use std::ops::{Add, BitAnd, BitOr, BitXor, Div};

/// Anything that can stand where a rule is expected.
pub trait IntoRule {
    /// `flags` applies when the value still has to be compiled.
    fn into_rule(self, flags: Flags) -> Result<Rule, RuleError>;
}

impl IntoRule for Rule {
    fn into_rule(self, _flags: Flags) -> Result<Rule, RuleError> {
        Ok(self)
    }
}

impl IntoRule for &Rule {
    fn into_rule(self, _flags: Flags) -> Result<Rule, RuleError> {
        Ok(self.clone())
    }
}

impl IntoRule for RegexRule {
    fn into_rule(self, _flags: Flags) -> Result<Rule, RuleError> {
        Ok(Rule::from(self))
    }
}

impl IntoRule for CompositeRule {
    fn into_rule(self, _flags: Flags) -> Result<Rule, RuleError> {
        Ok(Rule::from(self))
    }
}

impl IntoRule for regex::Regex {
    fn into_rule(self, _flags: Flags) -> Result<Rule, RuleError> {
        Ok(Rule::from(self))
    }
}

impl IntoRule for &str {
    fn into_rule(self, flags: Flags) -> Result<Rule, RuleError> {
        Rule::with_flags(self, flags)
    }
}

impl IntoRule for String {
    fn into_rule(self, flags: Flags) -> Result<Rule, RuleError> {
        Rule::with_flags(&self, flags)
    }
}

impl IntoRule for &String {
    fn into_rule(self, flags: Flags) -> Result<Rule, RuleError> {
        Rule::with_flags(self, flags)
    }
}

impl Rule {
    fn pair(&self, mode: Mode, other: Rule) -> Rule {
        Rule::from(CompositeRule::from_parts(mode, vec![self.clone(), other]))
    }

    /// The composite to hang a mask or deny rule on. Leaves are wrapped in a
    /// single-child union, which yields exactly the leaf's matches.
    fn composite(&self) -> CompositeRule {
        match self {
            Rule::Composite(rule) => CompositeRule::clone(rule),
            _ => CompositeRule::from_parts(Mode::Any, vec![self.clone()]),
        }
    }

    pub fn or(&self, other: impl IntoRule) -> Result<Rule, RuleError> {
        Ok(self.pair(Mode::Any, other.into_rule(Flags::empty())?))
    }

    pub fn and(&self, other: impl IntoRule) -> Result<Rule, RuleError> {
        Ok(self.pair(Mode::All, other.into_rule(Flags::empty())?))
    }

    pub fn then(&self, other: impl IntoRule) -> Result<Rule, RuleError> {
        Ok(self.pair(Mode::Seq, other.into_rule(Flags::empty())?))
    }

    /// Match `self` inside the segments between `delimiter` matches.
    pub fn split_by(&self, delimiter: impl IntoRule) -> Result<Rule, RuleError> {
        Ok(self.pair(Mode::Split, delimiter.into_rule(Flags::empty())?))
    }

    /// Yield nothing at all for a region in which `deny` matches.
    pub fn exclude(&self, deny: impl IntoRule) -> Result<Rule, RuleError> {
        let deny = deny.into_rule(Flags::empty())?;
        Ok(Rule::from(self.composite().with_deny(deny)))
    }

    /// Hide `mask`'s matches behind the placeholder before matching.
    pub fn mask(&self, mask: impl IntoRule) -> Result<Rule, RuleError> {
        let mask = mask.into_rule(Flags::empty())?;
        Ok(Rule::from(self.composite().with_mask(mask, None)?))
    }

    /// Like [`Rule::mask`] with an explicit ASCII placeholder.
    pub fn mask_with(&self, mask: impl IntoRule, placeholder: char) -> Result<Rule, RuleError> {
        let mask = mask.into_rule(Flags::empty())?;
        Ok(Rule::from(self.composite().with_mask(mask, Some(placeholder))?))
    }
}

macro_rules! binary_operator {
    ($trait:ident, $method:ident, $mode:expr) => {
        impl $trait<Rule> for Rule {
            type Output = Rule;

            fn $method(self, other: Rule) -> Rule {
                self.pair($mode, other)
            }
        }

        impl $trait<&Rule> for &Rule {
            type Output = Rule;

            fn $method(self, other: &Rule) -> Rule {
                self.pair($mode, other.clone())
            }
        }
    };
}

binary_operator!(BitOr, bitor, Mode::Any);
binary_operator!(BitAnd, bitand, Mode::All);
binary_operator!(Add, add, Mode::Seq);
binary_operator!(Div, div, Mode::Split);

impl BitXor<Rule> for Rule {
    type Output = Rule;

    fn bitxor(self, deny: Rule) -> Rule {
        Rule::from(self.composite().with_deny(deny))
    }
}

impl BitXor<&Rule> for &Rule {
    type Output = Rule;

    fn bitxor(self, deny: &Rule) -> Rule {
        Rule::from(self.composite().with_deny(deny.clone()))
    }
}
