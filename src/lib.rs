//! Recompose: composable regular-expression rules.
//!
//! Independently compiled rules are combined with algebraic operators into
//! new rules that answer the same queries as a single expression.
//!
//! # Architecture
//!
//! Everything is a [`Rule`] implementing the [`Pattern`] capability: scan a
//! region of a text and produce non-overlapping matches, left to right.
//! Composite rules own no matching logic of their own beyond a merge
//! strategy over their children's streams:
//!
//! - union (`|`) merges streams without overlap, earlier children first;
//! - conjunction (`&`) requires every child to match and reports the first
//!   match of each as one result;
//! - sequence (`+`) reports children seen in declared order;
//! - split (`/`) matches inside the segments between delimiter matches;
//! - exclusion (`^`) suppresses all results where a deny rule matches;
//! - masking ([`Rule::mask`]) hides spans behind a placeholder character
//!   while keeping every offset intact.
//!
//! Results are [`Match`] values bound to the original text, whatever masking
//! happened during matching.
//!
//! # Example
//!
//! ```no_run
//! use recompose::{Rule, Spans};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let amount = Rule::new(r"(?P<amount>\d+\.\d\d)")?;
//! let total = Rule::new(r"(?i)total")?;
//!
//! // "total" followed by an amount, ignoring lines marked VOID.
//! let rule = (total + amount) ^ Rule::new("VOID")?;
//!
//! let text = "Total due: 42.50";
//! let m = rule.search(text).expect("match");
//! assert_eq!(m.as_str(), "Total due: 42.50");
//! assert_eq!(m.group("amount")?, Some("42.50"));
//! assert_eq!(m.span(0)?, Some((0, 16)));
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod combinators;
pub mod config;
pub mod flags;
pub mod mask;
pub mod matches;
pub mod rule;

// Re-exports
pub use config::{load_from_path, load_from_str, BuildError, ConfigError, RuleConfig, RuleSet};
pub use flags::Flags;
pub use mask::{Masker, DEFAULT_PLACEHOLDER};
pub use matches::{GroupKey, Hit, Match, MatchError, Span, Spans};
pub use rule::{
    compile, compile_split, CompositeRule, Haystack, HitStream, IntoRule, Matches, Mode, Pattern,
    RegexRule, Region, Rule, RuleError,
};
