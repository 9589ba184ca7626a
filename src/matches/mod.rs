//! Match values produced by rules.
//!
//! Every rule, primitive or composite, reports its results as a [`Match`]:
//! an ordered list of [`Hit`]s (one per primitive match that took part)
//! bound to the original text. A primitive match is simply a `Match` with a
//! single hit.

pub mod compose;
pub mod errors;
pub mod hit;

pub use compose::Match;
pub use errors::MatchError;
pub use hit::{GroupKey, GroupNames, Hit, Span, Spans};
