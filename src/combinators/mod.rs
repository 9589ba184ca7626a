//! Merge algorithms behind the composite modes.
//!
//! Each combinator takes the children of a composite rule, the (possibly
//! masked) haystack and the region, and produces the composite's hit
//! stream. All of them are lazy: children are only scanned as far as the
//! consumer pulls.

pub mod all;
pub mod any;
pub mod seq;
pub mod split;

pub use any::{Occupied, UnionMerge};
pub use seq::SequenceStream;
