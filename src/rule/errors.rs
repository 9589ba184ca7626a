use crate::rule::composite::Mode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RuleError {
    #[error("invalid rule {pattern:?}: {source}")]
    InvalidRule {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("{mode} composition needs at least {required} rule(s), got {given}")]
    EmptyComposition {
        mode: Mode,
        required: usize,
        given: usize,
    },

    #[error("mask placeholder {0:?} must be a single ASCII character")]
    InvalidPlaceholder(char),
}
