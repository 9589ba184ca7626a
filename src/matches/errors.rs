use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("no such group: {0}")]
    GroupNotFound(String),
}
