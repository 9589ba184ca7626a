//! Rule files: named rules declared in TOML.
//!
//! ```toml
//! [[rules]]
//! name = "amount"
//! pattern = '\d+\.\d\d'
//!
//! [[rules]]
//! name = "total"
//! mode = "seq"
//! members = ["(?i)total", { rule = "amount" }]
//! deny = ["VOID"]
//! ```

pub mod build;
pub mod loader;
pub mod schema;

pub use build::{BuildError, RuleSet};
pub use loader::{load_from_path, load_from_str, ConfigError};
pub use schema::{
    MaskDefinition, Member, Metadata, RuleConfig, RuleDefinition, ValidationError,
    ValidationIssue,
};
