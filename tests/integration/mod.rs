//! End-to-end behavior of composed rules through the public API.

mod composition;
mod masking;
mod nested;
