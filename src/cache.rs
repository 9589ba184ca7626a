//! Thread-local compilation cache for raw expressions.
//!
//! Every string-to-rule adaptation goes through here, so composing the same
//! expression many times (rule files, operator chains) compiles it once per
//! thread. Cache is capped at 256 entries; it is cleared when full.

use crate::flags::Flags;
use regex::Regex;
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

const MAX_CACHE_ENTRIES: usize = 256;

thread_local! {
    // Key is "<flag bits>:<pattern>" so the same source compiled with
    // different flags never collides.
    static REGEX_CACHE: RefCell<HashMap<String, Arc<Regex>>> =
        RefCell::new(HashMap::new());
}

/// Get a compiled expression from cache, or compile and cache it.
pub fn get_or_compile(pattern: &str, flags: Flags) -> Result<Arc<Regex>, regex::Error> {
    let cache_key = format!("{:02x}:{pattern}", flags.bits());

    REGEX_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();

        if let Some(regex) = cache.get(&cache_key) {
            return Ok(Arc::clone(regex));
        }

        if cache.len() >= MAX_CACHE_ENTRIES {
            trace!(entries = cache.len(), "regex cache full, clearing");
            cache.clear();
        }

        let compiled = Arc::new(flags.builder(pattern).build()?);
        cache.insert(cache_key, Arc::clone(&compiled));
        Ok(compiled)
    })
}

/// Clear the cache (mainly for testing).
pub fn clear_cache() {
    REGEX_CACHE.with(|cache| {
        cache.borrow_mut().clear();
    });
}

/// Number of cached expressions on this thread.
pub fn cache_size() -> usize {
    REGEX_CACHE.with(|cache| cache.borrow().len())
}
