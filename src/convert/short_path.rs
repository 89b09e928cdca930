//! Short-path lookup port.
//!
//! Windows can map a path containing spaces to a short (8.3-style) alias
//! that needs no quoting. The lookup is an OS call, so it lives behind a
//! trait: platforms without the concept inject [`NoShortPaths`], and callers
//! who do resolve real short paths wrap their resolver in
//! [`CachedShortPaths`] because the mapping is fixed for the lifetime of a
//! run and the OS call is expensive.

use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

/// Resolves the short form of an existing path.
pub trait ShortPathResolver: fmt::Debug + Send + Sync {
    /// The short form of `path`, or `None` when there is no such concept or
    /// the lookup fails. A `None` simply disables the optimization for that
    /// path.
    fn resolve(&self, path: &str) -> Option<String>;
}

/// Identity resolver for platforms without short paths.
#[derive(Debug, Default)]
pub struct NoShortPaths;

impl ShortPathResolver for NoShortPaths {
    fn resolve(&self, _path: &str) -> Option<String> {
        None
    }
}

/// Caching decorator around another resolver.
///
/// Failed lookups are cached too; retrying them would just repeat the same
/// OS call for the same answer.
#[derive(Debug)]
pub struct CachedShortPaths<R> {
    inner: R,
    cache: Mutex<HashMap<String, Option<String>>>,
}

impl<R: ShortPathResolver> CachedShortPaths<R> {
    pub fn new(inner: R) -> Self {
        CachedShortPaths {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }
}

impl<R: ShortPathResolver> ShortPathResolver for CachedShortPaths<R> {
    fn resolve(&self, path: &str) -> Option<String> {
        if let Ok(mut cache) = self.cache.lock() {
            if let Some(hit) = cache.get(path) {
                return hit.clone();
            }
            let value = self.inner.resolve(path);
            cache.insert(path.to_string(), value.clone());
            value
        } else {
            // Poisoned lock: fall back to an uncached lookup.
            self.inner.resolve(path)
        }
    }
}
