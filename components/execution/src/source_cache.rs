//! Source text registry used to show the code behind a frame.

use std::collections::HashMap;
use std::sync::Arc;

/// Source text of loaded scripts, keyed by URL.
///
/// Lines are looked up on demand; nothing is split or copied until a frame
/// asks for its line.
#[derive(Debug, Clone, Default)]
pub struct SourceCache {
    sources: HashMap<String, Arc<str>>,
}

impl SourceCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the source text of a script
    pub fn insert(&mut self, url: impl Into<String>, source: impl Into<Arc<str>>) {
        let url = url.into();
        log::trace!("caching source for {}", url);
        self.sources.insert(url, source.into());
    }

    /// Forget a script's source
    pub fn remove(&mut self, url: &str) -> bool {
        self.sources.remove(url).is_some()
    }

    /// Whether source text is known for `url`
    pub fn contains(&self, url: &str) -> bool {
        self.sources.contains_key(url)
    }

    /// Get a 1-indexed line, trimmed.
    ///
    /// Returns None for unknown scripts, out-of-range lines and lines that
    /// are blank after trimming.
    pub fn line(&self, url: &str, line: u32) -> Option<&str> {
        let index = usize::try_from(line).ok()?.checked_sub(1)?;
        let text = self.sources.get(url)?.lines().nth(index)?.trim();
        (!text.is_empty()).then_some(text)
    }
}
