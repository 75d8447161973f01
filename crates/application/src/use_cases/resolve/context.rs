use crate::ports::{CacheProvider, DnsSender};
use ferrous_resolv_domain::{Credibility, Name};
use std::sync::Arc;

/// Per-lookup policy.
#[derive(Debug, Clone)]
pub struct LookupOptions {
    /// Suffixes tried for relative names, in order.
    pub search_path: Vec<Name>,
    /// Relative names with more labels than this are tried as absolute first.
    pub ndots: usize,
    /// Minimum credibility a cached entry needs to be used.
    pub credibility: Credibility,
}

impl Default for LookupOptions {
    fn default() -> Self {
        Self {
            search_path: Vec::new(),
            ndots: 1,
            credibility: Credibility::NORMAL,
        }
    }
}

impl LookupOptions {
    pub fn with_search_path(mut self, search_path: Vec<Name>) -> Self {
        self.search_path = search_path;
        self
    }

    pub fn with_ndots(mut self, ndots: usize) -> Self {
        self.ndots = ndots;
        self
    }

    pub fn with_credibility(mut self, credibility: Credibility) -> Self {
        self.credibility = credibility;
        self
    }
}

/// Everything a lookup needs: caches, a way to the network and defaults.
#[derive(Clone)]
pub struct ResolverContext {
    pub caches: Arc<dyn CacheProvider>,
    pub sender: Arc<dyn DnsSender>,
    pub options: LookupOptions,
}

impl ResolverContext {
    pub fn new(
        caches: Arc<dyn CacheProvider>,
        sender: Arc<dyn DnsSender>,
        options: LookupOptions,
    ) -> Self {
        Self {
            caches,
            sender,
            options,
        }
    }
}
