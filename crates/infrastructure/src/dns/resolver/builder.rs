use super::super::cache::{Clock, RecordCache, SystemClock};
use super::super::forwarding::UdpSender;
use super::super::registry::CacheRegistry;
use crate::system::{ResolvConf, DEFAULT_RESOLV_CONF_PATH};
use ferrous_resolv_application::ports::DnsSender;
use ferrous_resolv_application::use_cases::{LookupOptions, ResolveNameUseCase, ResolverContext};
use ferrous_resolv_domain::{parse_name, CacheConfig, Config, DomainError, Name, ResolverConfig};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tracing::{info, warn};

const LOCALHOST_SERVER: SocketAddr = SocketAddr::new(
    std::net::IpAddr::V4(Ipv4Addr::LOCALHOST),
    super::super::transport::DEFAULT_DNS_PORT,
);

/// Assembles a stub resolver: per-class caches, a sender and lookup
/// defaults.
pub struct StubResolverBuilder {
    resolver: ResolverConfig,
    cache: CacheConfig,
    sender: Option<Arc<dyn DnsSender>>,
    caches: Vec<Arc<RecordCache>>,
    search_path: Option<Vec<Name>>,
    clock: Arc<dyn Clock>,
}

impl Default for StubResolverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StubResolverBuilder {
    pub fn new() -> Self {
        Self {
            resolver: ResolverConfig::default(),
            cache: CacheConfig::default(),
            sender: None,
            caches: Vec::new(),
            search_path: None,
            clock: Arc::new(SystemClock),
        }
    }

    /// Starts from `/etc/resolv.conf`.
    pub fn from_system() -> Result<Self, DomainError> {
        let conf = ResolvConf::load(DEFAULT_RESOLV_CONF_PATH)?;
        Ok(Self::new().with_resolv_conf(&conf))
    }

    pub fn with_resolv_conf(mut self, conf: &ResolvConf) -> Self {
        conf.apply_to(&mut self.resolver);
        self
    }

    pub fn with_config(mut self, config: &Config) -> Self {
        self.resolver = config.resolver.clone();
        self.cache = config.cache.clone();
        self
    }

    pub fn with_resolver_config(mut self, config: ResolverConfig) -> Self {
        self.resolver = config;
        self
    }

    pub fn with_cache_config(mut self, config: CacheConfig) -> Self {
        self.cache = config;
        self
    }

    pub fn with_sender(mut self, sender: Arc<dyn DnsSender>) -> Self {
        self.sender = Some(sender);
        self
    }

    /// Uses `cache` for its class instead of creating one.
    pub fn with_cache(mut self, cache: Arc<RecordCache>) -> Self {
        self.caches.push(cache);
        self
    }

    pub fn with_search_path(mut self, search_path: Vec<Name>) -> Self {
        self.search_path = Some(search_path);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn build_context(mut self) -> Result<ResolverContext, DomainError> {
        if self.resolver.use_resolv_conf {
            match ResolvConf::load(DEFAULT_RESOLV_CONF_PATH) {
                Ok(conf) => conf.apply_to(&mut self.resolver),
                Err(e) => warn!(error = %e, "Could not read system resolver configuration"),
            }
        }

        let search_path = match self.search_path.take() {
            Some(path) => path,
            None => parse_search(&self.resolver.search)?,
        };

        let sender: Arc<dyn DnsSender> = match self.sender.take() {
            Some(sender) => sender,
            None if self.resolver.servers.is_empty() => Arc::new(UdpSender::new(
                vec![LOCALHOST_SERVER],
                self.resolver.query_timeout(),
            )),
            None => Arc::new(UdpSender::from_config(&self.resolver)?),
        };

        let registry = CacheRegistry::with_clock(self.cache.clone(), Arc::clone(&self.clock));
        for cache in self.caches.drain(..) {
            registry.insert(cache);
        }

        let options = LookupOptions {
            search_path,
            ndots: self.resolver.ndots,
            credibility: self.resolver.credibility,
        };

        info!(
            servers = self.resolver.servers.len(),
            search = options.search_path.len(),
            ndots = options.ndots,
            credibility = %options.credibility,
            "Building stub resolver"
        );

        Ok(ResolverContext::new(Arc::new(registry), sender, options))
    }

    pub fn build(self) -> Result<ResolveNameUseCase, DomainError> {
        Ok(ResolveNameUseCase::new(Arc::new(self.build_context()?)))
    }
}

/// A context that sends to 127.0.0.1:53 with default caches and options.
pub fn localhost_context() -> ResolverContext {
    let resolver = ResolverConfig::default();
    let sender = Arc::new(UdpSender::new(
        vec![LOCALHOST_SERVER],
        resolver.query_timeout(),
    ));
    ResolverContext::new(
        Arc::new(CacheRegistry::new(CacheConfig::default())),
        sender,
        LookupOptions::default(),
    )
}

fn parse_search(search: &[String]) -> Result<Vec<Name>, DomainError> {
    search
        .iter()
        .map(|domain| {
            let mut name = parse_name(domain)?;
            name.set_fqdn(true);
            Ok(name)
        })
        .collect()
}
