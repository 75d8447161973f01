//! Reader for the `/etc/resolv.conf` format.

use crate::dns::transport::DEFAULT_DNS_PORT;
use ferrous_resolv_domain::{parse_name, DomainError, Name, ResolverConfig};
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::str::SplitWhitespace;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_RESOLV_CONF_PATH: &str = "/etc/resolv.conf";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvConf {
    pub nameservers: Vec<SocketAddr>,
    pub search: Vec<Name>,
    pub ndots: Option<usize>,
    pub timeout: Option<Duration>,
}

impl ResolvConf {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| DomainError::IoError(format!("{}: {}", path.display(), e)))?;
        Self::parse(&contents)
    }

    /// Parses resolv.conf text. `domain` and `search` replace each other,
    /// the last one wins. Unknown keywords and options are ignored.
    pub fn parse(contents: &str) -> Result<Self, DomainError> {
        let mut conf = ResolvConf::default();

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            let mut words = line.split_whitespace();
            match words.next() {
                Some("nameserver") => conf.parse_nameserver(words)?,
                Some("domain") => conf.parse_domain(words)?,
                Some("search") => conf.parse_search(words)?,
                Some("options") => conf.parse_options(words),
                Some(keyword) => debug!(keyword, "Ignoring resolv.conf keyword"),
                None => {}
            }
        }

        Ok(conf)
    }

    fn parse_nameserver(&mut self, mut words: SplitWhitespace<'_>) -> Result<(), DomainError> {
        let word = next_word(&mut words, "nameserver")?;
        let ip: IpAddr = word
            .parse()
            .map_err(|_| DomainError::ConfigError(format!("Invalid nameserver '{}'", word)))?;
        self.nameservers.push(SocketAddr::new(ip, DEFAULT_DNS_PORT));
        Ok(())
    }

    fn parse_domain(&mut self, mut words: SplitWhitespace<'_>) -> Result<(), DomainError> {
        let domain = absolute(next_word(&mut words, "domain")?)?;
        self.search = vec![domain];
        Ok(())
    }

    fn parse_search(&mut self, words: SplitWhitespace<'_>) -> Result<(), DomainError> {
        self.search = words.map(absolute).collect::<Result<Vec<_>, _>>()?;
        Ok(())
    }

    fn parse_options(&mut self, words: SplitWhitespace<'_>) {
        for word in words {
            let Some((option, value)) = word.split_once(':') else {
                continue;
            };
            let Ok(value) = value.parse::<usize>() else {
                continue;
            };
            match option {
                "ndots" => self.ndots = Some(value),
                "timeout" => self.timeout = Some(Duration::from_secs(value as u64)),
                _ => {}
            }
        }
    }

    /// Fills `config` from this file: servers and search list only when the
    /// configuration has none, options always.
    pub fn apply_to(&self, config: &mut ResolverConfig) {
        if config.servers.is_empty() {
            config.servers = self.nameservers.iter().map(ToString::to_string).collect();
        }
        if config.search.is_empty() {
            config.search = self.search.iter().map(ToString::to_string).collect();
        }
        if let Some(ndots) = self.ndots {
            config.ndots = ndots;
        }
        if let Some(timeout) = self.timeout {
            config.query_timeout_ms = timeout.as_millis() as u64;
        }
    }
}

fn next_word<'a>(words: &mut SplitWhitespace<'a>, keyword: &str) -> Result<&'a str, DomainError> {
    words
        .next()
        .ok_or_else(|| DomainError::ConfigError(format!("'{}' needs an argument", keyword)))
}

fn absolute(word: &str) -> Result<Name, DomainError> {
    let mut name = parse_name(word)?;
    name.set_fqdn(true);
    Ok(name)
}
