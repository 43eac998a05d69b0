//! Hostname and TXT lookup used while resolving bootstrap addresses.

use std::{
    collections::HashMap,
    io,
    net::IpAddr,
};

use async_trait::async_trait;
use hickory_resolver::{
    config::ResolverConfig, name_server::TokioConnectionProvider, TokioResolver,
};
use tracing::warn;

/// Which address families a `/dns*/` component accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressFamily {
    /// `/dns4/`
    V4,
    /// `/dns6/`
    V6,
    /// `/dns/`
    Any,
}

impl AddressFamily {
    pub fn accepts(self, ip: &IpAddr) -> bool {
        match self {
            AddressFamily::V4 => ip.is_ipv4(),
            AddressFamily::V6 => ip.is_ipv6(),
            AddressFamily::Any => true,
        }
    }
}

/// Resolves hostnames to IP addresses and names to TXT records.
#[async_trait]
pub trait DnsLookup: Send + Sync {
    async fn lookup(&self, host: &str) -> io::Result<Vec<IpAddr>>;

    /// Every TXT record published under `name`, one string per record.
    async fn txt_lookup(&self, name: &str) -> io::Result<Vec<String>>;
}

/// Lookup through the system resolver configuration.
pub struct SystemDns {
    resolver: TokioResolver,
}

impl SystemDns {
    pub fn new() -> Self {
        let builder = TokioResolver::builder_tokio().unwrap_or_else(|e| {
            warn!(error = %e, "Cannot read system DNS configuration, using default name servers");
            TokioResolver::builder_with_config(
                ResolverConfig::default(),
                TokioConnectionProvider::default(),
            )
        });
        Self { resolver: builder.build() }
    }
}

impl Default for SystemDns {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DnsLookup for SystemDns {
    async fn lookup(&self, host: &str) -> io::Result<Vec<IpAddr>> {
        let ips = self.resolver.lookup_ip(host).await.map_err(io::Error::other)?;
        Ok(ips.iter().collect())
    }

    async fn txt_lookup(&self, name: &str) -> io::Result<Vec<String>> {
        let records = self.resolver.txt_lookup(name).await.map_err(io::Error::other)?;
        Ok(records
            .iter()
            .map(|txt| {
                txt.txt_data().iter().map(|chunk| String::from_utf8_lossy(chunk)).collect()
            })
            .collect())
    }
}

/// Fixed host and TXT tables. Unknown names fail with `NotFound`.
#[derive(Debug, Clone, Default)]
pub struct StaticDns {
    hosts: HashMap<String, Vec<IpAddr>>,
    txt: HashMap<String, Vec<String>>,
}

impl StaticDns {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host(mut self, host: impl Into<String>, ips: Vec<IpAddr>) -> Self {
        self.hosts.insert(host.into(), ips);
        self
    }

    pub fn with_txt(mut self, name: impl Into<String>, records: Vec<String>) -> Self {
        self.txt.insert(name.into(), records);
        self
    }
}

#[async_trait]
impl DnsLookup for StaticDns {
    async fn lookup(&self, host: &str) -> io::Result<Vec<IpAddr>> {
        self.hosts.get(host).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no such host: {host}"))
        })
    }

    async fn txt_lookup(&self, name: &str) -> io::Result<Vec<String>> {
        self.txt.get(name).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no TXT records for {name}"))
        })
    }
}
