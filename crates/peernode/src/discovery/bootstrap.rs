//! Bootstrap address resolution.
//!
//! Configuration lists bootstrap peers as multiaddr strings. Entries with a
//! `/dns/`, `/dns4/` or `/dns6/` host are expanded into one address per
//! resolved IP; everything else in the address (transport, port, `/p2p/`
//! suffix) is kept. `/dnsaddr/<domain>` entries are expanded through the
//! `dnsaddr=` TXT records at `_dnsaddr.<domain>`, recursively, so every record
//! becomes its own address and is checked against the local peer id.
//!
//! A bad entry never poisons the list: it is dropped with a warning and the
//! remaining entries resolve as usual.

use std::{
    collections::HashSet,
    io,
    net::IpAddr,
    sync::Arc,
};

use futures::future::BoxFuture;
use libp2p::{multiaddr::Protocol, Multiaddr, PeerId};
use tracing::{debug, info, warn};

use super::dns::{AddressFamily, DnsLookup, SystemDns};
use crate::network::peer_id_suffix;

/// Nesting limit for `/dnsaddr/` records that point at other `/dnsaddr/` names.
pub const MAX_DNSADDR_DEPTH: usize = 10;

const DNSADDR_PREFIX: &str = "dnsaddr=";

/// Turns configured bootstrap entries into a dialable, self-free list.
#[derive(Clone)]
pub struct AddressResolver {
    dns: Arc<dyn DnsLookup>,
}

impl AddressResolver {
    pub fn new(dns: impl DnsLookup + 'static) -> Self {
        Self { dns: Arc::new(dns) }
    }

    /// Resolver backed by the operating system's DNS configuration.
    pub fn system() -> Self {
        Self::new(SystemDns::new())
    }

    /// Resolve `entries` in order, dropping entries that fail.
    ///
    /// The result holds no duplicates; the first occurrence of an address
    /// keeps its position.
    pub async fn resolve(&self, entries: &[String]) -> Vec<Multiaddr> {
        let mut resolved = Vec::new();
        let mut seen = HashSet::new();

        for entry in entries {
            let addr = match entry.trim().parse::<Multiaddr>() {
                Ok(addr) => addr,
                Err(e) => {
                    warn!(entry = %entry, error = %e, "Dropping unparsable bootstrap entry");
                    continue;
                },
            };

            let expanded = match self.resolve_entry(&addr).await {
                Ok(expanded) => expanded,
                Err(e) => {
                    warn!(entry = %entry, error = %e, "Dropping bootstrap entry that failed to resolve");
                    continue;
                },
            };

            for addr in expanded {
                if seen.insert(addr.clone()) {
                    resolved.push(addr);
                }
            }
        }

        resolved
    }

    /// Resolve `entries` and drop the ones that point at `local_peer_id`.
    pub async fn resolve_bootstrap_list(
        &self,
        entries: &[String],
        local_peer_id: &PeerId,
    ) -> Vec<Multiaddr> {
        let resolved = self.resolve(entries).await;
        let bootstrappers = exclude_self(resolved, local_peer_id);
        info!(
            configured = entries.len(),
            usable = bootstrappers.len(),
            "Resolved bootstrap list"
        );
        bootstrappers
    }

    async fn resolve_entry(&self, addr: &Multiaddr) -> io::Result<Vec<Multiaddr>> {
        let mut seen = HashSet::new();
        let expanded = self.expand(addr.clone(), &mut seen, 0).await?;
        if expanded.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{addr} resolved to no usable addresses"),
            ));
        }
        debug!(addr = %addr, resolved_count = expanded.len(), "Resolved bootstrap entry");
        Ok(expanded)
    }

    fn expand<'a>(
        &'a self,
        addr: Multiaddr,
        seen: &'a mut HashSet<String>,
        depth: usize,
    ) -> BoxFuture<'a, io::Result<Vec<Multiaddr>>> {
        Box::pin(async move {
            match dnsaddr_domain(&addr) {
                Some(domain) => self.expand_dnsaddr(&addr, domain, seen, depth).await,
                None => self.expand_host(&addr).await,
            }
        })
    }

    async fn expand_host(&self, addr: &Multiaddr) -> io::Result<Vec<Multiaddr>> {
        let Some((index, host, family)) = find_dns_host(addr) else {
            return Ok(vec![addr.clone()]);
        };

        let ips = self.dns.lookup(&host).await?;
        let expanded: Vec<_> = ips
            .into_iter()
            .filter(|ip| family.accepts(ip))
            .map(|ip| replace_component(addr, index, ip))
            .collect();

        if expanded.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{host} has no usable {family:?} addresses"),
            ));
        }
        Ok(expanded)
    }

    /// Follow the `dnsaddr=` TXT records of `domain`.
    ///
    /// When `addr` ends in `/p2p/<id>`, only records for that peer are kept.
    /// Records that fail are skipped; a domain already visited for this entry
    /// contributes nothing.
    async fn expand_dnsaddr(
        &self,
        addr: &Multiaddr,
        domain: String,
        seen: &mut HashSet<String>,
        depth: usize,
    ) -> io::Result<Vec<Multiaddr>> {
        if depth >= MAX_DNSADDR_DEPTH {
            return Err(io::Error::other(format!(
                "dnsaddr records nest deeper than {MAX_DNSADDR_DEPTH} levels at {domain}"
            )));
        }
        if !seen.insert(domain.clone()) {
            debug!(domain = %domain, "Skipping dnsaddr domain already visited");
            return Ok(Vec::new());
        }

        let wanted = peer_id_suffix(addr);
        let records = self.dns.txt_lookup(&format!("_dnsaddr.{domain}")).await?;

        let mut expanded = Vec::new();
        for record in records {
            let Some(value) = record.strip_prefix(DNSADDR_PREFIX) else {
                continue;
            };
            let target = match value.parse::<Multiaddr>() {
                Ok(target) => target,
                Err(e) => {
                    warn!(domain = %domain, record = %value, error = %e, "Skipping unparsable dnsaddr record");
                    continue;
                },
            };

            match self.expand(target, seen, depth + 1).await {
                Ok(addrs) => expanded.extend(
                    addrs.into_iter().filter(|a| wanted.is_none() || peer_id_suffix(a) == wanted),
                ),
                Err(e) => {
                    warn!(domain = %domain, record = %value, error = %e, "Skipping dnsaddr record that failed to resolve");
                },
            }
        }

        Ok(expanded)
    }
}

impl Default for AddressResolver {
    fn default() -> Self {
        Self::system()
    }
}

/// Remove every address whose trailing `/p2p/` component is `local_peer_id`.
///
/// The remaining addresses keep their relative order.
pub fn exclude_self(addresses: Vec<Multiaddr>, local_peer_id: &PeerId) -> Vec<Multiaddr> {
    addresses
        .into_iter()
        .filter(|addr| {
            let is_self = peer_id_suffix(addr).as_ref() == Some(local_peer_id);
            if is_self {
                debug!(addr = %addr, "Excluding own address from bootstrap list");
            }
            !is_self
        })
        .collect()
}

/// Check if a multiaddr is a `/dnsaddr/` address.
pub fn is_dnsaddr(addr: &Multiaddr) -> bool {
    addr.iter().any(|p| matches!(p, Protocol::Dnsaddr(_)))
}

fn dnsaddr_domain(addr: &Multiaddr) -> Option<String> {
    addr.iter().find_map(|protocol| match protocol {
        Protocol::Dnsaddr(domain) => Some(domain.to_string()),
        _ => None,
    })
}

fn find_dns_host(addr: &Multiaddr) -> Option<(usize, String, AddressFamily)> {
    addr.iter().enumerate().find_map(|(index, protocol)| match protocol {
        Protocol::Dns(host) => Some((index, host.to_string(), AddressFamily::Any)),
        Protocol::Dns4(host) => Some((index, host.to_string(), AddressFamily::V4)),
        Protocol::Dns6(host) => Some((index, host.to_string(), AddressFamily::V6)),
        _ => None,
    })
}

fn replace_component(addr: &Multiaddr, index: usize, ip: IpAddr) -> Multiaddr {
    addr.iter()
        .enumerate()
        .map(|(i, protocol)| {
            if i != index {
                return protocol;
            }
            match ip {
                IpAddr::V4(v4) => Protocol::Ip4(v4),
                IpAddr::V6(v6) => Protocol::Ip6(v6),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_component_keeps_suffix() {
        let peer = PeerId::random();
        let addr: Multiaddr = format!("/dns4/boot.example/tcp/4040/p2p/{peer}").parse().unwrap();
        let (index, host, family) = find_dns_host(&addr).unwrap();
        assert_eq!(index, 0);
        assert_eq!(host, "boot.example");
        assert_eq!(family, AddressFamily::V4);

        let replaced = replace_component(&addr, index, "10.0.0.7".parse().unwrap());
        assert_eq!(replaced.to_string(), format!("/ip4/10.0.0.7/tcp/4040/p2p/{peer}"));
    }

    #[test]
    fn test_concrete_address_has_no_host() {
        let addr: Multiaddr = "/ip4/127.0.0.1/tcp/1634".parse().unwrap();
        assert!(find_dns_host(&addr).is_none());
        assert!(!is_dnsaddr(&addr));
    }

    #[test]
    fn test_is_dnsaddr() {
        let addr: Multiaddr = "/dnsaddr/bootstrap.example".parse().unwrap();
        assert!(is_dnsaddr(&addr));
        assert!(find_dns_host(&addr).is_none());
        assert_eq!(dnsaddr_domain(&addr).as_deref(), Some("bootstrap.example"));
    }

    #[tokio::test]
    async fn test_dnsaddr_nesting_is_bounded() {
        use crate::discovery::StaticDns;

        let mut dns = StaticDns::new();
        for level in 0..=MAX_DNSADDR_DEPTH {
            dns = dns.with_txt(
                format!("_dnsaddr.l{level}.example"),
                vec![format!("dnsaddr=/dnsaddr/l{}.example", level + 1)],
            );
        }
        dns = dns.with_txt(
            format!("_dnsaddr.l{}.example", MAX_DNSADDR_DEPTH + 1),
            vec!["dnsaddr=/ip4/10.0.0.1/tcp/4001".to_string()],
        );

        let resolver = AddressResolver::new(dns);
        let err = resolver.resolve_entry(&"/dnsaddr/l0.example".parse().unwrap()).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_dnsaddr_cycle_terminates() {
        use crate::discovery::StaticDns;

        let dns = StaticDns::new()
            .with_txt(
                "_dnsaddr.a.example",
                vec![
                    "dnsaddr=/dnsaddr/b.example".to_string(),
                    "dnsaddr=/ip4/10.0.0.1/tcp/4001".to_string(),
                ],
            )
            .with_txt("_dnsaddr.b.example", vec!["dnsaddr=/dnsaddr/a.example".to_string()]);

        let resolver = AddressResolver::new(dns);
        let expanded = resolver.resolve_entry(&"/dnsaddr/a.example".parse().unwrap()).await.unwrap();
        assert_eq!(expanded, vec!["/ip4/10.0.0.1/tcp/4001".parse::<Multiaddr>().unwrap()]);
    }
}
