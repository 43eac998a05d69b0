//! Peer discovery for peernode.
//!
//! Discovery is limited to a static bootstrap list resolved once at node
//! construction.

pub mod bootstrap;
pub mod dns;

pub use bootstrap::{exclude_self, is_dnsaddr, AddressResolver};
pub use dns::{AddressFamily, DnsLookup, StaticDns, SystemDns};
