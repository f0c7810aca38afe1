//! Core types and error definitions.
//!
//! Everything here is a leaf shared by the DNS strategy, the navigation
//! classifiers, and the coordinator:
//! - [`AddressInfo`]: a URL split into scheme, path, domain, and optional
//!   resolved address
//! - [`DnsError`]: typed resolution and rewrite failures
//! - [`LoadSettings`] / [`DohConfig`]: per-tab configuration snapshots

pub mod address;
pub mod error;
pub mod settings;

pub use address::{same_site, same_site_strict, AddressInfo, DomainName, OutboundRequest, Scheme};
pub use error::DnsError;
pub use settings::{ConcurrencyBackend, DohConfig, LoadSettings};
