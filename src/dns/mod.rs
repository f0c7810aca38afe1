//! DNS-over-HTTPS resolution.
//!
//! Provides the tab coordinator's name-resolution strategy:
//! - A JSON DoH resolver with a fixed query contract ([`DohResolver`])
//! - An injectable HTTPS transport ([`DohTransport`])
//! - Hostname-to-IP override support ([`ResolverWithOverrides`])
//! - Three interchangeable delivery conventions (stream / promise / task)
//!
//! # Architecture
//!
//! The [`Resolve`] trait is the core abstraction; the coordinator never
//! sees anything else. There is exactly one resolution algorithm — the
//! back-end adapters in [`backend`] only change how its single terminal
//! event is delivered.
//!
//! # Example
//!
//! ```rust,ignore
//! use tabnet::base::{DohConfig, address::DomainName};
//! use tabnet::dns::DohResolver;
//!
//! let resolver = DohResolver::new(&DohConfig::default());
//! let ip = resolver.lookup(&DomainName::new("example.com")?).await?;
//! println!("Resolved: {}", ip);
//! ```

pub mod backend;
mod doh;
mod resolve;
mod transport;

pub use backend::{promise, resolve_via, stream, ResolutionPromise, ResolutionStream};
pub use doh::DohResolver;
pub use resolve::{Resolve, ResolverWithOverrides, Resolving};
pub use transport::{BoringTransport, DohResponse, DohTransport, Fetching};
