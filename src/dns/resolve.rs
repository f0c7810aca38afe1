//! Core resolution types and traits.
//!
//! The [`Resolve`] trait is the single capability seam between the
//! coordinator and whatever answers DNS questions. Production uses the DoH
//! resolver; tests swap in mocks or the override wrapper.

use crate::base::address::DomainName;
use crate::base::error::DnsError;
use std::{
    borrow::Cow, collections::HashMap, fmt, future::Future, net::IpAddr, pin::Pin, sync::Arc,
};

/// Alias for the `Future` type returned by a resolver.
pub type Resolving = Pin<Box<dyn Future<Output = Result<IpAddr, DnsError>> + Send>>;

/// Trait for domain-name resolution.
///
/// One suspension point, one terminal outcome: an address or a typed
/// [`DnsError`]. Implementations must be thread-safe.
///
/// # Design Notes
///
/// - Uses `&self` for concurrent resolution without mutable access.
/// - Returns boxed futures for trait object compatibility.
/// - Retry policy lives with the caller, never inside a resolver.
pub trait Resolve: Send + Sync {
    /// Resolves a domain name to a single IPv4 address.
    fn resolve(&self, name: DomainName) -> Resolving;
}

/// Blanket implementation for Arc-wrapped resolvers.
impl<R: Resolve + ?Sized> Resolve for Arc<R> {
    fn resolve(&self, name: DomainName) -> Resolving {
        (**self).resolve(name)
    }
}

/// Resolver wrapper that supports hostname overrides.
///
/// Checks a map of hostname-to-address pins before falling back to the
/// underlying resolver. Useful for:
/// - Testing without real DNS
/// - Forcing specific IPs for certain domains
/// - Local development with custom hostnames
pub struct ResolverWithOverrides {
    inner: Arc<dyn Resolve>,
    overrides: Arc<HashMap<Cow<'static, str>, IpAddr>>,
}

impl ResolverWithOverrides {
    /// Creates a new resolver with the given overrides.
    pub fn new(inner: Arc<dyn Resolve>, overrides: HashMap<Cow<'static, str>, IpAddr>) -> Self {
        Self {
            inner,
            overrides: Arc::new(overrides),
        }
    }

    /// Returns the number of configured overrides.
    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }
}

impl Resolve for ResolverWithOverrides {
    fn resolve(&self, name: DomainName) -> Resolving {
        if let Some(ip) = self.overrides.get(name.as_str()).copied() {
            tracing::debug!(domain = %name, ip = %ip, "resolution pinned by override");
            return Box::pin(std::future::ready(Ok(ip)));
        }
        self.inner.resolve(name)
    }
}

impl fmt::Debug for ResolverWithOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverWithOverrides")
            .field("override_count", &self.overrides.len())
            .finish_non_exhaustive()
    }
}
