//! URL decomposition for page loads.
//!
//! [`AddressInfo`] is the immutable value every other component works with:
//! a URL split into scheme, path + query, the logical domain name, and an
//! optional resolved IP address. The domain name is the tab's identity for
//! all site comparisons; the IP address is a transport detail only and never
//! participates in equality or display.

use crate::base::error::DnsError;
use std::fmt;
use std::net::IpAddr;
use url::Url;

/// A validated, non-empty domain name.
///
/// Lightweight wrapper around a lowercased hostname string. Internationalized
/// names arrive already punycode-normalized because every constructor goes
/// through the `url` crate's host parsing.
#[derive(Clone, Hash, Eq, PartialEq)]
pub struct DomainName {
    host: Box<str>,
}

impl DomainName {
    /// Creates a new [`DomainName`], rejecting empty input.
    pub fn new(host: impl AsRef<str>) -> Result<Self, DnsError> {
        let host = host.as_ref().trim().to_ascii_lowercase();
        if host.is_empty() {
            return Err(DnsError::NoHost);
        }
        Ok(Self { host: host.into() })
    }

    /// View the hostname as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.host
    }
}

impl fmt::Debug for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.host, f)
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.host, f)
    }
}

/// URL scheme accepted for page loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

/// Two hosts are the same logical site if they match exactly or one contains
/// the other as a substring. The containment arm is what folds "m." and
/// "www." variants together.
///
/// This rule is intentionally permissive: "notexample.com" contains
/// "example.com", so unrelated hosts sharing a substring are folded too.
/// [`same_site_strict`] is the boundary-aware alternative; the default
/// policy does not use it.
pub fn same_site(a: &str, b: &str) -> bool {
    let a = a.to_ascii_lowercase();
    let b = b.to_ascii_lowercase();
    a == b || a.contains(b.as_str()) || b.contains(a.as_str())
}

/// Boundary-aware variant of [`same_site`]: hosts match exactly or one is a
/// dot-separated suffix of the other ("m.example.com" / "example.com" match,
/// "notexample.com" / "example.com" do not).
pub fn same_site_strict(a: &str, b: &str) -> bool {
    let a = a.to_ascii_lowercase();
    let b = b.to_ascii_lowercase();
    if a == b {
        return true;
    }
    let (long, short) = if a.len() > b.len() { (&a, &b) } else { (&b, &a) };
    long.strip_suffix(short.as_str())
        .is_some_and(|prefix| prefix.ends_with('.'))
}

/// The request handed to the webview transport: the URL to dial (host
/// replaced by the resolved address when one exists) plus the logical host
/// that must travel as the Host header so virtual hosting keeps working.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub url: Url,
    pub host_header: String,
}

/// Immutable description of where a tab is pointed.
///
/// Values are replaced, never mutated: resolving an address or changing the
/// path produces a fresh copy via [`AddressInfo::with_ip_address`] /
/// [`AddressInfo::with_path_of`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressInfo {
    scheme: Scheme,
    domain_name: DomainName,
    path: String,
    query: Option<String>,
    ip_address: Option<IpAddr>,
}

impl AddressInfo {
    /// Parse a user- or link-provided URL string.
    pub fn parse(input: &str) -> Result<Self, DnsError> {
        let url = Url::parse(input).map_err(|_| DnsError::ComponentsFail)?;
        Self::from_url(&url)
    }

    /// Build from an already-parsed URL. Rejects non-http(s) schemes and
    /// host-less URLs with typed errors.
    pub fn from_url(url: &Url) -> Result<Self, DnsError> {
        let scheme = match url.scheme() {
            "http" => Scheme::Http,
            "https" => Scheme::Https,
            _ => return Err(DnsError::NotHttpScheme),
        };
        let host = url.host_str().ok_or(DnsError::NoHost)?;
        Ok(Self {
            scheme,
            domain_name: DomainName::new(host)?,
            path: url.path().to_string(),
            query: url.query().map(str::to_string),
            ip_address: None,
        })
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn domain_name(&self) -> &DomainName {
        &self.domain_name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn ip_address(&self) -> Option<IpAddr> {
        self.ip_address
    }

    /// Copy carrying the resolved address. The domain name is unchanged;
    /// resolution never alters logical identity.
    pub fn with_ip_address(&self, ip: IpAddr) -> Self {
        Self {
            ip_address: Some(ip),
            ..self.clone()
        }
    }

    /// Copy with any resolved address dropped.
    pub fn without_ip_address(&self) -> Self {
        Self {
            ip_address: None,
            ..self.clone()
        }
    }

    /// Copy taking path and query from `url`, keeping domain, scheme, and
    /// any resolved address. Used for same-site navigations so a path change
    /// does not force a second resolution.
    pub fn with_path_of(&self, url: &Url) -> Self {
        Self {
            path: url.path().to_string(),
            query: url.query().map(str::to_string),
            ..self.clone()
        }
    }

    /// Whether `host` is the same logical site under the permissive rule.
    pub fn is_same_site(&self, host: &str) -> bool {
        same_site(self.domain_name.as_str(), host)
    }

    /// The value the Host header must carry regardless of transport target.
    pub fn virtual_host(&self) -> &str {
        self.domain_name.as_str()
    }

    /// Rebuild the logical URL (domain as host, no IP substitution).
    pub fn logical_url(&self) -> Result<Url, DnsError> {
        let mut text = format!(
            "{}://{}{}",
            self.scheme.as_str(),
            self.domain_name.as_str(),
            self.path
        );
        if let Some(query) = &self.query {
            text.push('?');
            text.push_str(query);
        }
        Url::parse(&text).map_err(|_| DnsError::ComponentsFail)
    }

    /// Build the outbound request: when an address was resolved, the URL
    /// targets the IP and the domain travels as the Host header; otherwise
    /// the logical URL is used as-is.
    pub fn transport_request(&self) -> Result<OutboundRequest, DnsError> {
        let mut url = self.logical_url()?;
        if let Some(ip) = self.ip_address {
            url.set_ip_host(ip).map_err(|_| DnsError::HostReplaceFail)?;
        }
        Ok(OutboundRequest {
            url,
            host_header: self.domain_name.as_str().to_string(),
        })
    }
}

impl fmt::Display for AddressInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Display is the logical identity; the resolved address never shows.
        write!(
            f,
            "{}://{}{}",
            self.scheme.as_str(),
            self.domain_name,
            self.path
        )
    }
}
