use thiserror::Error;

/// Failure modes of DNS-over-HTTPS resolution and request rewriting.
///
/// Every failure is a distinct variant so callers can pick a per-variant
/// policy (retry, fall back to a direct load, or fail the attempt) instead
/// of pattern-matching on strings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DnsError {
    /// The resolution was superseded or its owner went away before the
    /// result could be delivered.
    #[error("Resolution cancelled or superseded")]
    Cancelled,

    /// The HTTPS transport to the DoH endpoint failed (connect, TLS, or
    /// stream error).
    #[error("DoH transport failed: {0}")]
    Transport(String),

    /// The DoH endpoint answered with a non-200 status.
    #[error("DoH endpoint returned HTTP {0}")]
    HttpStatus(u16),

    /// The DoH call exceeded its (short) deadline.
    #[error("DoH request timed out")]
    TimedOut,

    /// The URL to resolve is not http or https.
    #[error("URL scheme is not http or https")]
    NotHttpScheme,

    /// The URL to resolve carries no host.
    #[error("URL has no host")]
    NoHost,

    /// The DoH response carried a non-NOERROR status word.
    #[error("DNS responded with status {0}")]
    Status(i32),

    /// The answer section contained no A records.
    #[error("No A records in DNS answer")]
    EmptyAnswers,

    /// An A record's data field did not parse as an IP address.
    #[error("Malformed answer record: {0}")]
    MalformedAnswer(String),

    /// The response body was not the expected JSON shape.
    #[error("DoH response body unreadable: {0}")]
    BadBody(String),

    /// URL components could not be rebuilt into a request URL.
    #[error("URL components could not be rebuilt")]
    ComponentsFail,

    /// Substituting the resolved address into the request URL failed.
    #[error("Host replacement in URL failed")]
    HostReplaceFail,
}

impl DnsError {
    /// Whether a load may recover by falling back to an unresolved
    /// (direct-domain) request. Only URL-rebuild failures are fatal to the
    /// attempt; everything else leaves the original request usable.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, DnsError::ComponentsFail | DnsError::HostReplaceFail)
    }
}
