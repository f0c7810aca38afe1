//! HTTPS transport for DoH calls.
//!
//! A DoH lookup is exactly one short GET. The [`DohTransport`] trait keeps
//! that single call injectable so the resolver's parsing and validation can
//! be exercised against scripted responses; [`BoringTransport`] is the
//! production implementation: TCP, a BoringSSL client handshake, and an
//! HTTP/1.1 connection that lives for the one request.

use crate::base::error::DnsError;
use boring::ssl::{SslConnector, SslMethod};
use bytes::Bytes;
use http::{header, Method, Request};
use http_body_util::{BodyExt, Empty};
use hyper::client::conn::http1;
use hyper_util::rt::TokioIo;
use std::{future::Future, pin::Pin, time::Duration};
use tokio::net::TcpStream;
use url::Url;

/// Status and collected body of a DoH endpoint response.
#[derive(Debug, Clone)]
pub struct DohResponse {
    pub status: u16,
    pub body: Bytes,
}

/// Alias for the `Future` type returned by a transport.
pub type Fetching = Pin<Box<dyn Future<Output = Result<DohResponse, DnsError>> + Send>>;

/// One HTTPS GET, abstracted for injection.
pub trait DohTransport: Send + Sync {
    fn get(&self, url: Url) -> Fetching;
}

impl<T: DohTransport + ?Sized> DohTransport for std::sync::Arc<T> {
    fn get(&self, url: Url) -> Fetching {
        (**self).get(url)
    }
}

/// Production transport: tokio TCP + BoringSSL + hyper http1.
///
/// Carries its own deadline, distinct from content-request timeouts, because
/// resolution gates the rest of the load.
#[derive(Debug, Clone)]
pub struct BoringTransport {
    timeout: Duration,
}

impl BoringTransport {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl DohTransport for BoringTransport {
    fn get(&self, url: Url) -> Fetching {
        let deadline = self.timeout;
        Box::pin(async move {
            match tokio::time::timeout(deadline, fetch(url)).await {
                Ok(result) => result,
                Err(_) => Err(DnsError::TimedOut),
            }
        })
    }
}

async fn fetch(url: Url) -> Result<DohResponse, DnsError> {
    if url.scheme() != "https" {
        return Err(DnsError::NotHttpScheme);
    }
    let host = url.host_str().ok_or(DnsError::NoHost)?.to_string();
    let port = url.port_or_known_default().unwrap_or(443);

    // TCP, then TLS against the endpoint host.
    let stream = TcpStream::connect((host.as_str(), port))
        .await
        .map_err(|e| DnsError::Transport(e.to_string()))?;
    let connector = SslConnector::builder(SslMethod::tls())
        .map_err(|e| DnsError::Transport(e.to_string()))?
        .build();
    let config = connector
        .configure()
        .map_err(|e| DnsError::Transport(e.to_string()))?;
    let tls = tokio_boring::connect(config, &host, stream)
        .await
        .map_err(|e| DnsError::Transport(format!("{e:?}")))?;

    // HTTP/1.1 handshake; the connection driver runs until the response
    // body is collected, then the connection is dropped.
    let io = TokioIo::new(tls);
    let (mut sender, conn) = http1::handshake(io)
        .await
        .map_err(|e| DnsError::Transport(e.to_string()))?;
    tokio::spawn(async move {
        if let Err(e) = conn.await {
            tracing::debug!(error = %e, "DoH connection closed with error");
        }
    });

    let mut target = url.path().to_string();
    if let Some(query) = url.query() {
        target.push('?');
        target.push_str(query);
    }
    let request = Request::builder()
        .method(Method::GET)
        .uri(target)
        .header(header::HOST, &host)
        .header(header::ACCEPT, "application/json")
        .body(Empty::<Bytes>::new())
        .map_err(|e| DnsError::Transport(e.to_string()))?;

    let response = sender
        .send_request(request)
        .await
        .map_err(|e| DnsError::Transport(e.to_string()))?;
    let status = response.status().as_u16();
    let body = response
        .into_body()
        .collect()
        .await
        .map_err(|e| DnsError::Transport(e.to_string()))?
        .to_bytes();

    Ok(DohResponse { status, body })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rejects_plain_http_endpoint() {
        let transport = BoringTransport::new(Duration::from_secs(1));
        let err = transport
            .get(Url::parse("http://dns.example/resolve").unwrap())
            .await
            .unwrap_err();
        assert_eq!(err, DnsError::NotHttpScheme);
    }

    #[tokio::test]
    async fn test_connect_failure_maps_to_transport() {
        // Reserved TEST-NET-1 address; nothing listens there.
        let transport = BoringTransport::new(Duration::from_millis(200));
        let err = transport
            .get(Url::parse("https://192.0.2.1/resolve").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DnsError::Transport(_) | DnsError::TimedOut
        ));
    }
}
