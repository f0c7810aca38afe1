//! DNS-over-HTTPS JSON resolution.
//!
//! The canonical resolution algorithm lives here, once. The concurrency
//! adapters in [`crate::dns::backend`] only change the calling convention.
//!
//! A lookup is a GET against a JSON resolve endpoint with a fixed parameter
//! set, answered by a body of the shape
//! `{"Status": 0, "Answer": [{"name": ..., "type": 1, "data": "1.2.3.4"}]}`.
//! Only A records (type 1) are considered, and only the first one wins.
//! No retries, no caching: retry policy belongs to the coordinator, and
//! every cross-site navigation deliberately re-resolves.

use crate::base::address::DomainName;
use crate::base::error::DnsError;
use crate::base::settings::DohConfig;
use crate::dns::resolve::{Resolve, Resolving};
use crate::dns::transport::{BoringTransport, DohTransport};
use serde::Deserialize;
use std::{net::IpAddr, sync::Arc};
use url::Url;

/// RR type for IPv4 address records.
const TYPE_A: u32 = 1;

#[derive(Debug, Deserialize)]
struct DohBody {
    #[serde(rename = "Status")]
    status: i32,
    #[serde(rename = "Answer", default)]
    answer: Vec<DohAnswer>,
}

#[derive(Debug, Deserialize)]
struct DohAnswer {
    #[serde(rename = "type")]
    rr_type: u32,
    data: String,
}

/// DoH resolver over an injectable transport.
#[derive(Clone)]
pub struct DohResolver {
    endpoint: Url,
    transport: Arc<dyn DohTransport>,
}

impl DohResolver {
    /// Production resolver against the configured endpoint.
    pub fn new(config: &DohConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            transport: Arc::new(BoringTransport::new(config.timeout)),
        }
    }

    /// Resolver with a caller-supplied transport. Tests script the
    /// transport; production has no reason to.
    pub fn with_transport(endpoint: Url, transport: Arc<dyn DohTransport>) -> Self {
        Self { endpoint, transport }
    }

    /// The query URL for one lookup. The parameter set is fixed, not
    /// configurable per call.
    fn query_url(&self, name: &DomainName) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair("name", name.as_str())
            .append_pair("type", "1")
            .append_pair("cd", "false")
            .append_pair("ct", "")
            .append_pair("do", "false")
            .append_pair("edns_client_subnet", "0.0.0.0/0")
            .append_pair("random_padding", "");
        url
    }

    /// Canonical lookup: one GET, one typed outcome.
    pub async fn lookup(&self, name: &DomainName) -> Result<IpAddr, DnsError> {
        tracing::debug!(domain = %name, "resolving via DoH");
        let response = self.transport.get(self.query_url(name)).await?;

        if response.status != 200 {
            tracing::debug!(domain = %name, status = response.status, "DoH endpoint rejected query");
            return Err(DnsError::HttpStatus(response.status));
        }

        let body: DohBody = serde_json::from_slice(&response.body)
            .map_err(|e| DnsError::BadBody(e.to_string()))?;

        if body.status != 0 {
            return Err(DnsError::Status(body.status));
        }

        let answer = body
            .answer
            .iter()
            .find(|a| a.rr_type == TYPE_A)
            .ok_or(DnsError::EmptyAnswers)?;

        let ip: IpAddr = answer
            .data
            .parse()
            .map_err(|_| DnsError::MalformedAnswer(answer.data.clone()))?;

        tracing::debug!(domain = %name, ip = %ip, "DoH resolution complete");
        Ok(ip)
    }
}

impl Resolve for DohResolver {
    fn resolve(&self, name: DomainName) -> Resolving {
        let resolver = self.clone();
        Box::pin(async move { resolver.lookup(&name).await })
    }
}

impl std::fmt::Debug for DohResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DohResolver")
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::transport::{DohResponse, Fetching};
    use bytes::Bytes;

    struct ScriptedTransport {
        response: Result<DohResponse, DnsError>,
    }

    impl DohTransport for ScriptedTransport {
        fn get(&self, _url: Url) -> Fetching {
            let response = self.response.clone();
            Box::pin(async move { response })
        }
    }

    fn resolver_with_body(status: u16, body: &str) -> DohResolver {
        DohResolver::with_transport(
            Url::parse("https://dns.google/resolve").unwrap(),
            Arc::new(ScriptedTransport {
                response: Ok(DohResponse {
                    status,
                    body: Bytes::copy_from_slice(body.as_bytes()),
                }),
            }),
        )
    }

    fn name(host: &str) -> DomainName {
        DomainName::new(host).unwrap()
    }

    #[test]
    fn test_query_url_carries_fixed_parameters() {
        let resolver = resolver_with_body(200, "{}");
        let url = resolver.query_url(&name("example.com"));

        let query = url.query().unwrap();
        assert!(query.contains("name=example.com"));
        assert!(query.contains("type=1"));
        assert!(query.contains("cd=false"));
        assert!(query.contains("do=false"));
        assert!(query.contains("edns_client_subnet=0.0.0.0%2F0"));
        assert!(query.contains("random_padding="));
    }

    #[tokio::test]
    async fn test_single_a_record() {
        let resolver = resolver_with_body(
            200,
            r#"{"Status":0,"Answer":[{"name":"example.com","type":1,"data":"93.184.216.34"}]}"#,
        );
        let ip = resolver.lookup(&name("example.com")).await.unwrap();
        assert_eq!(ip, "93.184.216.34".parse::<IpAddr>().unwrap());
    }

    #[tokio::test]
    async fn test_skips_non_a_records() {
        // CNAME (type 5) first; the A record after it must win.
        let resolver = resolver_with_body(
            200,
            r#"{"Status":0,"Answer":[
                {"name":"example.com","type":5,"data":"alias.example.net."},
                {"name":"alias.example.net","type":1,"data":"203.0.113.9"}
            ]}"#,
        );
        let ip = resolver.lookup(&name("example.com")).await.unwrap();
        assert_eq!(ip, "203.0.113.9".parse::<IpAddr>().unwrap());
    }

    #[tokio::test]
    async fn test_nonzero_status_fails_typed() {
        let resolver = resolver_with_body(200, r#"{"Status":3,"Answer":[]}"#);
        let err = resolver.lookup(&name("nxdomain.example")).await.unwrap_err();
        assert_eq!(err, DnsError::Status(3));
    }

    #[tokio::test]
    async fn test_no_a_records_is_empty_answers() {
        let resolver = resolver_with_body(
            200,
            r#"{"Status":0,"Answer":[{"name":"example.com","type":28,"data":"2606:2800::1"}]}"#,
        );
        let err = resolver.lookup(&name("example.com")).await.unwrap_err();
        assert_eq!(err, DnsError::EmptyAnswers);
    }

    #[tokio::test]
    async fn test_missing_answer_array_is_empty_answers() {
        let resolver = resolver_with_body(200, r#"{"Status":0}"#);
        let err = resolver.lookup(&name("example.com")).await.unwrap_err();
        assert_eq!(err, DnsError::EmptyAnswers);
    }

    #[tokio::test]
    async fn test_http_error_is_typed() {
        let resolver = resolver_with_body(503, "");
        let err = resolver.lookup(&name("example.com")).await.unwrap_err();
        assert_eq!(err, DnsError::HttpStatus(503));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let resolver = resolver_with_body(200, "not json");
        let err = resolver.lookup(&name("example.com")).await.unwrap_err();
        assert!(matches!(err, DnsError::BadBody(_)));
    }

    #[tokio::test]
    async fn test_unparseable_address_data() {
        let resolver = resolver_with_body(
            200,
            r#"{"Status":0,"Answer":[{"name":"example.com","type":1,"data":"not-an-ip"}]}"#,
        );
        let err = resolver.lookup(&name("example.com")).await.unwrap_err();
        assert_eq!(err, DnsError::MalformedAnswer("not-an-ip".into()));
    }
}
