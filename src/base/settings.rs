//! Per-tab load configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Per-tab settings captured at the start of each load.
///
/// A snapshot is taken when a load begins and is never updated mid-flight;
/// changing a setting takes effect on the next load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadSettings {
    pub javascript_enabled: bool,
    pub doh_enabled: bool,
    pub popups_blocked: bool,
    pub plugins_allowed: bool,
}

impl Default for LoadSettings {
    fn default() -> Self {
        Self {
            javascript_enabled: true,
            doh_enabled: false,
            popups_blocked: true,
            plugins_allowed: false,
        }
    }
}

/// Calling convention used to deliver DNS results to the coordinator.
///
/// All three wrap the same canonical resolution; outcomes are identical for
/// identical inputs. The flag exists so the embedder can match whatever
/// concurrency style its UI layer is built around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConcurrencyBackend {
    /// Producer stream with an explicit lifetime: dropping it cancels.
    Stream,
    /// Single-shot promise with an abort-on-drop handle.
    Future,
    /// Structured async with cooperative cancellation.
    #[default]
    Task,
}

/// DNS-over-HTTPS endpoint configuration.
#[derive(Debug, Clone)]
pub struct DohConfig {
    /// JSON resolve endpoint. Query parameters are appended per call.
    pub endpoint: Url,
    /// Deadline for the whole DoH call. Deliberately short: resolution gates
    /// the rest of the load, unlike ordinary content requests.
    pub timeout: Duration,
    pub backend: ConcurrencyBackend,
}

impl Default for DohConfig {
    fn default() -> Self {
        Self {
            // Statically valid; parsing cannot fail.
            endpoint: Url::parse("https://dns.google/resolve").unwrap(),
            timeout: Duration::from_secs(3),
            backend: ConcurrencyBackend::Task,
        }
    }
}
