//! Per-tab load state.

use crate::base::address::AddressInfo;
use crate::base::error::DnsError;
use crate::base::settings::LoadSettings;

/// The current state of one tab's page load.
///
/// Owned exclusively by that tab's coordinator; the view layer observes it
/// through the coordinator's notification channel and renders from the
/// payloads (URL bar content, progress, button enablement).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PageLoadState {
    /// Nothing loaded; fresh or reset tab.
    #[default]
    Idle,

    /// DoH resolution for the address is in flight.
    ResolvingDomainName {
        address: AddressInfo,
        settings: LoadSettings,
    },

    /// The webview is fetching and rendering the (possibly IP-rewritten)
    /// request.
    UpdatingTransport {
        settings: LoadSettings,
        address: AddressInfo,
    },

    /// The page finished loading.
    Viewing {
        settings: LoadSettings,
        address: AddressInfo,
    },

    /// The load attempt failed fatally (URL rebuild errors only; DNS
    /// failures fall back instead of landing here).
    Failed(DnsError),
}

impl PageLoadState {
    /// The address payload, when the state carries one.
    pub fn address(&self) -> Option<&AddressInfo> {
        match self {
            PageLoadState::ResolvingDomainName { address, .. }
            | PageLoadState::UpdatingTransport { address, .. }
            | PageLoadState::Viewing { address, .. } => Some(address),
            PageLoadState::Idle | PageLoadState::Failed(_) => None,
        }
    }

    /// The settings snapshot the current load runs under.
    pub fn settings(&self) -> Option<&LoadSettings> {
        match self {
            PageLoadState::ResolvingDomainName { settings, .. }
            | PageLoadState::UpdatingTransport { settings, .. }
            | PageLoadState::Viewing { settings, .. } => Some(settings),
            PageLoadState::Idle | PageLoadState::Failed(_) => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, PageLoadState::Idle)
    }

    pub fn is_viewing(&self) -> bool {
        matches!(self, PageLoadState::Viewing { .. })
    }

    /// True while a load is in progress (resolving or fetching).
    pub fn is_loading(&self) -> bool {
        matches!(
            self,
            PageLoadState::ResolvingDomainName { .. } | PageLoadState::UpdatingTransport { .. }
        )
    }

    /// Short name for structured logging.
    pub fn name(&self) -> &'static str {
        match self {
            PageLoadState::Idle => "idle",
            PageLoadState::ResolvingDomainName { .. } => "resolving_domain_name",
            PageLoadState::UpdatingTransport { .. } => "updating_transport",
            PageLoadState::Viewing { .. } => "viewing",
            PageLoadState::Failed(_) => "failed",
        }
    }
}
