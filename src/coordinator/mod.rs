//! Per-tab page-load coordination.
//!
//! One [`PageLoadCoordinator`] per tab. It receives load and navigation
//! events from the view layer, drives DNS-over-HTTPS resolution when the
//! tab's settings ask for it, rewrites the outbound request to target the
//! resolved address while the domain stays the logical identity, classifies
//! every navigation attempt, and emits state transitions for the view layer
//! to render. It never touches UI controls.
//!
//! # Ownership and cancellation
//!
//! The coordinator is single-owner: all mutation goes through `&mut self`
//! on whatever context owns the tab, so state is never touched from two
//! places at once. At most one load is in flight; starting a new load (or
//! resetting the tab) bumps a generation counter, and any resolution result
//! carrying a stale generation is dropped without touching state —
//! completion order is never trusted.

mod history;
mod state;

pub use history::BackForwardList;
pub use state::PageLoadState;

use crate::base::address::{AddressInfo, OutboundRequest};
use crate::base::error::DnsError;
use crate::base::settings::{ConcurrencyBackend, DohConfig, LoadSettings};
use crate::dns::backend::resolve_via;
use crate::dns::{DohResolver, Resolve};
use crate::navigation::{
    HostBlockLists, NativeAppClassifier, NavigationAction, PolicyDecision, RedirectClassifier,
};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use url::Url;

/// Side-channel notice that the pending host has a companion native app.
/// Informational only; never changes an allow/cancel verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeAppHint {
    pub host: String,
    pub app: &'static str,
}

/// Whether the next `finish` commits a new history entry or keeps the
/// cursor where a back/forward/reload traversal put it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistoryMode {
    Record,
    Keep,
}

/// The per-tab load orchestrator.
pub struct PageLoadCoordinator {
    state: PageLoadState,
    settings: LoadSettings,
    backend: ConcurrencyBackend,
    resolver: Arc<dyn Resolve>,
    redirect: RedirectClassifier,
    native_apps: NativeAppClassifier,
    history: BackForwardList,
    history_mode: HistoryMode,
    generation: u64,
    outbound: Option<OutboundRequest>,
    state_tx: watch::Sender<PageLoadState>,
    app_tx: mpsc::UnboundedSender<NativeAppHint>,
    app_rx: Option<mpsc::UnboundedReceiver<NativeAppHint>>,
}

impl PageLoadCoordinator {
    pub fn new(
        resolver: Arc<dyn Resolve>,
        lists: Arc<HostBlockLists>,
        settings: LoadSettings,
        backend: ConcurrencyBackend,
    ) -> Self {
        let (state_tx, _) = watch::channel(PageLoadState::Idle);
        let (app_tx, app_rx) = mpsc::unbounded_channel();
        Self {
            state: PageLoadState::Idle,
            settings,
            backend,
            resolver,
            redirect: RedirectClassifier::new(lists),
            native_apps: NativeAppClassifier::new(),
            history: BackForwardList::new(),
            history_mode: HistoryMode::Record,
            generation: 0,
            outbound: None,
            state_tx,
            app_tx,
            app_rx: Some(app_rx),
        }
    }

    /// Coordinator wired to a production DoH resolver.
    pub fn with_doh(
        config: &DohConfig,
        lists: Arc<HostBlockLists>,
        settings: LoadSettings,
    ) -> Self {
        Self::new(
            Arc::new(DohResolver::new(config)),
            lists,
            settings,
            config.backend,
        )
    }

    /// Replace the companion-app table.
    pub fn set_native_apps(&mut self, classifier: NativeAppClassifier) {
        self.native_apps = classifier;
    }

    /// Update the live settings. Takes effect at the next load; the
    /// in-flight snapshot is never touched.
    pub fn set_settings(&mut self, settings: LoadSettings) {
        self.settings = settings;
    }

    pub fn state(&self) -> &PageLoadState {
        &self.state
    }

    /// Latest-value stream of state transitions for the view layer.
    pub fn subscribe(&self) -> watch::Receiver<PageLoadState> {
        self.state_tx.subscribe()
    }

    /// The native-app hint side channel. Yields the receiver once; the view
    /// layer owns it from then on.
    pub fn take_app_hints(&mut self) -> Option<mpsc::UnboundedReceiver<NativeAppHint>> {
        self.app_rx.take()
    }

    /// The request the webview should issue for the current load, when one
    /// has been prepared.
    pub fn outbound_request(&self) -> Option<&OutboundRequest> {
        self.outbound.as_ref()
    }

    pub fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.history.can_go_forward()
    }

    /// Load a URL given by user entry, search, or an external link.
    pub async fn load(&mut self, input: &str) -> Result<(), DnsError> {
        let address = match AddressInfo::parse(input) {
            Ok(address) => address,
            Err(err) => {
                self.fail(err.clone());
                return Err(err);
            }
        };
        self.history_mode = HistoryMode::Record;
        self.start_load(address).await
    }

    /// Reload the current entry, re-snapshotting settings and re-resolving
    /// if DoH is enabled.
    pub async fn reload(&mut self) -> Result<(), DnsError> {
        let Some(address) = self
            .state
            .address()
            .or_else(|| self.history.current())
            .cloned()
        else {
            return Ok(());
        };
        self.history_mode = HistoryMode::Keep;
        self.start_load(address).await
    }

    /// Traverse one entry back, re-driving the load for it.
    pub async fn go_back(&mut self) -> Result<(), DnsError> {
        let Some(address) = self.history.back().cloned() else {
            return Ok(());
        };
        self.history_mode = HistoryMode::Keep;
        self.start_load(address).await
    }

    /// Traverse one entry forward, re-driving the load for it.
    pub async fn go_forward(&mut self) -> Result<(), DnsError> {
        let Some(address) = self.history.forward().cloned() else {
            return Ok(());
        };
        self.history_mode = HistoryMode::Keep;
        self.start_load(address).await
    }

    /// Policy decision for a pending navigation. Called by the webview for
    /// every navigation attempt, redirects included.
    pub async fn decide_policy(&mut self, action: &NavigationAction) -> PolicyDecision {
        let Some(pending_host) = action.host().map(str::to_string) else {
            // No host to classify (about:, data:, ...): nothing to protect.
            tracing::debug!(url = %action.url, "hostless navigation allowed");
            return PolicyDecision::Allow;
        };

        // Companion-app detection runs on every attempt, independent of the
        // verdict below.
        if let Some(app) = self.native_apps.matching_app(&pending_host) {
            let _ = self.app_tx.send(NativeAppHint {
                host: pending_host.clone(),
                app,
            });
        }

        let current = self.state.address().cloned();
        match current {
            Some(address) if address.is_same_site(&pending_host) => {
                // Same site: keep any resolved address, update the path,
                // and skip a second resolution.
                let updated = address.with_path_of(&action.url);
                self.generation += 1;
                self.history_mode = HistoryMode::Record;
                let _ = self.enter_transport(self.settings, updated);
                PolicyDecision::Allow
            }
            Some(address) => {
                let current_host = address.domain_name().as_str();
                if self.redirect.should_block(current_host, &pending_host) {
                    tracing::debug!(
                        current = current_host,
                        pending = %pending_host,
                        "navigation cancelled as ad redirect"
                    );
                    return PolicyDecision::Cancel;
                }
                match AddressInfo::from_url(&action.url) {
                    Ok(next) => {
                        self.history_mode = HistoryMode::Record;
                        let _ = self.start_load(next).await;
                    }
                    Err(err) => {
                        // Not loadable as a page (foreign scheme); let the
                        // webview hand it to the system.
                        tracing::debug!(url = %action.url, error = %err, "navigation not coordinated");
                    }
                }
                PolicyDecision::Allow
            }
            None => {
                // Idle or failed tab: treat as a fresh load.
                if let Ok(next) = AddressInfo::from_url(&action.url) {
                    self.history_mode = HistoryMode::Record;
                    let _ = self.start_load(next).await;
                }
                PolicyDecision::Allow
            }
        }
    }

    /// The webview finished loading `url`.
    pub fn finish(&mut self, url: &Url) {
        let PageLoadState::UpdatingTransport { settings, address } = &self.state else {
            tracing::debug!(state = self.state.name(), "finish ignored outside transport");
            return;
        };
        let settings = *settings;
        let address = match url.host_str() {
            Some(host) if address.is_same_site(host) => address.with_path_of(url),
            _ => address.clone(),
        };
        if self.history_mode == HistoryMode::Record {
            self.history.record(address.clone());
        }
        self.history_mode = HistoryMode::Record;
        self.set_state(PageLoadState::Viewing { settings, address });
    }

    /// Reset the tab to blank. Discards any in-flight resolution: results
    /// for earlier generations are dropped on arrival.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.outbound = None;
        self.history_mode = HistoryMode::Record;
        self.set_state(PageLoadState::Idle);
    }

    /// Start a load for `address`, superseding anything in flight.
    ///
    /// Resolution is the only suspension point. The address always enters
    /// unresolved; an IP only ever comes from the resolution below, so a
    /// fallback load is guaranteed to be the original request.
    async fn start_load(&mut self, address: AddressInfo) -> Result<(), DnsError> {
        let address = address.without_ip_address();
        self.generation += 1;
        let generation = self.generation;
        let settings = self.settings;

        if !settings.doh_enabled {
            return self.enter_transport(settings, address);
        }

        self.set_state(PageLoadState::ResolvingDomainName {
            address: address.clone(),
            settings,
        });
        let result = resolve_via(
            self.backend,
            self.resolver.clone(),
            address.domain_name().clone(),
        )
        .await;
        self.apply_resolution(generation, settings, address, result)
    }

    /// Apply a resolution outcome, unless it is stale.
    fn apply_resolution(
        &mut self,
        generation: u64,
        settings: LoadSettings,
        address: AddressInfo,
        result: Result<std::net::IpAddr, DnsError>,
    ) -> Result<(), DnsError> {
        if generation != self.generation {
            tracing::debug!(domain = %address.domain_name(), "stale resolution dropped");
            return Ok(());
        }
        match result {
            Ok(ip) => self.enter_transport(settings, address.with_ip_address(ip)),
            Err(err) if err.is_recoverable() => {
                // DoH is an optimization, not a precondition: degrade to a
                // direct load of the original request, visibly in the state
                // stream, with no user-facing error.
                tracing::debug!(
                    domain = %address.domain_name(),
                    error = %err,
                    "DoH failed; falling back to direct load"
                );
                self.enter_transport(settings, address)
            }
            Err(err) => {
                self.fail(err.clone());
                Err(err)
            }
        }
    }

    /// Hand the load to the webview: build the outbound request and move to
    /// `UpdatingTransport`. Rebuild failures fail this attempt only.
    fn enter_transport(
        &mut self,
        settings: LoadSettings,
        address: AddressInfo,
    ) -> Result<(), DnsError> {
        match address.transport_request() {
            Ok(request) => {
                self.outbound = Some(request);
                self.set_state(PageLoadState::UpdatingTransport { settings, address });
                Ok(())
            }
            Err(err) => {
                self.fail(err.clone());
                Err(err)
            }
        }
    }

    fn fail(&mut self, err: DnsError) {
        tracing::warn!(error = %err, "page load failed");
        self.outbound = None;
        self.set_state(PageLoadState::Failed(err));
    }

    fn set_state(&mut self, state: PageLoadState) {
        tracing::debug!(state = state.name(), "page load state");
        self.state = state.clone();
        self.state_tx.send_replace(state);
    }
}

impl std::fmt::Debug for PageLoadCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageLoadCoordinator")
            .field("state", &self.state.name())
            .field("backend", &self.backend)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}
