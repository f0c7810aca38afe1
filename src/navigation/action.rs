//! Navigation attempt vocabulary.
//!
//! Mirrors what the webview reports when it asks for a policy decision:
//! the target URL plus how the navigation was triggered.

use url::Url;

/// How a pending navigation was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKind {
    /// User activated a link.
    LinkActivated,
    /// Form submission.
    FormSubmitted,
    /// History traversal.
    BackForward,
    /// Page reload.
    Reload,
    /// Server- or script-driven redirect.
    Redirect,
    /// Anything else the webview reports.
    Other,
}

/// A pending navigation awaiting a policy decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationAction {
    pub url: Url,
    pub kind: NavigationKind,
}

impl NavigationAction {
    pub fn new(url: Url, kind: NavigationKind) -> Self {
        Self { url, kind }
    }

    /// The pending host, when the target URL carries one.
    pub fn host(&self) -> Option<&str> {
        self.url.host_str()
    }
}

/// Verdict returned to the webview for a pending navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyDecision {
    Allow,
    Cancel,
}

impl PolicyDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, PolicyDecision::Allow)
    }
}
