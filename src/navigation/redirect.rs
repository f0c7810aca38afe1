//! Ad-redirect classification.
//!
//! Two read-only host-pattern lists — "tracking/ad" and "allow" — loaded
//! once at process start and shared across every tab. The classifier only
//! acts on cross-site navigations: a navigation away from a block-listed
//! site is cancelled unless the target is allow-listed or is a recognized
//! variant of the current site.
//!
//! Load failure is fail-open by policy: a missing or unreadable list file
//! degrades to "allow everything" with a logged warning, never a crash.
//! The degradation is an explicit flag, observable via
//! [`HostBlockLists::fail_open`].

use crate::base::address::same_site;
use crate::navigation::trie::HostTrie;
use std::path::Path;
use std::sync::Arc;

/// Bundled defaults, compiled in so the library works with no data files
/// on disk.
const BUNDLED_BLOCK: &str = include_str!("../../data/adservers.txt");
const BUNDLED_ALLOW: &str = include_str!("../../data/allowlist.txt");

/// The block and allow pattern lists, plus the fail-open flag.
///
/// Immutable after construction; share one instance across all tabs.
#[derive(Debug)]
pub struct HostBlockLists {
    block: HostTrie,
    allow: HostTrie,
    fail_open: bool,
}

impl HostBlockLists {
    /// Build from in-memory pattern iterators. The injectable constructor:
    /// unit tests use synthetic lists instead of a process-wide singleton.
    pub fn from_patterns<'a, B, A>(block: B, allow: A) -> Self
    where
        B: IntoIterator<Item = &'a str>,
        A: IntoIterator<Item = &'a str>,
    {
        Self {
            block: block.into_iter().collect(),
            allow: allow.into_iter().collect(),
            fail_open: false,
        }
    }

    /// The compiled-in default lists.
    pub fn bundled() -> Self {
        Self {
            block: parse_list(BUNDLED_BLOCK),
            allow: parse_list(BUNDLED_ALLOW),
            fail_open: false,
        }
    }

    /// Load both lists from disk. Any read failure yields an empty,
    /// fail-open instance: availability wins over blocking precision here,
    /// and the condition is logged and flagged rather than hidden.
    pub fn load(block_path: &Path, allow_path: &Path) -> Self {
        match (
            std::fs::read_to_string(block_path),
            std::fs::read_to_string(allow_path),
        ) {
            (Ok(block), Ok(allow)) => Self {
                block: parse_list(&block),
                allow: parse_list(&allow),
                fail_open: false,
            },
            (block, _) => {
                let failed = if block.is_err() { block_path } else { allow_path };
                tracing::warn!(
                    path = %failed.display(),
                    "host list unreadable; redirect blocking disabled (fail-open)"
                );
                Self {
                    block: HostTrie::new(),
                    allow: HostTrie::new(),
                    fail_open: true,
                }
            }
        }
    }

    /// Whether list loading failed and blocking is disabled.
    pub fn fail_open(&self) -> bool {
        self.fail_open
    }

    /// First block-list pattern occurring in `host`, if any.
    pub fn block_pattern_for<'h>(&self, host: &'h str) -> Option<&'h str> {
        self.block.first_match(host)
    }

    pub fn is_block_listed(&self, host: &str) -> bool {
        self.block.matches(host)
    }

    pub fn is_allow_listed(&self, host: &str) -> bool {
        self.allow.matches(host)
    }

    pub fn block_len(&self) -> usize {
        self.block.len()
    }

    pub fn allow_len(&self) -> usize {
        self.allow.len()
    }
}

impl Default for HostBlockLists {
    fn default() -> Self {
        Self::bundled()
    }
}

/// One pattern per line; blank lines and `#` comments are skipped.
fn parse_list(text: &str) -> HostTrie {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
}

/// Decides whether a cross-site navigation is a tracking/ad redirect.
#[derive(Debug, Clone)]
pub struct RedirectClassifier {
    lists: Arc<HostBlockLists>,
}

impl RedirectClassifier {
    pub fn new(lists: Arc<HostBlockLists>) -> Self {
        Self { lists }
    }

    /// True when the navigation from `current` to `pending` must be
    /// cancelled as an ad redirect.
    ///
    /// Never blocks when: the hosts are the same site; the lists are in
    /// fail-open mode; `current` is not on the block list (nothing to
    /// protect); `pending` is allow-listed; or `pending` carries the same
    /// block-list pattern that flagged `current` (a variant of the same
    /// family, not an injected redirect).
    pub fn should_block(&self, current: &str, pending: &str) -> bool {
        if self.lists.fail_open() {
            return false;
        }
        if same_site(current, pending) {
            return false;
        }
        let Some(pattern) = self.lists.block_pattern_for(current) else {
            return false;
        };
        if self.lists.is_allow_listed(pending) {
            return false;
        }
        if pending
            .to_ascii_lowercase()
            .contains(&pattern.to_ascii_lowercase())
        {
            return false;
        }
        tracing::debug!(current, pending, "cross-site navigation classified as ad redirect");
        true
    }
}

impl Default for RedirectClassifier {
    fn default() -> Self {
        Self::new(Arc::new(HostBlockLists::bundled()))
    }
}
