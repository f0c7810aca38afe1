//! Navigation classification.
//!
//! Everything the coordinator consults when the webview asks "may I go
//! there": the ad-redirect classifier over the shared block/allow lists,
//! the companion native-app table, and the navigation vocabulary itself.

pub mod action;
pub mod nativeapp;
pub mod redirect;
pub mod trie;

pub use action::{NavigationAction, NavigationKind, PolicyDecision};
pub use nativeapp::NativeAppClassifier;
pub use redirect::{HostBlockLists, RedirectClassifier};
pub use trie::HostTrie;
