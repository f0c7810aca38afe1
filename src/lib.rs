//! # tabnet
//!
//! A per-tab page-load coordination library for browsers.
//!
//! `tabnet` decides, for every URL a tab wants to show, whether and how to
//! resolve the hostname over DNS-over-HTTPS, how to rewrite the outbound
//! request to target the resolved address while the original host stays the
//! page's logical identity, how to classify navigation attempts (same-site,
//! ad redirect, native-app deep link), and drives each load through a small
//! per-tab state machine.
//!
//! ## Features
//!
//! - **DoH resolution**: JSON DoH with a fixed query contract, typed
//!   failures, and a short transport deadline
//! - **Three concurrency back-ends**: stream, promise, and structured async
//!   delivery over one canonical resolution
//! - **Ad-redirect blocking**: trie-backed block/allow host lists, loaded
//!   once and shared across tabs, fail-open by policy
//! - **Native-app detection**: companion-app hints for known hosts
//! - **Silent DNS degradation**: a failed resolution falls back to a direct
//!   load; DoH is never a load precondition
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tabnet::base::{DohConfig, LoadSettings};
//! use tabnet::coordinator::PageLoadCoordinator;
//! use tabnet::navigation::HostBlockLists;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let lists = Arc::new(HostBlockLists::bundled());
//!     let settings = LoadSettings { doh_enabled: true, ..Default::default() };
//!     let mut tab = PageLoadCoordinator::with_doh(&DohConfig::default(), lists, settings);
//!
//!     let mut states = tab.subscribe();
//!     tab.load("https://example.com/").await.unwrap();
//!     println!("state: {:?}", states.borrow().name());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Core value types, settings, and error definitions
//! - [`dns`] - DoH resolution strategy and concurrency back-ends
//! - [`navigation`] - Redirect and native-app classifiers
//! - [`coordinator`] - The per-tab load state machine
//!
//! ## Concurrency
//!
//! A coordinator is single-owner per tab: one load in flight, mutation only
//! through `&mut self`, stale resolution results dropped by generation
//! check. The block/allow lists are immutable after startup and shared
//! across all tabs without synchronization.

pub mod base;
pub mod coordinator;
pub mod dns;
pub mod navigation;
