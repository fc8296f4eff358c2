//! docnav core library — navigation and search for documentation sites.
//!
//! `docnav-core` gives a documentation site's declarative configuration
//! (sidebar tree, toolbar categories, access labels, search settings) its
//! runtime behaviour. It is intentionally decoupled from any renderer: a
//! frontend loads a [`ConfigModel`], starts a [`NavigationController`] per
//! reading session and feeds it [`Command`]s.
//!
//! # Modules
//!
//! - [`config`] — Raw payload parsing (JSON, TOML, generator script) and the validated [`ConfigModel`].
//! - [`nav`] — Sidebar [`TreeIndex`], sidebar/toolbar filtering and the visit [`HistoryTracker`].
//! - [`search`] — Member-name [`SearchEngine`] honouring `minChars`/`maxResults`/languages.
//! - [`controller`] — [`NavigationController`], the per-session orchestrator.
//! - [`event`] — Command and event types for renderer ↔ core communication.
//! - [`error`] — [`ValidationError`], [`CoreError`] and the [`CoreResult`] alias.

pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod nav;
pub mod search;

pub use config::{
    AccessLabel, ConfigModel, LanguageId, NodeId, Presentation, RawConfig, RawSidebarNode,
    SearchMode, SearchSettings, SidebarNode, SidebarTree, ToolbarLink,
};
pub use controller::{NavigationController, ViewState};
pub use error::{CoreError, CoreResult, ValidationError};
pub use event::{Command, Event, NavigationTarget, Surface};
pub use nav::filter::{filter_sidebar, filter_toolbar};
pub use nav::history::{HistoryEntry, HistoryTracker};
pub use nav::tree::{FlatNode, TreeIndex};
pub use search::{NameMatcher, SearchEngine, SearchHit, SubsequenceMatcher, SubstringMatcher};

/// Normalises a string to NFC (composed) form.
///
/// Labels and queries may arrive in decomposed form (e.g. from macOS file
/// names or pasted text); composing both sides keeps `é` equal to `e` + `◌́`.
pub fn nfc_string(s: &str) -> String {
    use unicode_normalization::UnicodeNormalization;
    s.nfc().collect()
}
