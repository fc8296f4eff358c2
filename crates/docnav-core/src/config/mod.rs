//! Site configuration: the raw payload and its validated model.
//!
//! The payload ([`raw::RawConfig`]) is parsed from JSON, TOML or the
//! generator's script file, then validated once into a
//! [`model::ConfigModel`] that every other component reads from.

pub mod model;
pub mod raw;
pub mod sidebar;

pub use model::{ConfigModel, Presentation, SearchMode, SearchSettings};
pub use raw::{AccessLabel, LanguageId, RawConfig, RawSidebarNode, ToolbarLink};
pub use sidebar::{NodeId, SidebarNode, SidebarTree};
