//! Navigation logic for docnav.
//!
//! This module contains the sidebar [`tree::TreeIndex`], sidebar and toolbar
//! [`filter`]ing, and the visit [`history::HistoryTracker`].

pub mod filter;
pub mod history;
pub mod tree;
