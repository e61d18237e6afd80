//! news-digest adapters crate
//!
//! This crate contains infrastructure adapters implementing the domain ports:
//! - `hn_api`: Hacker News newest-stories source
//! - `alerts_feed`: RSS/Atom alerts feed source
//! - `seen_fs`: JSON-file seen-set store

mod alerts_feed;
mod hn_api;
mod seen_fs;

pub use alerts_feed::AlertsFeedSource;
pub use hn_api::HnItemSource;
pub use seen_fs::JsonSeenStore;
