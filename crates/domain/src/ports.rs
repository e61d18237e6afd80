//! Port definitions (traits) for external dependencies
//!
//! These traits define the boundaries between the domain and external systems.
//! Adapters implement these traits to connect to real infrastructure.

use std::collections::BTreeSet;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{Item, ItemKey};

/// Error type for bulk fetch operations on a source
///
/// Every variant is fatal for the affected source's section: without the
/// candidate listing there is no item set to work with. Failures on
/// individual item lookups stay inside the adapter and surface as
/// [`crate::model::ItemOutcome`] values instead.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },
    #[error("unexpected payload shape: {0}")]
    Payload(String),
}

/// Port for fetching candidate items from one external provider
#[async_trait]
pub trait ItemSource: Send + Sync {
    /// Identifier type within this source's namespace
    type Id: ItemKey;

    /// Short name used for logging and state namespacing
    fn name(&self) -> &'static str;

    /// Fetch up to `limit` normalized items, in provider order
    async fn fetch(&self, limit: usize) -> Result<Vec<Item<Self::Id>>, SourceError>;
}

/// Error type for seen-set store operations
#[derive(Debug, Error)]
pub enum SeenStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("corrupt state for namespace '{namespace}': {message}")]
    Corrupt { namespace: String, message: String },
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Port for persisting the set of already-emitted identifiers
///
/// A missing namespace is a normal first-run condition and loads as an
/// empty set. `save` rewrites the full set; callers only ever pass the
/// union of the previously loaded set and this run's emitted identifiers,
/// so the persisted history never shrinks.
#[async_trait]
pub trait SeenStore<Id: ItemKey>: Send + Sync {
    async fn load(&self, namespace: &str) -> Result<BTreeSet<Id>, SeenStoreError>;

    async fn save(&self, namespace: &str, seen: &BTreeSet<Id>) -> Result<(), SeenStoreError>;
}
