//! Domain models and value objects

use std::fmt::Display;
use std::hash::Hash;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Bounds required of a source-scoped item identifier
///
/// Identifiers are ordered so persisted seen-sets serialize ascending,
/// which keeps the state files stable and diff-friendly across runs.
pub trait ItemKey:
    Clone + Eq + Ord + Hash + Display + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

impl<T> ItemKey for T where
    T: Clone + Eq + Ord + Hash + Display + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

/// A normalized candidate record from one source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item<Id> {
    /// Identifier within the source namespace
    pub id: Id,
    /// Headline text, never empty
    pub title: String,
    /// Link to the full story
    pub url: String,
}

/// Outcome of resolving a single candidate from a source
///
/// Missing mandatory fields are data-quality noise and drop silently;
/// a failed lookup is logged with the offending identifier and cause.
#[derive(Debug, Clone)]
pub enum ItemOutcome<Id> {
    /// Candidate resolved to a complete item
    Resolved(Item<Id>),
    /// Payload was readable but lacked a mandatory field
    Malformed,
    /// Lookup for this candidate failed
    Failed(String),
}

/// One entry of a digest section, ready for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionEntry {
    pub title: String,
    pub url: String,
}

impl<Id> From<&Item<Id>> for SectionEntry {
    fn from(item: &Item<Id>) -> Self {
        Self {
            title: item.title.clone(),
            url: item.url.clone(),
        }
    }
}

/// A titled group of filtered items in emit order
#[derive(Debug, Clone)]
pub struct Section {
    pub title: String,
    pub entries: Vec<SectionEntry>,
}
