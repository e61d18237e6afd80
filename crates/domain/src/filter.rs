//! Keyword matching and relevance scoring

use crate::model::Item;

/// An ordered list of lowercase keywords for one topic
#[derive(Debug, Clone, Default)]
pub struct KeywordSet {
    keywords: Vec<String>,
}

impl KeywordSet {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.into().to_lowercase())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Whether the title contains at least one keyword
    ///
    /// Plain substring containment, not word matching: "aiming" hits "ai".
    pub fn matches(&self, title: &str) -> bool {
        let title = title.to_lowercase();
        self.keywords.iter().any(|k| title.contains(k.as_str()))
    }

    /// Count of distinct keywords contained in the title
    pub fn score(&self, title: &str) -> usize {
        let title = title.to_lowercase();
        self.keywords
            .iter()
            .filter(|k| title.contains(k.as_str()))
            .count()
    }
}

/// How a section selects items from its candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterPolicy {
    /// Keep any item with at least one keyword hit, in fetch order
    Presence,
    /// Rank by distinct-hit count descending, dropping zero-score items
    Scored,
}

/// Apply a filtering policy to candidates
///
/// `Scored` uses a stable sort, so items with equal scores keep their
/// fetch order.
pub fn apply_policy<Id>(
    items: Vec<Item<Id>>,
    keywords: &KeywordSet,
    policy: FilterPolicy,
) -> Vec<Item<Id>> {
    match policy {
        FilterPolicy::Presence => items
            .into_iter()
            .filter(|item| keywords.matches(&item.title))
            .collect(),
        FilterPolicy::Scored => {
            let mut scored: Vec<(usize, Item<Id>)> = items
                .into_iter()
                .filter_map(|item| {
                    let score = keywords.score(&item.title);
                    (score > 0).then_some((score, item))
                })
                .collect();
            scored.sort_by(|a, b| b.0.cmp(&a.0));
            scored.into_iter().map(|(_, item)| item).collect()
        }
    }
}
