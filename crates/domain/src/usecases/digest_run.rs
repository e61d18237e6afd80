//! Digest run use case - orchestrates fetch, dedup, filter, render and persist

use std::collections::BTreeSet;
use std::io::Write;
use std::sync::Arc;

use crate::{
    filter::{self, FilterPolicy, KeywordSet},
    model::{Item, Section, SectionEntry},
    ports::{ItemSource, SeenStore, SeenStoreError, SourceError},
    usecases::render::render_digest,
};

/// Configuration for one digest section
#[derive(Debug, Clone)]
pub struct SectionConfig {
    /// Heading shown above the section
    pub title: String,
    /// State namespace for the seen-set
    pub namespace: String,
    /// Topic keywords
    pub keywords: KeywordSet,
    /// Filtering policy
    pub policy: FilterPolicy,
}

/// Errors that abort a single source's section
#[derive(Debug, thiserror::Error)]
pub enum SectionError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] SourceError),
    #[error("seen-set store failed: {0}")]
    State(#[from] SeenStoreError),
}

/// Filtered, deduplicated output of one source
///
/// Held until the digest has been written so seen-state is only committed
/// after a full pass.
#[derive(Debug)]
pub struct PendingSection<Id> {
    pub section: Section,
    pub seen: BTreeSet<Id>,
}

/// One source wired to its seen-set store and section settings
pub struct SourceRun<S, St>
where
    S: ItemSource + ?Sized,
    St: SeenStore<S::Id> + ?Sized,
{
    source: Arc<S>,
    store: Arc<St>,
    config: SectionConfig,
}

impl<S, St> SourceRun<S, St>
where
    S: ItemSource + ?Sized,
    St: SeenStore<S::Id> + ?Sized,
{
    pub fn new(source: Arc<S>, store: Arc<St>, config: SectionConfig) -> Self {
        Self {
            source,
            store,
            config,
        }
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Load state, fetch candidates, and apply dedup plus keyword filtering
    pub async fn collect(&self, limit: usize) -> Result<PendingSection<S::Id>, SectionError> {
        let mut seen = self.store.load(&self.config.namespace).await?;

        let fetched = self.source.fetch(limit).await?;
        let fetched_count = fetched.len();

        let fresh: Vec<Item<S::Id>> = fetched
            .into_iter()
            .filter(|item| !seen.contains(&item.id))
            .collect();
        let fresh_count = fresh.len();

        let emitted = filter::apply_policy(fresh, &self.config.keywords, self.config.policy);

        tracing::info!(
            source = self.source.name(),
            fetched = fetched_count,
            fresh = fresh_count,
            emitted = emitted.len(),
            "Collected candidates"
        );

        seen.extend(emitted.iter().map(|item| item.id.clone()));

        let entries: Vec<SectionEntry> = emitted.iter().map(SectionEntry::from).collect();

        Ok(PendingSection {
            section: Section {
                title: self.config.title.clone(),
                entries,
            },
            seen,
        })
    }

    /// Rewrite the seen-set with this run's emissions folded in
    pub async fn persist(&self, pending: &PendingSection<S::Id>) -> Result<(), SeenStoreError> {
        self.store.save(&self.config.namespace, &pending.seen).await
    }
}

/// Errors from a full digest run
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("failed to write digest: {0}")]
    Output(#[from] std::io::Error),
    #[error("failed to persist seen state for '{namespace}': {source}")]
    Persist {
        namespace: String,
        #[source]
        source: SeenStoreError,
    },
}

/// Per-source summary of one run
#[derive(Debug, Clone)]
pub struct SectionReport {
    pub source: &'static str,
    pub emitted: usize,
    pub error: Option<String>,
}

/// Summary of one run, in fixed source order
#[derive(Debug, Clone)]
pub struct RunReport {
    pub sections: Vec<SectionReport>,
}

/// Digest pipeline orchestrator over the two configured sources
///
/// Linear state machine: load seen-sets, fetch, dedup and filter both
/// sources, write the digest, then persist state. A fetch failure aborts
/// only its own section; the sibling still renders.
pub struct DigestRun<A, SA, F, SF>
where
    A: ItemSource + ?Sized,
    SA: SeenStore<A::Id> + ?Sized,
    F: ItemSource + ?Sized,
    SF: SeenStore<F::Id> + ?Sized,
{
    api: SourceRun<A, SA>,
    feed: SourceRun<F, SF>,
}

impl<A, SA, F, SF> DigestRun<A, SA, F, SF>
where
    A: ItemSource + ?Sized,
    SA: SeenStore<A::Id> + ?Sized,
    F: ItemSource + ?Sized,
    SF: SeenStore<F::Id> + ?Sized,
{
    pub fn new(api: SourceRun<A, SA>, feed: SourceRun<F, SF>) -> Self {
        Self { api, feed }
    }

    /// Execute one full pass, writing the digest to `out`
    ///
    /// Persistence runs unconditionally after the digest is written, even
    /// for sections that emitted zero items. A persist failure surfaces as
    /// the run's error only after both persists were attempted.
    pub async fn execute(
        &self,
        limit: usize,
        out: &mut dyn Write,
    ) -> Result<RunReport, RunError> {
        let api_pending = self.collect_section(&self.api, limit).await;
        let feed_pending = self.collect_section(&self.feed, limit).await;

        let mut sections = Vec::new();
        if let Ok(pending) = &api_pending {
            sections.push(pending.section.clone());
        }
        if let Ok(pending) = &feed_pending {
            sections.push(pending.section.clone());
        }

        out.write_all(render_digest(&sections).as_bytes())?;

        let mut persist_error = None;
        if let Ok(pending) = &api_pending {
            self.persist_section(&self.api, pending, &mut persist_error)
                .await;
        }
        if let Ok(pending) = &feed_pending {
            self.persist_section(&self.feed, pending, &mut persist_error)
                .await;
        }
        if let Some(error) = persist_error {
            return Err(error);
        }

        Ok(RunReport {
            sections: vec![
                section_report(self.api.source_name(), &api_pending),
                section_report(self.feed.source_name(), &feed_pending),
            ],
        })
    }

    async fn collect_section<S, St>(
        &self,
        run: &SourceRun<S, St>,
        limit: usize,
    ) -> Result<PendingSection<S::Id>, String>
    where
        S: ItemSource + ?Sized,
        St: SeenStore<S::Id> + ?Sized,
    {
        run.collect(limit).await.map_err(|e| {
            tracing::error!(source = run.source_name(), error = %e, "Section aborted");
            e.to_string()
        })
    }

    async fn persist_section<S, St>(
        &self,
        run: &SourceRun<S, St>,
        pending: &PendingSection<S::Id>,
        first_error: &mut Option<RunError>,
    ) where
        S: ItemSource + ?Sized,
        St: SeenStore<S::Id> + ?Sized,
    {
        if let Err(e) = run.persist(pending).await {
            tracing::error!(source = run.source_name(), error = %e, "Failed to persist seen state");
            first_error.get_or_insert(RunError::Persist {
                namespace: run.config.namespace.clone(),
                source: e,
            });
        }
    }
}

fn section_report<Id>(
    source: &'static str,
    pending: &Result<PendingSection<Id>, String>,
) -> SectionReport {
    match pending {
        Ok(pending) => SectionReport {
            source,
            emitted: pending.section.entries.len(),
            error: None,
        },
        Err(error) => SectionReport {
            source,
            emitted: 0,
            error: Some(error.clone()),
        },
    }
}
