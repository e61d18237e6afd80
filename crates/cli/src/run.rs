//! Run logic - one digest pass over both sources

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use news_digest_adapters::{AlertsFeedSource, HnItemSource, JsonSeenStore};
use news_digest_domain::{
    filter::{FilterPolicy, KeywordSet},
    usecases::{DigestRun, SectionConfig, SourceRun},
};

use crate::args::Cli;
use crate::config::AppConfig;

pub async fn execute(cli: Cli) -> Result<()> {
    let config = AppConfig::load(cli.config.as_deref())?;
    let limit = cli.limit.unwrap_or(config.general.limit);

    tracing::info!(
        limit = limit,
        state_dir = %config.general.state_dir.display(),
        "Starting digest run"
    );

    let store = Arc::new(JsonSeenStore::new(&config.general.state_dir));

    let hn_source = Arc::new(
        HnItemSource::new().with_item_delay(Duration::from_millis(config.hn.item_delay_ms)),
    );
    let hn_run = SourceRun::new(
        hn_source,
        Arc::clone(&store),
        SectionConfig {
            title: config.hn.section_title.clone(),
            namespace: "hn".to_string(),
            keywords: KeywordSet::new(config.hn.keywords.clone()),
            policy: FilterPolicy::Presence,
        },
    );

    let feed_source = Arc::new(AlertsFeedSource::new(config.alerts.feed_url.clone()));
    let feed_run = SourceRun::new(
        feed_source,
        store,
        SectionConfig {
            title: config.alerts.section_title.clone(),
            namespace: "alerts".to_string(),
            keywords: KeywordSet::new(config.alerts.keywords.clone()),
            policy: FilterPolicy::Scored,
        },
    );

    let digest_run = DigestRun::new(hn_run, feed_run);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let report = digest_run
        .execute(limit, &mut out)
        .await
        .context("Digest run failed")?;
    out.flush()?;

    for section in &report.sections {
        if section.error.is_none() {
            tracing::info!(
                source = section.source,
                emitted = section.emitted,
                "Section complete"
            );
        }
    }

    Ok(())
}
