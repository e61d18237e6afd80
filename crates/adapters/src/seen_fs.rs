//! JSON-file seen-set store
//!
//! One file per namespace holding a pretty-printed JSON array of
//! identifiers. A missing file loads as the empty set; save rewrites the
//! whole file. `BTreeSet` iteration keeps the serialized array ascending,
//! so state files diff cleanly between runs.

use std::collections::BTreeSet;
use std::path::PathBuf;

use async_trait::async_trait;
use news_digest_domain::{ItemKey, SeenStore, SeenStoreError};
use tokio::fs;

/// Seen-set store keeping one JSON file per namespace under a directory
pub struct JsonSeenStore {
    dir: PathBuf,
}

impl JsonSeenStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, namespace: &str) -> PathBuf {
        self.dir.join(format!("{namespace}.json"))
    }
}

#[async_trait]
impl<Id: ItemKey> SeenStore<Id> for JsonSeenStore {
    async fn load(&self, namespace: &str) -> Result<BTreeSet<Id>, SeenStoreError> {
        let path = self.path_for(namespace);

        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(BTreeSet::new());
            }
            Err(e) => return Err(SeenStoreError::Io(e)),
        };

        serde_json::from_slice(&bytes).map_err(|e| SeenStoreError::Corrupt {
            namespace: namespace.to_string(),
            message: e.to_string(),
        })
    }

    async fn save(&self, namespace: &str, seen: &BTreeSet<Id>) -> Result<(), SeenStoreError> {
        fs::create_dir_all(&self.dir).await?;

        let body = serde_json::to_vec_pretty(seen)
            .map_err(|e| SeenStoreError::Serialization(e.to_string()))?;

        fs::write(self.path_for(namespace), body).await?;

        Ok(())
    }
}
