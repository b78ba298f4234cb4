use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::BvhResult;
use crate::parse::load_bvh_from_file;
use crate::types::BvhDocument;

/// Cache of parsed documents keyed by file path.
///
/// Policy: the map lock is held across the parse, so each key is parsed
/// at most once — the first caller parses while every concurrent caller
/// waits on the lock. Parse failures are returned to the requesting
/// caller and nothing is cached for that key, so a later call retries.
#[derive(Debug, Default)]
pub struct DocumentCache {
    documents: Mutex<HashMap<PathBuf, Arc<BvhDocument>>>,
}

impl DocumentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the parsed document for `path`, parsing it on first use.
    pub fn load(&self, path: impl AsRef<Path>) -> BvhResult<Arc<BvhDocument>> {
        let path = path.as_ref();
        let mut documents = self.documents.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(doc) = documents.get(path) {
            return Ok(Arc::clone(doc));
        }
        let doc = Arc::new(load_bvh_from_file(path)?);
        documents.insert(path.to_path_buf(), Arc::clone(&doc));
        Ok(doc)
    }

    /// Drop a cached document, forcing a re-parse on the next load.
    pub fn evict(&self, path: impl AsRef<Path>) {
        let mut documents = self.documents.lock().unwrap_or_else(|e| e.into_inner());
        documents.remove(path.as_ref());
    }

    pub fn len(&self) -> usize {
        self.documents
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/////////////////////////////////////////////////////////////////////////////////////////////////
