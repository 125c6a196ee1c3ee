//! Read-only corpus cache shared across workers.

use crate::corpus::Corpus;
use crate::error::CorpusError;
use crate::parser::parse;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

type Slot = Arc<Mutex<Option<Arc<Corpus>>>>;

/// Parses each root problem at most once and hands out shared corpora.
///
/// Different problems parse concurrently; concurrent requests for the same
/// problem wait on that problem's slot. Failed parses are not cached.
#[derive(Debug)]
pub struct CorpusCache {
    root_dir: PathBuf,
    slots: Mutex<HashMap<PathBuf, Slot>>,
}

impl CorpusCache {
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// The corpus for `root_file`, parsing it on first request.
    pub fn get_or_parse(&self, root_file: impl AsRef<Path>) -> Result<Arc<Corpus>, CorpusError> {
        let key = self.key_for(root_file.as_ref());
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(slots.entry(key.clone()).or_default())
        };

        let mut entry = slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(corpus) = entry.as_ref() {
            return Ok(Arc::clone(corpus));
        }
        let corpus = Arc::new(parse(&key, &self.root_dir)?);
        *entry = Some(Arc::clone(&corpus));
        Ok(corpus)
    }

    /// Number of problems currently cached.
    pub fn len(&self) -> usize {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots
            .values()
            .filter(|slot| {
                slot.lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .is_some()
            })
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn key_for(&self, root_file: &Path) -> PathBuf {
        let located = if root_file.is_relative() && !root_file.exists() {
            self.root_dir.join(root_file)
        } else {
            root_file.to_path_buf()
        };
        fs::canonicalize(&located).unwrap_or(located)
    }
}
