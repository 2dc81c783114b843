//! Document service
//!
//! Loads server-driven UI documents and decodes them into component trees.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{Component, ComponentType, Decoder};
use crate::infrastructure::traits::FileSystem;

/// Summary of a decoded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReport {
    /// Id of the root component
    pub root: String,
    /// Number of components per type
    pub counts: BTreeMap<ComponentType, usize>,
    /// Levels in the tree (a lone leaf is 1)
    pub depth: usize,
    /// Ids used by more than one component, in order of their second occurrence
    pub duplicate_ids: Vec<String>,
}

impl DocumentReport {
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

/// Service for loading and inspecting component documents.
pub struct DocumentService {
    fs: Arc<dyn FileSystem>,
    decoder: Decoder,
}

impl DocumentService {
    /// Create a new document service.
    pub fn new(fs: Arc<dyn FileSystem>, decoder: Decoder) -> Self {
        Self { fs, decoder }
    }

    pub fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    /// Read and decode the document at `path`.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<Component> {
        let content = self.fs.read(path).with_path_context("read document", path)?;
        self.load_slice(&content)
    }

    /// Decode a document from its JSON text.
    pub fn load_str(&self, content: &str) -> ApplicationResult<Component> {
        self.load_slice(content.as_bytes())
    }

    /// Decode a document from raw bytes; invalid UTF-8 is malformed JSON.
    pub fn load_slice(&self, content: &[u8]) -> ApplicationResult<Component> {
        let component = self.decoder.decode_slice(content)?;
        debug!(
            "load_slice: root={} depth={}",
            component.id(),
            component.depth()
        );
        Ok(component)
    }

    /// Collect counts, depth and duplicate ids of a component tree.
    pub fn inspect(&self, component: &Component) -> DocumentReport {
        let mut counts: BTreeMap<ComponentType, usize> = BTreeMap::new();
        for node in component.iter() {
            *counts.entry(node.component_type()).or_default() += 1;
        }

        let duplicate_ids: Vec<String> = component
            .iter()
            .map(Component::id)
            .duplicates()
            .map(str::to_string)
            .collect();
        if !duplicate_ids.is_empty() {
            debug!("inspect: duplicate ids {:?}", duplicate_ids);
        }

        DocumentReport {
            root: component.id().to_string(),
            counts,
            depth: component.depth(),
            duplicate_ids,
        }
    }
}
