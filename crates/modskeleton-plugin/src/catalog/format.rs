//! Catalog index decoding.

use serde::{Deserialize, Serialize};

use super::CatalogEntry;
use crate::error::ModResult;

/// Decodes a catalog index blob into entries.
pub trait CatalogFormat: Send + Sync + std::fmt::Debug {
    /// Short format name for logs.
    fn name(&self) -> &str;

    /// Decodes `bytes` into catalog entries, in index order.
    fn decode(&self, bytes: &[u8]) -> ModResult<Vec<CatalogEntry>>;

    /// Encodes entries into an index blob.
    fn encode(&self, entries: &[CatalogEntry]) -> ModResult<Vec<u8>>;
}

/// JSON catalog index: `{"entries": [...]}` or a bare array of entries.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonCatalogFormat;

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Wrapped { entries: Vec<CatalogEntry> },
    Bare(Vec<CatalogEntry>),
}

impl CatalogFormat for JsonCatalogFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn decode(&self, bytes: &[u8]) -> ModResult<Vec<CatalogEntry>> {
        let document: CatalogDocument = serde_json::from_slice(bytes)?;
        Ok(match document {
            CatalogDocument::Wrapped { entries } | CatalogDocument::Bare(entries) => entries,
        })
    }

    fn encode(&self, entries: &[CatalogEntry]) -> ModResult<Vec<u8>> {
        let document = CatalogDocument::Wrapped {
            entries: entries.to_vec(),
        };
        Ok(serde_json::to_vec_pretty(&document)?)
    }
}
