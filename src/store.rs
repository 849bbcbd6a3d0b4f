use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

use crate::model::{CollectionStatus, Index};
use crate::util::{write_atomic, write_json_pretty};

const DOCUMENT_FILE_NAME: &str = "attestati.pdf";
const INDEX_FILE_NAME: &str = "index.json";

pub struct CollectionStore {
    root: PathBuf,
}

impl CollectionStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn document_path(&self, collection_id: &str) -> PathBuf {
        self.root.join(collection_id).join(DOCUMENT_FILE_NAME)
    }

    pub fn index_path(&self, collection_id: &str) -> PathBuf {
        self.root.join(collection_id).join(INDEX_FILE_NAME)
    }

    pub fn has_document(&self, collection_id: &str) -> bool {
        self.document_path(collection_id).is_file()
    }

    pub fn has_index(&self, collection_id: &str) -> bool {
        self.index_path(collection_id).is_file()
    }

    pub fn save_document(&self, collection_id: &str, bytes: &[u8]) -> Result<()> {
        let path = self.document_path(collection_id);
        write_atomic(&path, bytes)?;
        info!(collection = %collection_id, path = %path.display(), bytes = bytes.len(), "stored source document");
        Ok(())
    }

    pub fn read_document(&self, collection_id: &str) -> Result<Option<Vec<u8>>> {
        let path = self.document_path(collection_id);
        if !path.is_file() {
            return Ok(None);
        }
        let bytes = fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?;
        Ok(Some(bytes))
    }

    pub fn remove_document(&self, collection_id: &str) -> Result<()> {
        let path = self.document_path(collection_id);
        if path.is_file() {
            fs::remove_file(&path)
                .with_context(|| format!("failed to remove {}", path.display()))?;
        }
        Ok(())
    }

    pub fn save_index(&self, collection_id: &str, index: &Index) -> Result<()> {
        let path = self.index_path(collection_id);
        write_json_pretty(&path, index)?;
        info!(
            collection = %collection_id,
            path = %path.display(),
            bibs = index.by_bib.len(),
            names = index.by_name.len(),
            "wrote index"
        );
        Ok(())
    }

    pub fn load_index(&self, collection_id: &str) -> Result<Index> {
        let path = self.index_path(collection_id);
        if !path.exists() {
            debug!(collection = %collection_id, "no index stored, using empty index");
            return Ok(Index::default());
        }

        let raw = fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?;
        let index: Index = serde_json::from_slice(&raw)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(index)
    }

    pub fn status(&self, collection_id: &str) -> CollectionStatus {
        CollectionStatus {
            id: collection_id.to_string(),
            display_name: display_name(collection_id),
            document_present: self.has_document(collection_id),
            index_present: self.has_index(collection_id),
        }
    }

    pub fn list(&self) -> Result<Vec<CollectionStatus>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.root)
            .with_context(|| format!("failed to read {}", self.root.display()))?;

        let mut collections = Vec::new();
        for entry in entries {
            let entry =
                entry.with_context(|| format!("failed to read entry in {}", self.root.display()))?;
            let path = entry.path();

            if !entry
                .file_type()
                .with_context(|| format!("failed to inspect file type: {}", path.display()))?
                .is_dir()
            {
                continue;
            }

            let Some(collection_id) = entry.file_name().to_str().map(ToOwned::to_owned) else {
                continue;
            };
            if validate_collection_id(&collection_id).is_err() {
                continue;
            }

            collections.push(self.status(&collection_id));
        }

        collections.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(collections)
    }
}

pub fn validate_collection_id(collection_id: &str) -> Result<()> {
    if collection_id.is_empty() {
        bail!("collection id is required");
    }
    if !collection_id
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
    {
        bail!("invalid collection id '{collection_id}': use only letters, digits and underscore");
    }
    Ok(())
}

pub fn display_name(collection_id: &str) -> String {
    collection_id
        .replace('_', " ")
        .split_whitespace()
        .map(title_case_word)
        .collect::<Vec<String>>()
        .join(" ")
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
