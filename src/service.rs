use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::{error, info, warn};

use crate::document::{PageSource, PdfDocument, extract_page};
use crate::index::{IndexBuild, IndexBuilder};
use crate::model::{
    CollectionStatus, Index, IndexCounts, IndexMeta, MatchKind, PageDump, Resolution,
};
use crate::search::resolve;
use crate::store::{CollectionStore, validate_collection_id};
use crate::util::{now_utc_string, sha256_hex};

const MAX_QUERY_FILE_NAME_CHARS: usize = 50;

pub struct CertificateService {
    store: CollectionStore,
    builder: IndexBuilder,
}

impl CertificateService {
    pub fn new(data_root: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            store: CollectionStore::new(data_root),
            builder: IndexBuilder::new()?,
        })
    }

    pub fn ingest(
        &self,
        collection_id: &str,
        file_name: &str,
        document_bytes: &[u8],
    ) -> Result<IndexCounts> {
        validate_collection_id(collection_id)?;
        if !has_pdf_extension(file_name) {
            bail!("invalid file '{file_name}': upload a .pdf document");
        }

        let document = PdfDocument::from_bytes(document_bytes)
            .with_context(|| format!("uploaded file '{file_name}' is not a readable pdf"))?;

        let index = self.index_document(&document, document_bytes);
        let previous_document = self.store.read_document(collection_id)?;

        self.store.save_document(collection_id, document_bytes)?;
        if let Err(err) = self.store.save_index(collection_id, &index) {
            self.restore_document(collection_id, previous_document);
            return Err(err);
        }

        let counts = index.counts();
        info!(
            collection = %collection_id,
            bibs = counts.bib_count,
            names = counts.name_count,
            "collection ingested"
        );
        Ok(counts)
    }

    pub fn reindex(&self, collection_id: &str) -> Result<Option<IndexCounts>> {
        validate_collection_id(collection_id)?;
        if !self.store.has_document(collection_id) {
            warn!(collection = %collection_id, "no document stored, nothing to reindex");
            return Ok(None);
        }

        let path = self.store.document_path(collection_id);
        let document_bytes =
            fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?;

        let index = match PdfDocument::from_bytes(&document_bytes) {
            Ok(document) => self.index_document(&document, &document_bytes),
            Err(err) => {
                error!(collection = %collection_id, error = %err, "stored document is unreadable, writing empty index");
                Index {
                    meta: Some(index_meta(0, &document_bytes, Vec::new())),
                    ..Index::default()
                }
            }
        };
        self.store.save_index(collection_id, &index)?;

        let counts = index.counts();
        info!(
            collection = %collection_id,
            bibs = counts.bib_count,
            names = counts.name_count,
            "collection reindexed"
        );
        Ok(Some(counts))
    }

    pub fn query(
        &self,
        collection_id: &str,
        raw_query: &str,
        first_only: bool,
    ) -> Result<Option<Resolution>> {
        validate_collection_id(collection_id)?;
        let query = raw_query.trim();
        if query.is_empty() {
            bail!("a search query (bib number or name) is required");
        }

        if !self.store.has_document(collection_id) {
            warn!(collection = %collection_id, "no document stored for collection");
            return Ok(None);
        }

        let index = self.store.load_index(collection_id)?;
        let resolution = resolve(&index, query, first_only);
        info!(collection = %collection_id, query = %query, first_only, resolution = ?resolution, "query resolved");
        Ok(Some(resolution))
    }

    pub fn materialize_page(&self, collection_id: &str, page_number: u32) -> Result<Option<Vec<u8>>> {
        validate_collection_id(collection_id)?;
        if page_number == 0 {
            bail!("page numbers start at 1");
        }

        let Some(document) = self.open_document(collection_id)? else {
            return Ok(None);
        };

        let page_count = document.page_count();
        if page_number > page_count {
            bail!("page {page_number} is out of range: document has {page_count} pages");
        }

        let bytes = extract_page(&document, page_number)
            .with_context(|| format!("failed to extract page {page_number} of '{collection_id}'"))?;
        Ok(Some(bytes))
    }

    pub fn list_collections(&self) -> Result<Vec<CollectionStatus>> {
        self.store.list()
    }

    pub fn status(&self, collection_id: &str) -> Result<CollectionStatus> {
        validate_collection_id(collection_id)?;
        Ok(self.store.status(collection_id))
    }

    pub fn load_index(&self, collection_id: &str) -> Result<Index> {
        validate_collection_id(collection_id)?;
        self.store.load_index(collection_id)
    }

    pub fn page_dump(&self, collection_id: &str, page_number: u32) -> Result<Option<PageDump>> {
        validate_collection_id(collection_id)?;
        let Some(document) = self.open_document(collection_id)? else {
            return Ok(None);
        };

        let page_count = document.page_count();
        if page_number == 0 || page_number > page_count {
            bail!("page {page_number} is out of range: document has {page_count} pages");
        }

        Ok(Some(PageDump {
            page: page_number,
            text: document.page_text(page_number)?,
            blocks: document.page_blocks(page_number)?,
        }))
    }

    fn open_document(&self, collection_id: &str) -> Result<Option<PdfDocument>> {
        if !self.store.has_document(collection_id) {
            warn!(collection = %collection_id, "no document stored for collection");
            return Ok(None);
        }

        let path = self.store.document_path(collection_id);
        PdfDocument::open(&path).map(Some)
    }

    fn restore_document(&self, collection_id: &str, previous_document: Option<Vec<u8>>) {
        let restored = match &previous_document {
            Some(bytes) => self.store.save_document(collection_id, bytes),
            None => self.store.remove_document(collection_id),
        };
        match restored {
            Ok(()) => warn!(
                collection = %collection_id,
                had_previous = previous_document.is_some(),
                "index save failed, source document rolled back"
            ),
            Err(err) => error!(
                collection = %collection_id,
                error = %err,
                "index save failed and source document could not be rolled back"
            ),
        }
    }

    fn index_document(&self, document: &PdfDocument, document_bytes: &[u8]) -> Index {
        let IndexBuild {
            mut index,
            page_count,
            failed_pages,
        } = self.builder.build(document);
        if index.is_empty() {
            warn!(pages = page_count, "no bib numbers or names detected in document");
        }
        index.meta = Some(index_meta(page_count, document_bytes, failed_pages));
        index
    }
}

fn index_meta(page_count: u32, document_bytes: &[u8], failed_pages: Vec<u32>) -> IndexMeta {
    IndexMeta {
        generated_at: now_utc_string(),
        page_count,
        source_sha256: sha256_hex(document_bytes),
        failed_pages,
    }
}

fn has_pdf_extension(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, extension)| extension.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

pub fn query_download_name(collection_id: &str, query: &str, matched_by: MatchKind) -> String {
    let query = query.trim();
    match matched_by {
        MatchKind::Bib => format!("attestato_{collection_id}_pettorale_{query}.pdf"),
        MatchKind::Name => {
            let safe_query = query
                .chars()
                .map(|ch| {
                    if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
                        ch
                    } else {
                        '_'
                    }
                })
                .take(MAX_QUERY_FILE_NAME_CHARS)
                .collect::<String>();
            format!("attestato_{collection_id}_{safe_query}.pdf")
        }
    }
}

pub fn page_download_name(collection_id: &str, page_number: u32) -> String {
    format!("attestato_{collection_id}_p{page_number}.pdf")
}

#[cfg(test)]
mod tests;
