use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use lopdf::Document;
use tracing::error;

pub trait PageSource {
    fn page_count(&self) -> u32;

    fn page_text(&self, page_number: u32) -> Result<String>;

    fn page_blocks(&self, page_number: u32) -> Result<Vec<String>> {
        Ok(split_text_blocks(&self.page_text(page_number)?))
    }

    fn extract_single_page(&self, page_number: u32) -> Result<Vec<u8>>;
}

pub struct PdfDocument {
    document: Document,
}

impl PdfDocument {
    pub fn open(path: &Path) -> Result<Self> {
        let document = Document::load(path)
            .map_err(|err| anyhow!("failed to open pdf {}: {err}", path.display()))?;
        Ok(Self { document })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let document =
            Document::load_mem(bytes).map_err(|err| anyhow!("invalid pdf document: {err}"))?;
        Ok(Self { document })
    }

    fn check_page(&self, page_number: u32) -> Result<()> {
        let page_count = self.page_count();
        if page_number == 0 || page_number > page_count {
            bail!("page {page_number} is outside 1..={page_count}");
        }
        Ok(())
    }
}

impl PageSource for PdfDocument {
    fn page_count(&self) -> u32 {
        self.document.get_pages().len() as u32
    }

    fn page_text(&self, page_number: u32) -> Result<String> {
        self.check_page(page_number)?;
        self.document
            .extract_text(&[page_number])
            .map_err(|err| anyhow!("failed to extract text from page {page_number}: {err}"))
    }

    fn extract_single_page(&self, page_number: u32) -> Result<Vec<u8>> {
        self.check_page(page_number)?;

        let others = (1..=self.page_count())
            .filter(|candidate| *candidate != page_number)
            .collect::<Vec<u32>>();

        let mut single = self.document.clone();
        single.delete_pages(&others);
        single.prune_objects();
        single.renumber_objects();
        single.compress();

        let mut buffer = Vec::new();
        single
            .save_to(&mut buffer)
            .with_context(|| format!("failed to write single-page pdf for page {page_number}"))?;
        Ok(buffer)
    }
}

pub fn extract_page<S: PageSource + ?Sized>(source: &S, page_number: u32) -> Option<Vec<u8>> {
    match source.extract_single_page(page_number) {
        Ok(bytes) => Some(bytes),
        Err(err) => {
            error!(page = page_number, error = %err, "page extraction failed");
            None
        }
    }
}

pub fn split_text_blocks(page_text: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current = Vec::<&str>::new();

    for line in page_text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(current.join("\n"));
                current.clear();
            }
            continue;
        }
        current.push(line);
    }

    if !current.is_empty() {
        blocks.push(current.join("\n"));
    }

    blocks
}

#[cfg(test)]
pub struct FixturePages {
    pages: Vec<Option<String>>,
}

#[cfg(test)]
impl FixturePages {
    pub fn new(pages: &[&str]) -> Self {
        Self {
            pages: pages.iter().map(|page| Some(page.to_string())).collect(),
        }
    }

    pub fn with_unreadable_page(mut self, page_number: u32) -> Self {
        if let Some(page) = self.pages.get_mut(page_number as usize - 1) {
            *page = None;
        }
        self
    }
}

#[cfg(test)]
impl PageSource for FixturePages {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_text(&self, page_number: u32) -> Result<String> {
        self.pages
            .get((page_number as usize).wrapping_sub(1))
            .cloned()
            .flatten()
            .with_context(|| format!("fixture page {page_number} is unreadable"))
    }

    fn extract_single_page(&self, page_number: u32) -> Result<Vec<u8>> {
        let text = self.page_text(page_number)?;
        Ok(text.into_bytes())
    }
}

#[cfg(test)]
pub(crate) mod tests;
