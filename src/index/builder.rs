use anyhow::{Context, Result};
use regex::Regex;
use tracing::{debug, info, warn};

use super::bib::BibExtractor;
use super::name::NameExtractor;
use super::normalize::normalize_name;
use crate::document::PageSource;
use crate::model::Index;

pub struct IndexBuilder {
    bib: BibExtractor,
    name: NameExtractor,
    title_case_pair: Regex,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexBuild {
    pub index: Index,
    pub page_count: u32,
    pub failed_pages: Vec<u32>,
}

impl IndexBuilder {
    pub fn new() -> Result<Self> {
        Ok(Self {
            bib: BibExtractor::new()?,
            name: NameExtractor::new()?,
            title_case_pair: Regex::new(r"\b([A-Z][a-z\x{E0}-\x{FF}]+)\s+([A-Z][a-z\x{E0}-\x{FF}]+)\b")
                .context("failed to compile title-case name regex")?,
        })
    }

    pub fn build<S: PageSource + ?Sized>(&self, source: &S) -> IndexBuild {
        let page_count = source.page_count();
        let mut index = Index::default();
        let mut failed_pages = Vec::new();

        for page_number in 1..=page_count {
            let (text, blocks) = match read_page(source, page_number) {
                Ok(page) => page,
                Err(err) => {
                    warn!(page = page_number, error = %err, "skipping unreadable page");
                    failed_pages.push(page_number);
                    continue;
                }
            };

            let bib = self.bib.extract(&text);
            let name = self.name.extract(&text, &blocks);
            debug!(
                page = page_number,
                bib = bib.as_deref().unwrap_or_default(),
                name = name.as_deref().unwrap_or_default(),
                "indexed page"
            );

            if let Some(bib) = &bib {
                index.by_bib.insert(bib.clone(), page_number);
            }
            if let Some(name) = &name {
                add_name_page(&mut index, name, page_number);
            }

            if bib.is_none() && name.is_none() {
                if let Some(fallback) = self.title_case_name(&text) {
                    debug!(page = page_number, name = %fallback, "title-case fallback name");
                    add_name_page(&mut index, &fallback, page_number);
                }
            }
        }

        info!(
            pages = page_count,
            bibs = index.by_bib.len(),
            names = index.by_name.len(),
            failed_pages = failed_pages.len(),
            "index build completed"
        );

        IndexBuild {
            index,
            page_count,
            failed_pages,
        }
    }

    fn title_case_name(&self, text: &str) -> Option<String> {
        let captures = self.title_case_pair.captures(text)?;
        let first = captures.get(1)?.as_str();
        let last = captures.get(2)?.as_str();
        Some(format!("{first} {last}"))
    }
}

fn read_page<S: PageSource + ?Sized>(source: &S, page_number: u32) -> Result<(String, Vec<String>)> {
    let text = source
        .page_text(page_number)
        .with_context(|| format!("failed to read text of page {page_number}"))?;
    let blocks = source
        .page_blocks(page_number)
        .with_context(|| format!("failed to read blocks of page {page_number}"))?;
    Ok((text, blocks))
}

fn add_name_page(index: &mut Index, name: &str, page_number: u32) {
    let key = normalize_name(name);
    if key.is_empty() {
        return;
    }

    let pages = index.by_name.entry(key).or_default();
    if !pages.contains(&page_number) {
        pages.push(page_number);
    }
}
