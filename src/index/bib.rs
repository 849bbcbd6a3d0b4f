use anyhow::{Context, Result};
use regex::Regex;

use super::normalize::condense_whitespace;

pub struct BibExtractor {
    patterns: Vec<Regex>,
}

impl BibExtractor {
    pub fn new() -> Result<Self> {
        let sources = [
            r"(?i)numero\s*pettorale[^0-9]{0,100}?([0-9]{1,5})",
            r"(?i)\bpettorale[^0-9]{0,50}?([0-9]{1,5})",
            r"(?i)\bn[°o]\s*pettorale[^0-9]{0,50}?([0-9]{1,5})",
        ];

        let patterns = sources
            .iter()
            .map(|source| {
                Regex::new(source)
                    .with_context(|| format!("failed to compile bib pattern: {source}"))
            })
            .collect::<Result<Vec<Regex>>>()?;

        Ok(Self { patterns })
    }

    pub fn extract(&self, page_text: &str) -> Option<String> {
        let flat = condense_whitespace(page_text);

        self.patterns.iter().find_map(|pattern| {
            pattern
                .captures(&flat)
                .and_then(|captures| captures.get(1))
                .map(|value| value.as_str().to_string())
        })
    }
}
