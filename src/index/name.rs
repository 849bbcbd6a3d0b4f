use anyhow::{Context, Result};
use regex::Regex;

use super::normalize::condense_whitespace;

const LABELS_STOP: &[&str] = &[
    "ATTESTATO DI PARTECIPAZIONE",
    "NOME",
    "NUMERO PETTORALE",
    "POSIZIONE ASSOLUTA",
    "POSIZIONE CATEGORIA",
    "GARA/TEMPO",
    "CERTIFICATES",
];

const PREFERRED_NAME_LENGTH: usize = 18;
const MIN_CAPITAL_RATIO: f64 = 0.9;
const WINDOW_LINES_BEFORE: usize = 5;
// inclusive: the label line plus six following lines
const WINDOW_LINES_AFTER: usize = 6;

pub struct NameExtractor {
    name_line: Regex,
    loose_name_line: Regex,
    bib_label: Regex,
}

impl NameExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            name_line: Regex::new(r"^[A-Z\x{C0}-\x{178}' \-]+$")
                .context("failed to compile name line regex")?,
            loose_name_line: Regex::new(r"^[A-Z\x{C0}-\x{178}' \-]{6,}$")
                .context("failed to compile loose name line regex")?,
            bib_label: Regex::new(r"(?i)pettorale").context("failed to compile bib label regex")?,
        })
    }

    pub fn extract(&self, page_text: &str, blocks: &[String]) -> Option<String> {
        self.extract_from_blocks(blocks)
            .or_else(|| self.extract_near_bib_label(page_text))
    }

    pub fn extract_from_blocks(&self, blocks: &[String]) -> Option<String> {
        let candidates = blocks
            .iter()
            .flat_map(|block| block.lines())
            .filter(|line| self.is_all_caps_name(line))
            .map(str::trim)
            .collect::<Vec<&str>>();

        closest_to_preferred_length(&candidates)
    }

    pub fn extract_near_bib_label(&self, page_text: &str) -> Option<String> {
        let lines = page_text.lines().collect::<Vec<&str>>();
        let anchor = lines
            .iter()
            .position(|line| self.bib_label.is_match(line))?;

        let start = anchor.saturating_sub(WINDOW_LINES_BEFORE);
        let end = (anchor + WINDOW_LINES_AFTER + 1).min(lines.len());

        let candidates = lines[start..end]
            .iter()
            .filter(|line| self.is_loose_name_candidate(line))
            .map(|line| line.trim())
            .collect::<Vec<&str>>();

        closest_to_preferred_length(&candidates)
    }

    fn is_all_caps_name(&self, line: &str) -> bool {
        let raw = condense_whitespace(line);
        if raw.is_empty() {
            return false;
        }

        let upper = raw.to_uppercase();
        if is_stop_label(&upper) || count_name_tokens(&upper) < 2 {
            return false;
        }
        if !self.name_line.is_match(&upper) {
            return false;
        }

        capital_ratio(&raw) > MIN_CAPITAL_RATIO
    }

    fn is_loose_name_candidate(&self, line: &str) -> bool {
        let raw = condense_whitespace(line);
        if raw.is_empty() {
            return false;
        }

        let upper = raw.to_uppercase();
        if is_stop_label(&upper) || !self.loose_name_line.is_match(&upper) {
            return false;
        }

        count_name_tokens(&upper) >= 2
    }
}

fn is_stop_label(upper: &str) -> bool {
    LABELS_STOP.contains(&upper)
}

fn count_name_tokens(line: &str) -> usize {
    line.split(' ')
        .filter(|token| token.chars().count() >= 2)
        .count()
}

fn capital_ratio(line: &str) -> f64 {
    let alphabetic = line.chars().filter(|ch| ch.is_alphabetic()).count();
    let upper = line
        .chars()
        .filter(|ch| ch.is_alphabetic() && ch.is_uppercase())
        .count();

    upper as f64 / alphabetic.max(1) as f64
}

fn closest_to_preferred_length(candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .min_by_key(|candidate| candidate.chars().count().abs_diff(PREFERRED_NAME_LENGTH))
        .map(|candidate| candidate.to_string())
}
