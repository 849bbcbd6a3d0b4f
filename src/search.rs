use std::collections::BTreeSet;

use crate::index::normalize_name;
use crate::model::{Index, MatchKind, Resolution};

pub fn resolve(index: &Index, raw_query: &str, first_only: bool) -> Resolution {
    let query = raw_query.trim();

    if is_bib_query(query) {
        if let Some(page) = index.by_bib.get(query) {
            return Resolution::Single {
                page: *page,
                matched_by: MatchKind::Bib,
            };
        }
    }

    let key = normalize_name(query);
    let pages = match index.by_name.get(&key) {
        Some(pages) if !pages.is_empty() => pages.clone(),
        _ => substring_matches(index, &key),
    };

    let Some(first) = pages.first().copied() else {
        return Resolution::NotFound;
    };

    if pages.len() > 1 && !first_only {
        return Resolution::Multiple { pages };
    }

    Resolution::Single {
        page: first,
        matched_by: MatchKind::Name,
    }
}

fn is_bib_query(query: &str) -> bool {
    !query.is_empty() && query.chars().all(|ch| ch.is_ascii_digit())
}

fn substring_matches(index: &Index, key: &str) -> Vec<u32> {
    // every name contains the empty key; treat it as no match
    if key.is_empty() {
        return Vec::new();
    }

    index
        .by_name
        .iter()
        .filter(|(name, _)| name.contains(key))
        .flat_map(|(_, pages)| pages.iter().copied())
        .collect::<BTreeSet<u32>>()
        .into_iter()
        .collect()
}
