use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    #[serde(default)]
    pub by_bib: BTreeMap<String, u32>,
    #[serde(default)]
    pub by_name: BTreeMap<String, Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<IndexMeta>,
}

impl Index {
    pub fn counts(&self) -> IndexCounts {
        IndexCounts {
            bib_count: self.by_bib.len(),
            name_count: self.by_name.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.by_bib.is_empty() && self.by_name.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexMeta {
    pub generated_at: String,
    pub page_count: u32,
    pub source_sha256: String,
    #[serde(default)]
    pub failed_pages: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexCounts {
    pub bib_count: usize,
    pub name_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Resolution {
    Single { page: u32, matched_by: MatchKind },
    Multiple { pages: Vec<u32> },
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Bib,
    Name,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionStatus {
    pub id: String,
    pub display_name: String,
    pub document_present: bool,
    pub index_present: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageDump {
    pub page: u32,
    pub text: String,
    pub blocks: Vec<String>,
}
