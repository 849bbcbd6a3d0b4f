use anyhow::Result;
use serde::Serialize;
use tracing::info;

use crate::cli::ListArgs;
use crate::commands::output::{write_json, write_lines};
use crate::model::CollectionStatus;
use crate::service::CertificateService;

#[derive(Debug, Serialize)]
struct ListResponse {
    total: usize,
    collections: Vec<CollectionStatus>,
}

pub fn run(service: &CertificateService, args: ListArgs) -> Result<()> {
    let collections = service.list_collections()?;
    info!(total = collections.len(), "listed collections");

    if args.json {
        return write_json(&ListResponse {
            total: collections.len(),
            collections,
        });
    }

    let lines = collections
        .iter()
        .map(|collection| {
            format!(
                "{}\t{}\tdocument={}\tindex={}",
                collection.id,
                collection.display_name,
                yes_no(collection.document_present),
                yes_no(collection.index_present),
            )
        })
        .collect::<Vec<String>>();
    write_lines(&lines)
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
