use anyhow::Result;
use serde::Serialize;
use tracing::warn;

use crate::cli::ReindexArgs;
use crate::commands::output::{write_json, write_lines};
use crate::service::CertificateService;

#[derive(Debug, Serialize)]
struct ReindexResponse<'a> {
    collection: &'a str,
    bib_count: usize,
    name_count: usize,
}

pub fn run(service: &CertificateService, args: ReindexArgs) -> Result<()> {
    let Some(counts) = service.reindex(&args.collection)? else {
        warn!(collection = %args.collection, "reindex skipped");
        return write_lines(&[format!(
            "No document uploaded for collection '{}'",
            args.collection
        )]);
    };

    write_json(&ReindexResponse {
        collection: &args.collection,
        bib_count: counts.bib_count,
        name_count: counts.name_count,
    })
}
