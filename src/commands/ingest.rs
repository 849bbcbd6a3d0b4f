use std::fs;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::cli::IngestArgs;
use crate::commands::output::write_json;
use crate::service::CertificateService;

#[derive(Debug, Serialize)]
struct IngestResponse<'a> {
    collection: &'a str,
    bib_count: usize,
    name_count: usize,
}

pub fn run(service: &CertificateService, args: IngestArgs) -> Result<()> {
    let file_name = args
        .file
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("invalid file name: {}", args.file.display()))?;
    let bytes =
        fs::read(&args.file).with_context(|| format!("failed to read {}", args.file.display()))?;

    info!(collection = %args.collection, file = %args.file.display(), "ingesting certificates");
    let counts = service.ingest(&args.collection, file_name, &bytes)?;

    write_json(&IngestResponse {
        collection: &args.collection,
        bib_count: counts.bib_count,
        name_count: counts.name_count,
    })
}
