use anyhow::{Context, Result};
use serde::Serialize;
use tracing::warn;

use crate::cli::QueryArgs;
use crate::commands::output::{save_page, write_json, write_lines};
use crate::model::Resolution;
use crate::service::{CertificateService, query_download_name};

#[derive(Debug, Serialize)]
struct QueryResponse<'a> {
    collection: &'a str,
    query: &'a str,
    resolution: &'a Resolution,
    saved_to: Option<String>,
}

pub fn run(service: &CertificateService, args: QueryArgs) -> Result<()> {
    let Some(resolution) = service.query(&args.collection, &args.query, args.first_only)? else {
        return write_lines(&[format!(
            "No document uploaded for collection '{}'",
            args.collection
        )]);
    };

    let saved_to = match &resolution {
        Resolution::Single { page, matched_by } => {
            let bytes = service
                .materialize_page(&args.collection, *page)?
                .with_context(|| format!("document for '{}' disappeared", args.collection))?;
            let path = save_page(
                args.output.clone(),
                query_download_name(&args.collection, &args.query, *matched_by),
                &bytes,
            )?;
            Some(path.display().to_string())
        }
        Resolution::Multiple { .. } => None,
        Resolution::NotFound => {
            warn!(collection = %args.collection, query = %args.query, "no certificate matched");
            None
        }
    };

    if args.json {
        return write_json(&QueryResponse {
            collection: &args.collection,
            query: args.query.trim(),
            resolution: &resolution,
            saved_to,
        });
    }

    let lines = match (&resolution, saved_to) {
        (Resolution::Single { page, .. }, Some(path)) => vec![format!("page {page} -> {path}")],
        (Resolution::Multiple { pages }, _) => {
            let mut lines = vec![format!(
                "{} certificates match '{}':",
                pages.len(),
                args.query.trim()
            )];
            lines.extend(pages.iter().map(|page| {
                format!(
                    "  page {page}: certfinder page --collection {} --page {page}",
                    args.collection
                )
            }));
            lines
        }
        _ => vec![format!(
            "No certificate found for '{}' in collection '{}'",
            args.query.trim(),
            args.collection
        )],
    };
    write_lines(&lines)
}
