use anyhow::Result;
use tracing::warn;

use crate::cli::PageArgs;
use crate::commands::output::{save_page, write_lines};
use crate::service::{CertificateService, page_download_name};

pub fn run(service: &CertificateService, args: PageArgs) -> Result<()> {
    let Some(bytes) = service.materialize_page(&args.collection, args.page)? else {
        warn!(collection = %args.collection, "no document uploaded");
        return write_lines(&[format!(
            "No document uploaded for collection '{}'",
            args.collection
        )]);
    };

    let path = save_page(
        args.output,
        page_download_name(&args.collection, args.page),
        &bytes,
    )?;
    write_lines(&[path.display().to_string()])
}
