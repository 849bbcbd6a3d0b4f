use anyhow::Result;
use tracing::warn;

use crate::cli::InspectCommands;
use crate::commands::output::{write_json, write_lines};
use crate::service::CertificateService;

pub fn run(service: &CertificateService, command: InspectCommands) -> Result<()> {
    match command {
        InspectCommands::Index(args) => {
            let index = service.load_index(&args.collection)?;
            write_json(&index)
        }
        InspectCommands::Page(args) => {
            let Some(dump) = service.page_dump(&args.collection, args.page)? else {
                warn!(collection = %args.collection, "no document uploaded");
                return write_lines(&[format!(
                    "No document uploaded for collection '{}'",
                    args.collection
                )]);
            };
            write_json(&dump)
        }
    }
}
