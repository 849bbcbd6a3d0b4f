use anyhow::Result;

use crate::cli::StatusArgs;
use crate::commands::output::write_json;
use crate::service::CertificateService;

pub fn run(service: &CertificateService, args: StatusArgs) -> Result<()> {
    let status = service.status(&args.collection)?;
    write_json(&status)
}
