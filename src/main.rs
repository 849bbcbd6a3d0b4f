mod cli;
mod commands;
mod document;
mod index;
mod model;
mod search;
mod service;
mod store;
mod util;

use anyhow::Result;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::service::CertificateService;

fn main() {
    init_tracing();

    if let Err(err) = run() {
        error!(error = %err, "command failed");
        for cause in err.chain().skip(1) {
            error!(cause = %cause, "caused by");
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let service = CertificateService::new(cli.data_root.clone())?;

    match cli.command {
        Commands::Ingest(args) => commands::ingest::run(&service, args),
        Commands::Reindex(args) => commands::reindex::run(&service, args),
        Commands::Query(args) => commands::query::run(&service, args),
        Commands::Page(args) => commands::page::run(&service, args),
        Commands::List(args) => commands::list::run(&service, args),
        Commands::Status(args) => commands::status::run(&service, args),
        Commands::Inspect(command) => commands::inspect::run(&service, command),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
