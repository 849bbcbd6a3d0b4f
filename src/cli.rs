use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "certfinder",
    version,
    about = "Index participation certificates and extract a single page by bib number or name"
)]
pub struct Cli {
    #[arg(long, global = true, default_value = ".cache/certfinder")]
    pub data_root: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Ingest(IngestArgs),
    Reindex(ReindexArgs),
    Query(QueryArgs),
    Page(PageArgs),
    List(ListArgs),
    Status(StatusArgs),
    #[command(subcommand)]
    Inspect(InspectCommands),
}

#[derive(Args, Debug, Clone)]
pub struct IngestArgs {
    #[arg(long)]
    pub collection: String,

    #[arg(long)]
    pub file: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ReindexArgs {
    #[arg(long)]
    pub collection: String,
}

#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    #[arg(long)]
    pub collection: String,

    #[arg(long)]
    pub query: String,

    #[arg(long, default_value_t = false)]
    pub first_only: bool,

    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct PageArgs {
    #[arg(long)]
    pub collection: String,

    #[arg(long)]
    pub page: u32,

    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[arg(long)]
    pub collection: String,
}

#[derive(Subcommand, Debug)]
pub enum InspectCommands {
    Index(InspectIndexArgs),
    Page(InspectPageArgs),
}

#[derive(Args, Debug, Clone)]
pub struct InspectIndexArgs {
    #[arg(long)]
    pub collection: String,
}

#[derive(Args, Debug, Clone)]
pub struct InspectPageArgs {
    #[arg(long)]
    pub collection: String,

    #[arg(long)]
    pub page: u32,
}
