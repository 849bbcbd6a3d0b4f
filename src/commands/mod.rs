pub mod ingest;
pub mod inspect;
pub mod list;
pub mod output;
pub mod page;
pub mod query;
pub mod reindex;
pub mod status;
