mod bib;
mod builder;
mod name;
mod normalize;

pub use builder::{IndexBuild, IndexBuilder};
pub use normalize::normalize_name;
