pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::catalog_file::{EmbeddedCatalog, FileCatalog};
pub use config::output::{FileSink, StdoutSink};
pub use core::{engine::SeedEngine, generator::SeedScriptGenerator};
pub use domain::model::{Catalog, CategoryRecord, OwnerConfig, ProductRecord, SeedReport};
pub use utils::error::{Result, SeedError};
