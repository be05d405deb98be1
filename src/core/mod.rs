pub mod engine;
pub mod generator;
pub mod sql;

pub use crate::domain::model::{Catalog, CategoryRecord, ProductRecord, SeedReport};
pub use crate::domain::ports::{CatalogSource, ScriptSink};
pub use crate::utils::error::Result;
