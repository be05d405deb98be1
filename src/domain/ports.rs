use crate::domain::model::Catalog;
use crate::utils::error::Result;

/// Where a catalog comes from.
pub trait CatalogSource {
    fn describe(&self) -> String;
    fn load(&self) -> Result<Catalog>;
}

/// Where a rendered script goes. Returns a description of the destination.
pub trait ScriptSink {
    fn write_script(&mut self, script: &str) -> Result<String>;
}
