use crate::core::generator::SeedScriptGenerator;
use crate::domain::model::{Catalog, SeedReport};
use crate::domain::ports::{CatalogSource, ScriptSink};
use crate::utils::error::Result;
use crate::utils::validation::Validate;

pub struct SeedEngine<S: CatalogSource, K: ScriptSink> {
    source: S,
    sink: K,
    generator: SeedScriptGenerator,
    owner_email: Option<String>,
}

impl<S: CatalogSource, K: ScriptSink> SeedEngine<S, K> {
    pub fn new(source: S, sink: K) -> Self {
        Self {
            source,
            sink,
            generator: SeedScriptGenerator::new(),
            owner_email: None,
        }
    }

    /// Seeds for this account instead of the one named in the catalog.
    pub fn with_owner_email(mut self, owner_email: Option<String>) -> Self {
        self.owner_email = owner_email;
        self
    }

    /// Loads, applies overrides and validates the catalog.
    pub fn load_catalog(&self) -> Result<Catalog> {
        tracing::info!("Loading catalog from {}", self.source.describe());
        let mut catalog = self.source.load()?;

        if let Some(email) = &self.owner_email {
            tracing::info!("Owner email overridden to: {}", email);
            catalog.owner.email = email.clone();
        }

        catalog.validate()?;
        tracing::debug!(
            "Catalog has {} categories and {} products",
            catalog.categories.len(),
            catalog.product_count()
        );
        Ok(catalog)
    }

    pub fn run(&mut self) -> Result<SeedReport> {
        let catalog = self.load_catalog()?;

        let plan = self.generator.plan(&catalog);
        let script = self.generator.render(&plan);
        tracing::info!(
            "Generated seeding script for {} ({} categories, {} products)",
            plan.owner_email,
            plan.categories.len(),
            plan.product_count()
        );

        let destination = self.sink.write_script(&script)?;
        tracing::info!("Script written to {}", destination);

        Ok(SeedReport {
            categories: plan.categories.len(),
            products: plan.product_count(),
            destination,
        })
    }

    pub fn into_sink(self) -> K {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::catalog_file::EmbeddedCatalog;
    use crate::config::output::StdoutSink;
    use crate::utils::error::SeedError;

    struct InlineCatalog(&'static str);

    impl CatalogSource for InlineCatalog {
        fn describe(&self) -> String {
            "inline".to_string()
        }

        fn load(&self) -> Result<Catalog> {
            Catalog::from_toml_str(self.0)
        }
    }

    #[test]
    fn test_run_embedded_catalog() {
        let mut engine = SeedEngine::new(EmbeddedCatalog, StdoutSink::with_writer(Vec::new()));
        let report = engine.run().unwrap();

        assert_eq!(report.categories, 2);
        assert_eq!(report.products, 7);
        assert_eq!(report.destination, "stdout");

        let written = String::from_utf8(engine.into_sink().into_inner()).unwrap();
        assert!(written.contains("WHERE email = 'tomjerry@gmail.com';"));
        assert!(written.contains("'Pizza Calabresa', 'Deliciosa pizza de calabresa com queijo', 35.00"));
    }

    #[test]
    fn test_owner_override_is_applied_and_validated() {
        let engine = SeedEngine::new(EmbeddedCatalog, StdoutSink::with_writer(Vec::new()))
            .with_owner_email(Some("chef@example.com".to_string()));
        assert_eq!(engine.load_catalog().unwrap().owner.email, "chef@example.com");

        let engine = SeedEngine::new(EmbeddedCatalog, StdoutSink::with_writer(Vec::new()))
            .with_owner_email(Some("chef".to_string()));
        assert!(engine.load_catalog().is_err());
    }

    #[test]
    fn test_invalid_catalog_writes_nothing() {
        let mut engine = SeedEngine::new(
            InlineCatalog("[[categories]]\nname = \"\"\n"),
            StdoutSink::with_writer(Vec::new()),
        );

        let err = engine.run().unwrap_err();
        assert!(matches!(err, SeedError::InvalidCatalogValueError { .. }));
        assert!(engine.into_sink().into_inner().is_empty());
    }
}
