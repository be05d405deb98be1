use anyhow::Context;
use clap::Parser;
use menu_seed::core::{CatalogSource, ScriptSink};
use menu_seed::utils::{logger, validation::Validate};
use menu_seed::{
    Catalog, CliConfig, EmbeddedCatalog, FileCatalog, FileSink, SeedEngine, SeedError, SeedReport,
    StdoutSink,
};

fn main() {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting menu-seed");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    let outcome = match &config.catalog {
        Some(path) => dispatch(FileCatalog::new(path), &config),
        None => dispatch(EmbeddedCatalog, &config),
    };

    match outcome {
        Ok(Some(report)) => {
            tracing::info!(
                "Seeding script ready: {} categories, {} products -> {}",
                report.categories,
                report.products,
                report.destination
            );
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!("menu-seed failed: {:#}", e);

            let exit_code = match e.downcast_ref::<SeedError>() {
                Some(seed_error) => {
                    tracing::error!(
                        "Category: {:?}, Severity: {:?}",
                        seed_error.category(),
                        seed_error.severity()
                    );
                    eprintln!("❌ {}", seed_error.user_friendly_message());
                    eprintln!("💡 Suggestion: {}", seed_error.recovery_suggestion());
                    seed_error.exit_code()
                }
                None => {
                    eprintln!("❌ {:#}", e);
                    1
                }
            };

            std::process::exit(exit_code);
        }
    }
}

fn dispatch<S: CatalogSource>(source: S, config: &CliConfig) -> anyhow::Result<Option<SeedReport>> {
    if config.dry_run {
        let engine = SeedEngine::new(source, StdoutSink::new())
            .with_owner_email(config.owner_email.clone());
        let catalog = engine.load_catalog().context("dry run failed")?;
        display_catalog_summary(&catalog);
        return Ok(None);
    }

    match &config.output {
        Some(path) => execute(source, FileSink::new(path), config).map(Some),
        None => execute(source, StdoutSink::new(), config).map(Some),
    }
}

fn execute<S: CatalogSource, K: ScriptSink>(
    source: S,
    sink: K,
    config: &CliConfig,
) -> anyhow::Result<SeedReport> {
    let description = source.describe();
    let mut engine = SeedEngine::new(source, sink).with_owner_email(config.owner_email.clone());
    let report = engine
        .run()
        .with_context(|| format!("could not generate a seeding script from {}", description))?;
    Ok(report)
}

// stdout is reserved for SQL, so the summary goes to stderr.
fn display_catalog_summary(catalog: &Catalog) {
    eprintln!("📋 Catalog Summary:");
    eprintln!("  Owner: {}", catalog.owner.email);
    eprintln!("  Categories: {}", catalog.categories.len());
    eprintln!("  Products: {}", catalog.product_count());
    eprintln!();

    for (index, category) in catalog.categories.iter().enumerate() {
        eprintln!(
            "  {}. {} ({} products)",
            index + 1,
            category.name,
            category.products.len()
        );
        if category.products.is_empty() {
            eprintln!("     ⚠️  no products; only the category row will be inserted");
        }
    }

    eprintln!();
    eprintln!("🔍 DRY RUN - no SQL generated");
}
