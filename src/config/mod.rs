pub mod catalog_file;
pub mod output;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_email, validate_path, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "menu-seed")]
#[command(about = "Generate an idempotent SQL script that seeds categories and products")]
pub struct CliConfig {
    /// Catalog file (.toml or .json); the embedded catalog is used when omitted
    #[arg(short, long)]
    pub catalog: Option<String>,

    /// Write the script to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Override the owner email from the catalog
    #[arg(long)]
    pub owner_email: Option<String>,

    /// Summarize the catalog without generating SQL
    #[arg(long)]
    pub dry_run: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(catalog) = &self.catalog {
            validate_path("catalog", catalog)?;
        }
        if let Some(output) = &self.output {
            validate_path("output", output)?;
        }
        if let Some(email) = &self.owner_email {
            validate_email("owner_email", email)?;
        }
        Ok(())
    }
}
