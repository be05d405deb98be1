use crate::domain::model::Catalog;
use crate::domain::ports::CatalogSource;
use crate::utils::error::{Result, SeedError};
use crate::utils::validation::{
    validate_email, validate_file_extension, validate_non_empty_string, validate_price,
    Validate,
};
use regex::{Captures, Regex};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// The catalog compiled into the binary.
pub const EMBEDDED_CATALOG: &str = include_str!("../../data/catalog.toml");

const CATALOG_EXTENSIONS: [&str; 2] = ["toml", "json"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Toml,
    Json,
}

impl CatalogFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        match validate_file_extension("catalog", path, &CATALOG_EXTENSIONS)?.as_str() {
            "json" => Ok(CatalogFormat::Json),
            _ => Ok(CatalogFormat::Toml),
        }
    }
}

impl Catalog {
    /// 從檔案載入 (格式由副檔名決定)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let format = CatalogFormat::from_path(path.as_ref())?;
        let content = std::fs::read_to_string(&path).map_err(SeedError::IoError)?;
        Self::from_str_with_format(&content, format)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::from_str_with_format(content, CatalogFormat::Toml)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Self::from_str_with_format(content, CatalogFormat::Json)
    }

    fn from_str_with_format(content: &str, format: CatalogFormat) -> Result<Self> {
        let processed_content = substitute_env_vars(content);

        let catalog: Catalog = match format {
            CatalogFormat::Toml => toml::from_str(&processed_content)?,
            CatalogFormat::Json => serde_json::from_str(&processed_content)?,
        };
        Ok(catalog)
    }

    /// 驗證目錄內容
    pub fn validate_catalog(&self) -> Result<()> {
        validate_email("owner.email", &self.owner.email)?;

        for (ci, category) in self.categories.iter().enumerate() {
            validate_non_empty_string(&format!("categories[{}].name", ci), &category.name)?;

            for (pi, product) in category.products.iter().enumerate() {
                let field = format!("categories[{}].products[{}]", ci, pi);
                validate_non_empty_string(&format!("{}.name", field), &product.name)?;
                validate_price(&format!("{}.price", field), product.price)?;
            }
        }

        Ok(())
    }
}

impl Validate for Catalog {
    fn validate(&self) -> Result<()> {
        self.validate_catalog()
    }
}

/// Replaces `${VAR}` with the variable's value; unset variables stay verbatim.
fn substitute_env_vars(content: &str) -> String {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    let re = PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern is valid")
    });

    re.replace_all(content, |caps: &Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| caps[0].to_string())
    })
    .into_owned()
}

/// The catalog shipped inside the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedCatalog;

impl CatalogSource for EmbeddedCatalog {
    fn describe(&self) -> String {
        "embedded catalog".to_string()
    }

    fn load(&self) -> Result<Catalog> {
        Catalog::from_toml_str(EMBEDDED_CATALOG)
    }
}

/// A `.toml` or `.json` catalog on disk.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for FileCatalog {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Catalog> {
        Catalog::from_file(&self.path)
    }
}
