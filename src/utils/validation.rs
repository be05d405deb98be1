use crate::core::sql::{round_price, PRICE_DECIMAL_PLACES};
use crate::utils::error::{Result, SeedError};
use rust_decimal::Decimal;
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SeedError::InvalidCatalogValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_negative(field_name: &str, value: Decimal) -> Result<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(SeedError::InvalidCatalogValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be zero or greater".to_string(),
        });
    }
    Ok(())
}

/// Non-negative and small enough to render with exactly two decimal digits.
pub fn validate_price(field_name: &str, value: Decimal) -> Result<()> {
    validate_non_negative(field_name, value)?;

    if round_price(value).scale() != PRICE_DECIMAL_PLACES {
        return Err(SeedError::InvalidCatalogValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!(
                "Value is too large to keep {} decimal places",
                PRICE_DECIMAL_PLACES
            ),
        });
    }
    Ok(())
}

pub fn validate_email(field_name: &str, email: &str) -> Result<()> {
    validate_non_empty_string(field_name, email)?;

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(SeedError::InvalidCatalogValueError {
            field: field_name.to_string(),
            value: email.to_string(),
            reason: "Expected an address of the form user@domain".to_string(),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(SeedError::InvalidCatalogValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SeedError::InvalidCatalogValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// Returns the lowercased extension of `path` if it is one of `allowed_extensions`.
pub fn validate_file_extension(
    field_name: &str,
    path: &Path,
    allowed_extensions: &[&str],
) -> Result<String> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension {
        Some(ext) if allowed_extensions.contains(&ext.as_str()) => Ok(ext),
        Some(ext) => Err(SeedError::ConfigError {
            message: format!(
                "{}: unsupported file extension '{}' for {}. Allowed extensions: {}",
                field_name,
                ext,
                path.display(),
                allowed_extensions.join(", ")
            ),
        }),
        None => Err(SeedError::ConfigError {
            message: format!(
                "{}: {} has no extension. Allowed extensions: {}",
                field_name,
                path.display(),
                allowed_extensions.join(", ")
            ),
        }),
    }
}
