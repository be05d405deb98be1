//! Literal rendering helpers for the generated PL/pgSQL.

use rust_decimal::{Decimal, RoundingStrategy};

pub const PRICE_DECIMAL_PLACES: u32 = 2;

/// Doubles every single quote. Nothing else is touched.
pub fn escape_literal(value: &str) -> String {
    value.replace('\'', "''")
}

/// `value` as a quoted string literal.
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", escape_literal(value))
}

/// Quoted literal, or `NULL` when the value is absent or blank.
pub fn optional_literal(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => quote_literal(v),
        _ => "NULL".to_string(),
    }
}

/// Rounds midpoints away from zero and rescales to two places. Values too
/// large to carry two decimal digits come back with a smaller scale.
pub fn round_price(price: Decimal) -> Decimal {
    let mut rounded =
        price.round_dp_with_strategy(PRICE_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(PRICE_DECIMAL_PLACES);
    rounded
}

/// Price with exactly two decimal digits. Callers validate with
/// `validate_price` first.
pub fn format_price(price: Decimal) -> String {
    round_price(price).to_string()
}

/// Text safe to place after `--` on a single line.
pub fn comment_text(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}
