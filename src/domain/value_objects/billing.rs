use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::billing_infos::BillingInfoEntity;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BillingInfoPayload {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 200))]
    pub street: String,
    #[validate(length(min = 1, max = 200))]
    pub zipcode: String,
    #[validate(length(min = 1, max = 200))]
    pub city: String,
    /// ISO 3166-1 alpha-2.
    #[validate(length(equal = 2))]
    pub country: String,
    #[validate(length(max = 200))]
    pub tax_number: Option<String>,
    #[validate(length(max = 200))]
    pub shipping_name: Option<String>,
    #[validate(length(max = 200))]
    pub shipping_street: Option<String>,
    #[validate(length(max = 200))]
    pub shipping_zipcode: Option<String>,
    #[validate(length(max = 200))]
    pub shipping_city: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BillingInfoDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub street: String,
    pub zipcode: String,
    pub city: String,
    pub country: String,
    pub tax_number: Option<String>,
    pub shipping_name: Option<String>,
    pub shipping_street: Option<String>,
    pub shipping_zipcode: Option<String>,
    pub shipping_city: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<BillingInfoEntity> for BillingInfoDto {
    fn from(value: BillingInfoEntity) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            name: value.name,
            street: value.street,
            zipcode: value.zipcode,
            city: value.city,
            country: value.country,
            tax_number: value.tax_number,
            shipping_name: value.shipping_name,
            shipping_street: value.shipping_street,
            shipping_zipcode: value.shipping_zipcode,
            shipping_city: value.shipping_city,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxNumberError {
    #[error("tax number does not match the {0} format")]
    BadFormat(String),
    #[error("tax number contains invalid characters")]
    InvalidCharacters,
}

/// Expected VAT-number body (after the country prefix) for EU members:
/// (min length, max length, digits only).
fn eu_vat_rule(country: &str) -> Option<(usize, usize, bool)> {
    let rule = match country {
        "AT" => (9, 9, false),
        "BE" => (10, 10, true),
        "BG" => (9, 10, true),
        "CY" => (9, 9, false),
        "CZ" => (8, 10, true),
        "DE" => (9, 9, true),
        "DK" => (8, 8, true),
        "EE" => (9, 9, true),
        "ES" => (9, 9, false),
        "FI" => (8, 8, true),
        "FR" => (11, 11, false),
        "GR" | "EL" => (9, 9, true),
        "HR" => (11, 11, true),
        "HU" => (8, 8, true),
        "IE" => (8, 9, false),
        "IT" => (11, 11, true),
        "LT" => (9, 12, true),
        "LU" => (8, 8, true),
        "LV" => (11, 11, true),
        "MT" => (8, 8, true),
        "NL" => (12, 12, false),
        "PL" => (10, 10, true),
        "PT" => (9, 9, true),
        "RO" => (2, 10, true),
        "SE" => (12, 12, true),
        "SI" => (8, 8, true),
        "SK" => (10, 10, true),
        _ => return None,
    };
    Some(rule)
}

/// Normalizes a VAT/tax number (separators stripped, uppercased, country
/// prefix ensured for EU members) and validates it against the country's
/// format. An empty input stays empty: the field is optional.
pub fn clean_tax_number(raw: &str, country: &str) -> Result<String, TaxNumberError> {
    let normalized: String = raw
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.'))
        .collect::<String>()
        .to_uppercase();

    if normalized.is_empty() {
        return Ok(normalized);
    }
    if !normalized.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(TaxNumberError::InvalidCharacters);
    }

    let country = country.to_uppercase();
    match eu_vat_rule(&country) {
        Some((min_len, max_len, digits_only)) => {
            let body = normalized
                .strip_prefix(country.as_str())
                .unwrap_or(&normalized);
            let length_ok = (min_len..=max_len).contains(&body.len());
            let charset_ok = !digits_only || body.chars().all(|c| c.is_ascii_digit());
            if !length_ok || !charset_ok {
                return Err(TaxNumberError::BadFormat(country));
            }
            Ok(format!("{country}{body}"))
        }
        None => {
            if (4..=20).contains(&normalized.len()) {
                Ok(normalized)
            } else {
                Err(TaxNumberError::BadFormat(country))
            }
        }
    }
}
