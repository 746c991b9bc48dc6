use crate::config::{config_model::AdminSecret, stage::Stage};
use anyhow::{Ok, Result};

use super::config_model::DotEnvyConfig;

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let server = super::config_model::Server {
        port: std::env::var("SERVER_PORT")
            .expect("SERVER_PORT is invalid")
            .parse()?,
        body_limit: std::env::var("SERVER_BODY_LIMIT")
            .expect("SERVER_BODY_LIMIT is invalid")
            .parse()?,
        timeout: std::env::var("SERVER_TIMEOUT")
            .expect("SERVER_TIMEOUT is invalid")
            .parse()?,
    };

    let database = super::config_model::Database {
        url: std::env::var("DATABASE_URL").expect("DATABASE_URL is invalid"),
    };

    let issuer = super::config_model::Issuer {
        name: std::env::var("INVOICE_ISSUER_NAME").expect("INVOICE_ISSUER_NAME is invalid"),
        street: std::env::var("INVOICE_ISSUER_STREET").expect("INVOICE_ISSUER_STREET is invalid"),
        zipcode: std::env::var("INVOICE_ISSUER_ZIPCODE")
            .expect("INVOICE_ISSUER_ZIPCODE is invalid"),
        city: std::env::var("INVOICE_ISSUER_CITY").expect("INVOICE_ISSUER_CITY is invalid"),
        country: std::env::var("INVOICE_ISSUER_COUNTRY")
            .expect("INVOICE_ISSUER_COUNTRY is invalid"),
        tax_number: std::env::var("INVOICE_ISSUER_TAX_NUMBER").ok(),
    };

    let billing = super::config_model::Billing {
        currency: std::env::var("BILLING_CURRENCY").unwrap_or_else(|_| "EUR".to_string()),
        tax_rate_bp: std::env::var("BILLING_TAX_RATE_BP")
            .ok()
            .map(|value| value.parse())
            .transpose()?,
        payment_grace_days: std::env::var("BILLING_PAYMENT_GRACE_DAYS")
            .unwrap_or_else(|_| "14".to_string())
            .parse()?,
        issuer,
    };

    Ok(DotEnvyConfig {
        server,
        database,
        billing,
    })
}

pub fn get_stage() -> Stage {
    dotenvy::dotenv().ok();

    let stage_str = std::env::var("STAGE").unwrap_or("".to_string());
    Stage::try_from(&stage_str).unwrap_or_default()
}

pub fn get_admin_secret() -> Result<AdminSecret> {
    dotenvy::dotenv().ok();

    Ok(AdminSecret {
        secret: std::env::var("JWT_ADMIN_SECRET").expect("JWT_ADMIN_SECRET is invalid"),
    })
}
