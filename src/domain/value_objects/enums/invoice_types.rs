use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceType {
    #[default]
    Invoice,
    Duplicate,
    OrderConfirmation,
}

impl InvoiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceType::Invoice => "invoice",
            InvoiceType::Duplicate => "duplicate",
            InvoiceType::OrderConfirmation => "order_confirmation",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "invoice" => Some(InvoiceType::Invoice),
            "duplicate" => Some(InvoiceType::Duplicate),
            "order_confirmation" => Some(InvoiceType::OrderConfirmation),
            _ => None,
        }
    }

    /// Prefix rendered into the human-facing document number.
    pub fn number_prefix(&self) -> &'static str {
        match self {
            InvoiceType::Invoice => "",
            InvoiceType::Duplicate => "DUP ",
            InvoiceType::OrderConfirmation => "ORD ",
        }
    }
}

impl Display for InvoiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
