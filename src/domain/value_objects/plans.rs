use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::plans::PlanEntity;

/// Price boundary between the "cheap" and "expensive" admin facets,
/// in minor units (300 major units).
pub const PRICE_RANGE_SPLIT_MINOR: i32 = 30_000;

#[derive(Debug, Clone, Serialize)]
pub struct PlanDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub available: bool,
    pub visible: bool,
    pub is_default: bool,
    pub position: i32,
    pub url: Option<String>,
    /// Cheapest attached pricing, if the plan has any.
    pub min_price_minor: Option<i32>,
}

impl PlanDto {
    pub fn from_entity(entity: PlanEntity, min_price_minor: Option<i32>) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            available: entity.available,
            visible: entity.visible,
            is_default: entity.is_default.unwrap_or(false),
            position: entity.position,
            url: entity.url,
            min_price_minor,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PriceRange {
    #[serde(rename = "free")]
    Free,
    #[serde(rename = "1_300")]
    UpTo300,
    #[serde(rename = "301_plus")]
    Above300,
}

impl PriceRange {
    /// Whether a plan with the given cheapest price falls into this facet.
    /// Plans without any pricing row count as free.
    pub fn matches(&self, min_price_minor: Option<i32>) -> bool {
        match self {
            PriceRange::Free => min_price_minor.unwrap_or(0) == 0,
            PriceRange::UpTo300 => min_price_minor
                .map(|price| price > 0 && price <= PRICE_RANGE_SPLIT_MINOR)
                .unwrap_or(false),
            PriceRange::Above300 => min_price_minor
                .map(|price| price > PRICE_RANGE_SPLIT_MINOR)
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlanListFilter {
    pub available: Option<bool>,
    pub visible: Option<bool>,
    pub price_range: Option<PriceRange>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlanIdsModel {
    pub plan_ids: Vec<Uuid>,
}

/// Pricing row detached from its owning plan, ready to attach to a copy.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanCopyPricing {
    pub pricing_id: Uuid,
    pub price_minor: i32,
    pub regular_price_minor: Option<i32>,
    pub has_automatic_renewal: bool,
    pub visible: bool,
    pub position: i32,
}

/// Quota row detached from its owning plan, ready to attach to a copy.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanCopyQuota {
    pub quota_id: Uuid,
    pub value: Option<i64>,
}

/// Quota codename to granted value; `None` means unlimited.
pub type QuotaMap = BTreeMap<String, Option<i64>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_facet_includes_unpriced_plans() {
        assert!(PriceRange::Free.matches(None));
        assert!(PriceRange::Free.matches(Some(0)));
        assert!(!PriceRange::Free.matches(Some(1)));
    }

    #[test]
    fn facets_split_on_the_boundary() {
        assert!(PriceRange::UpTo300.matches(Some(1)));
        assert!(PriceRange::UpTo300.matches(Some(PRICE_RANGE_SPLIT_MINOR)));
        assert!(!PriceRange::UpTo300.matches(Some(PRICE_RANGE_SPLIT_MINOR + 1)));
        assert!(PriceRange::Above300.matches(Some(PRICE_RANGE_SPLIT_MINOR + 1)));
        assert!(!PriceRange::Above300.matches(None));
    }
}
