//! Region Classifier
//!
//! Maps a free-text postal address onto a courier tier by lower-cased
//! keyword containment. Most specific match wins:
//!
//! | contains                         | outcome                   |
//! |----------------------------------|---------------------------|
//! | manpur + gaya + bihar + india    | local (no courier fee)    |
//! | gaya + bihar + india             | `in_gaya_outside_manpur`  |
//! | bihar + india                    | `in_bihar_outside_gaya`   |
//! | india                            | `in_india_outside_bihar`  |
//! | anything else                    | `outside_india`           |
//!
//! The same scan also decides courier eligibility: an address naming
//! Manpur, Gaya and Bihar lies in the pickup area and is collected in person.

use crate::catalog::CourierChargeTable;
use serde::Serialize;
use shared::donation::Fulfillment;
use shared::models::CourierRegion;

const MANPUR: &str = "manpur";
const GAYA: &str = "gaya";
const BIHAR: &str = "bihar";
const INDIA: &str = "india";

/// Classified address tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "region", rename_all = "snake_case")]
pub enum RegionTier {
    /// Inside Manpur: equivalent to local pickup
    Local,
    Courier(CourierRegion),
}

/// Result of one keyword scan over an address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegionClassification {
    pub tier: RegionTier,
    /// False when the address is inside the pickup area; the donor is
    /// warned and no courier charge or delivery promise applies
    pub courier_eligible: bool,
}

impl RegionClassification {
    /// Courier tier that is actually billable, if any
    pub fn billable_region(&self) -> Option<CourierRegion> {
        match self.tier {
            RegionTier::Courier(region) if self.courier_eligible => Some(region),
            _ => None,
        }
    }
}

/// Classify an address. Total and deterministic for every input.
pub fn classify_address(address: &str) -> RegionClassification {
    let lower = address.to_lowercase();
    let manpur = lower.contains(MANPUR);
    let gaya = lower.contains(GAYA);
    let bihar = lower.contains(BIHAR);
    let india = lower.contains(INDIA);

    let tier = if manpur && gaya && bihar && india {
        RegionTier::Local
    } else if gaya && bihar && india && !manpur {
        RegionTier::Courier(CourierRegion::InGayaOutsideManpur)
    } else if bihar && india && !gaya && !manpur {
        RegionTier::Courier(CourierRegion::InBiharOutsideGaya)
    } else if india && !bihar && !gaya && !manpur {
        RegionTier::Courier(CourierRegion::InIndiaOutsideBihar)
    } else {
        RegionTier::Courier(CourierRegion::OutsideIndia)
    };

    RegionClassification {
        tier,
        courier_eligible: !(manpur && gaya && bihar),
    }
}

/// Courier charge resolved for the current fulfillment choice and address
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CourierQuote {
    /// None when no classification was performed (self-collect, blank
    /// address or no charge table)
    pub classification: Option<RegionClassification>,
    pub charge: f64,
}

impl CourierQuote {
    pub fn region(&self) -> Option<CourierRegion> {
        self.classification.and_then(|c| c.billable_region())
    }

    /// Whether the donor should see the courier-ineligible warning
    pub fn is_ineligible(&self) -> bool {
        self.classification.is_some_and(|c| !c.courier_eligible)
    }
}

/// Resolve the courier charge
pub fn quote_courier(
    fulfillment: Fulfillment,
    address: &str,
    table: &CourierChargeTable,
) -> CourierQuote {
    if fulfillment == Fulfillment::SelfCollect || address.trim().is_empty() || table.is_empty() {
        return CourierQuote::default();
    }

    let classification = classify_address(address);
    let charge = classification
        .billable_region()
        .map(|region| table.charge_for(region))
        .unwrap_or(0.0);

    tracing::debug!(tier = ?classification.tier, eligible = classification.courier_eligible, charge, "Courier charge resolved");

    CourierQuote {
        classification: Some(classification),
        charge,
    }
}
