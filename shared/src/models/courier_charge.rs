//! Courier Charge Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Geographic tier used to price courier delivery
///
/// Tiers are nested: Gaya district sits inside Bihar, which sits inside India.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourierRegion {
    InGayaOutsideManpur,
    InBiharOutsideGaya,
    InIndiaOutsideBihar,
    OutsideIndia,
}

impl CourierRegion {
    pub const ALL: [CourierRegion; 4] = [
        CourierRegion::InGayaOutsideManpur,
        CourierRegion::InBiharOutsideGaya,
        CourierRegion::InIndiaOutsideBihar,
        CourierRegion::OutsideIndia,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InGayaOutsideManpur => "in_gaya_outside_manpur",
            Self::InBiharOutsideGaya => "in_bihar_outside_gaya",
            Self::InIndiaOutsideBihar => "in_india_outside_bihar",
            Self::OutsideIndia => "outside_india",
        }
    }
}

impl fmt::Display for CourierRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CourierRegion {
    type Err = crate::error::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|region| region.as_str() == s)
            .ok_or_else(|| {
                crate::error::AppError::with_message(
                    crate::error::ErrorCode::CourierRegionUnknown,
                    format!("Unknown courier region: {}", s),
                )
            })
    }
}

/// One row of the courier charge table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourierChargeEntry {
    pub region: CourierRegion,
    pub amount: f64,
}
