//! City tier classification.
//!
//! Tiers come from fixed membership lists and are matched by exact string equality, so
//! callers should pass a name produced by [`crate::normalize::normalize_city`]. Any name not
//! on a list (including misspellings) is tier 3.

use serde::{Deserialize, Serialize};

pub const TIER_1_CITIES: [&str; 7] = [
    "Mumbai",
    "Delhi",
    "Bangalore",
    "Chennai",
    "Kolkata",
    "Hyderabad",
    "Pune",
];

pub const TIER_2_CITIES: [&str; 48] = [
    "Jaipur",
    "Chandigarh",
    "Indore",
    "Lucknow",
    "Patna",
    "Ranchi",
    "Visakhapatnam",
    "Coimbatore",
    "Bhopal",
    "Nagpur",
    "Vadodara",
    "Surat",
    "Rajkot",
    "Jodhpur",
    "Raipur",
    "Amritsar",
    "Varanasi",
    "Agra",
    "Dehradun",
    "Mysore",
    "Jabalpur",
    "Guwahati",
    "Thiruvananthapuram",
    "Ludhiana",
    "Nashik",
    "Allahabad",
    "Udaipur",
    "Aurangabad",
    "Hubli",
    "Belgaum",
    "Salem",
    "Vijayawada",
    "Tiruchirappalli",
    "Bhavnagar",
    "Gwalior",
    "Dhanbad",
    "Bareilly",
    "Aligarh",
    "Gaya",
    "Kozhikode",
    "Warangal",
    "Kolhapur",
    "Bilaspur",
    "Jalandhar",
    "Noida",
    "Guntur",
    "Asansol",
    "Siliguri",
];

/// City tier, serialized as the bare integer the model was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum CityTier {
    Tier1,
    Tier2,
    Tier3,
}

impl CityTier {
    pub fn as_u8(self) -> u8 {
        match self {
            CityTier::Tier1 => 1,
            CityTier::Tier2 => 2,
            CityTier::Tier3 => 3,
        }
    }
}

impl From<CityTier> for u8 {
    fn from(tier: CityTier) -> Self {
        tier.as_u8()
    }
}

impl TryFrom<u8> for CityTier {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(CityTier::Tier1),
            2 => Ok(CityTier::Tier2),
            3 => Ok(CityTier::Tier3),
            other => Err(format!("invalid city tier {other}")),
        }
    }
}

impl std::fmt::Display for CityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

pub fn classify_city(normalized: &str) -> CityTier {
    if TIER_1_CITIES.contains(&normalized) {
        CityTier::Tier1
    } else if TIER_2_CITIES.contains(&normalized) {
        CityTier::Tier2
    } else {
        CityTier::Tier3
    }
}
