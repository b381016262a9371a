//! Historical freight-market observations used to train the opportunity model.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Body type of the truck a load was quoted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TruckType {
    #[serde(rename = "Open Body")]
    OpenBody,
    Container,
    Trailer,
}

impl TruckType {
    pub const ALL: [TruckType; 3] = [TruckType::OpenBody, TruckType::Container, TruckType::Trailer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenBody => "Open Body",
            Self::Container => "Container",
            Self::Trailer => "Trailer",
        }
    }
}

impl fmt::Display for TruckType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown truck type '{0}' (expected one of: Open Body, Container, Trailer)")]
pub struct TruckTypeParseError(pub String);

impl FromStr for TruckType {
    type Err = TruckTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TruckType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| TruckTypeParseError(s.to_string()))
    }
}

/// One labeled market record.
///
/// `winning_price` is only meaningful when `load_found` is set; it is exactly
/// `0.0` otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketObservation {
    pub month: u8,
    pub truck_type: TruckType,
    #[serde(with = "flag")]
    pub is_festival: bool,
    pub competitor_rate: f64,
    pub fuel_price: f64,
    #[serde(with = "flag")]
    pub load_found: bool,
    pub winning_price: f64,
}

/// Serialize booleans as `0`/`1`, the way the dataset labels are written.
mod flag {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(u8::deserialize(deserializer)? != 0)
    }
}
