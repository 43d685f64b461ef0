use std::{fmt, str::FromStr};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TravelType {
    #[serde(rename = "Round-trip")]
    RoundTrip,
    #[serde(rename = "One-way")]
    OneWay,
    #[serde(rename = "Multi-city")]
    MultiCity,
    Business,
    Leisure,
}

impl TravelType {
    pub const ALL: [TravelType; 5] = [
        TravelType::RoundTrip,
        TravelType::OneWay,
        TravelType::MultiCity,
        TravelType::Business,
        TravelType::Leisure,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TravelType::RoundTrip => "Round-trip",
            TravelType::OneWay => "One-way",
            TravelType::MultiCity => "Multi-city",
            TravelType::Business => "Business",
            TravelType::Leisure => "Leisure",
        }
    }
}

impl fmt::Display for TravelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTravelType(pub String);

impl fmt::Display for UnknownTravelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown travel type: {}", self.0)
    }
}

impl std::error::Error for UnknownTravelType {}

impl FromStr for TravelType {
    type Err = UnknownTravelType;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        TravelType::ALL
            .into_iter()
            .find(|kind| kind.label() == raw)
            .ok_or_else(|| UnknownTravelType(raw.to_string()))
    }
}

/// A booking as returned by the travel API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Travel {
    pub id: i64,
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    pub travel_type: TravelType,
    pub price: f64,
    pub currency: String,
    pub passengers: u32,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

/// Request body for create (`id` absent) and update (`id` present).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    pub travel_type: TravelType,
    pub price: f64,
    pub currency: String,
    pub passengers: u32,
    pub notes: Option<String>,
}
