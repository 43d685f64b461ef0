use std::{fmt, str::FromStr};

use serde::Deserialize;

use crate::models::travel::TravelType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    #[default]
    All,
    Destination,
    Origin,
    Type,
    Price,
}

impl SearchMode {
    pub const ALL: [SearchMode; 5] = [
        SearchMode::All,
        SearchMode::Destination,
        SearchMode::Origin,
        SearchMode::Type,
        SearchMode::Price,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            SearchMode::All => "all",
            SearchMode::Destination => "destination",
            SearchMode::Origin => "origin",
            SearchMode::Type => "type",
            SearchMode::Price => "price",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            SearchMode::All => "All Travels",
            SearchMode::Destination => "By Destination",
            SearchMode::Origin => "By Origin",
            SearchMode::Type => "By Type",
            SearchMode::Price => "By Price",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for SearchMode {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        SearchMode::ALL
            .into_iter()
            .find(|mode| mode.slug() == raw)
            .ok_or_else(|| format!("unknown search mode: {raw}"))
    }
}

/// A search that passed its precondition and is ready to be sent.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchQuery {
    All,
    Destination(String),
    Origin(String),
    Type(TravelType),
    Price { min: String, max: String },
}

/// Fields of the search panel. Only the inputs of the active mode are
/// rendered, so everything else arrives missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default, rename = "travelType")]
    pub travel_type: Option<String>,
    #[serde(default, rename = "minPrice")]
    pub min_price: Option<String>,
    #[serde(default, rename = "maxPrice")]
    pub max_price: Option<String>,
}

impl SearchForm {
    /// Builds the query for `mode`, or `None` when a required input is blank.
    /// "All" has no inputs and only runs from its own button.
    pub fn to_query(&self, mode: SearchMode) -> Option<SearchQuery> {
        match mode {
            SearchMode::All => None,
            SearchMode::Destination => filled(&self.destination).map(SearchQuery::Destination),
            SearchMode::Origin => filled(&self.origin).map(SearchQuery::Origin),
            SearchMode::Type => filled(&self.travel_type)
                .and_then(|raw| raw.parse::<TravelType>().ok())
                .map(SearchQuery::Type),
            SearchMode::Price => {
                let min = filled(&self.min_price)?;
                let max = filled(&self.max_price)?;
                Some(SearchQuery::Price { min, max })
            }
        }
    }
}

fn filled(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}
