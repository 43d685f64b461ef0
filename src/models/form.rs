use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, NoneAsEmptyString};

use crate::{
    error::FormError,
    models::travel::{Travel, TravelPayload, TravelType},
};

/// Raw field values of the add and edit forms, exactly as the browser posts
/// them. The edit form additionally carries the hidden `id` field.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelForm {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub id: Option<String>,
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    pub return_date: String,
    pub travel_type: String,
    pub price: String,
    pub currency: String,
    pub passengers: String,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub notes: Option<String>,
}

impl TravelForm {
    /// A blank add form with departure today and return one week later.
    pub fn with_date_defaults(today: NaiveDate) -> Self {
        let next_week = today.checked_add_days(Days::new(7)).unwrap_or(today);
        Self {
            departure_date: today.format("%Y-%m-%d").to_string(),
            return_date: next_week.format("%Y-%m-%d").to_string(),
            travel_type: TravelType::RoundTrip.label().to_string(),
            currency: "USD".into(),
            passengers: "1".into(),
            ..Self::default()
        }
    }

    pub fn from_travel(travel: &Travel) -> Self {
        Self {
            id: Some(travel.id.to_string()),
            origin: travel.origin.clone(),
            destination: travel.destination.clone(),
            departure_date: travel.departure_date.format("%Y-%m-%d").to_string(),
            return_date: travel.return_date.format("%Y-%m-%d").to_string(),
            travel_type: travel.travel_type.label().to_string(),
            price: travel.price.to_string(),
            currency: travel.currency.clone(),
            passengers: travel.passengers.to_string(),
            notes: travel.notes.clone(),
        }
    }

    pub fn id_display(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }

    pub fn notes_display(&self) -> &str {
        self.notes.as_deref().unwrap_or("")
    }

    /// Coerces the add form into a create body. Any `id` is ignored.
    pub fn to_create_payload(&self) -> Result<TravelPayload, FormError> {
        self.coerce(None)
    }

    /// Coerces the edit form into an update body keyed by its `id`.
    pub fn to_update_payload(&self) -> Result<TravelPayload, FormError> {
        let raw = self.id.as_deref().ok_or(FormError::MissingId)?;
        let id = raw
            .trim()
            .parse::<i64>()
            .map_err(|_| FormError::InvalidId(raw.to_string()))?;
        self.coerce(Some(id))
    }

    fn coerce(&self, id: Option<i64>) -> Result<TravelPayload, FormError> {
        let price = self
            .price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .ok_or_else(|| FormError::InvalidPrice(self.price.clone()))?;
        let passengers = self
            .passengers
            .trim()
            .parse::<u32>()
            .map_err(|_| FormError::InvalidPassengers(self.passengers.clone()))?;
        let travel_type = self
            .travel_type
            .parse::<TravelType>()
            .map_err(|err| FormError::InvalidTravelType(err.0))?;

        Ok(TravelPayload {
            id,
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            departure_date: normalize_date(&self.departure_date)?,
            return_date: normalize_date(&self.return_date)?,
            travel_type,
            price,
            currency: self.currency.clone(),
            passengers,
            notes: self.notes.clone(),
        })
    }
}

/// Accepts `YYYY-MM-DD` or a full timestamp and keeps only the date part.
pub fn normalize_date(raw: &str) -> Result<NaiveDate, FormError> {
    let trimmed = raw.trim();
    let date_part = trimmed
        .split(['T', ' '])
        .next()
        .unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| FormError::InvalidDate(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_form() -> TravelForm {
        TravelForm {
            id: None,
            origin: "NYC".into(),
            destination: "LON".into(),
            departure_date: "2024-06-01".into(),
            return_date: "2024-06-08".into(),
            travel_type: "Round-trip".into(),
            price: "450.50".into(),
            currency: "USD".into(),
            passengers: "2".into(),
            notes: None,
        }
    }

    #[test]
    fn coerces_numeric_fields() {
        let payload = sample_form().to_create_payload().expect("payload");
        assert_eq!(payload.price, 450.5);
        assert_eq!(payload.passengers, 2);
        assert_eq!(payload.id, None);

        let body = serde_json::to_value(&payload).unwrap();
        assert_eq!(body["price"], serde_json::json!(450.5));
        assert_eq!(body["passengers"], serde_json::json!(2));
    }

    #[test]
    fn update_requires_integer_id() {
        let mut form = sample_form();
        assert_eq!(form.to_update_payload(), Err(FormError::MissingId));
        form.id = Some("x1".into());
        assert_eq!(
            form.to_update_payload(),
            Err(FormError::InvalidId("x1".into()))
        );
        form.id = Some("12".into());
        assert_eq!(form.to_update_payload().unwrap().id, Some(12));
    }

    #[test]
    fn rejects_garbage_price() {
        let mut form = sample_form();
        form.price = "cheap".into();
        assert_eq!(
            form.to_create_payload(),
            Err(FormError::InvalidPrice("cheap".into()))
        );
    }

    #[test]
    fn normalizes_timestamps_to_dates() {
        let date = normalize_date("2024-06-01T13:45:00Z").unwrap();
        assert_eq!(date.to_string(), "2024-06-01");
        assert!(normalize_date("June first").is_err());
    }

    #[test]
    fn date_defaults_are_one_week_apart() {
        let today = NaiveDate::from_ymd_opt(2024, 12, 28).unwrap();
        let form = TravelForm::with_date_defaults(today);
        assert_eq!(form.departure_date, "2024-12-28");
        assert_eq!(form.return_date, "2025-01-04");
    }

    #[test]
    fn empty_notes_deserialize_as_none() {
        let form: TravelForm = serde_json::from_value(serde_json::json!({
            "id": "",
            "origin": "A",
            "destination": "B",
            "departureDate": "2024-01-01",
            "returnDate": "2024-01-02",
            "travelType": "Leisure",
            "price": "1",
            "currency": "USD",
            "passengers": "1",
            "notes": ""
        }))
        .unwrap();
        assert_eq!(form.id, None);
        assert_eq!(form.notes, None);
    }
}
