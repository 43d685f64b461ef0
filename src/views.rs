//! Pure renderers from travel lists to table markup and dashboard numbers.

use askama::Template;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::models::{
    search::SearchMode,
    travel::{Travel, TravelType},
};

pub const DASHBOARD_COLUMNS: usize = 9;
pub const SEARCH_COLUMNS: usize = 8;
pub const NO_TRAVELS: &str = "No travel records found";
pub const NO_MATCHES: &str = "No travel records found matching your criteria";

#[derive(Debug, Clone)]
struct TravelRow {
    id: i64,
    origin: String,
    destination: String,
    departure: String,
    return_date: String,
    travel_type: &'static str,
    price_text: String,
    passengers: u32,
}

impl From<&Travel> for TravelRow {
    fn from(travel: &Travel) -> Self {
        Self {
            id: travel.id,
            origin: travel.origin.clone(),
            destination: travel.destination.clone(),
            departure: format_date(travel.departure_date),
            return_date: format_date(travel.return_date),
            travel_type: travel.travel_type.label(),
            price_text: format!("{} {:.2}", travel.currency, travel.price),
            passengers: travel.passengers,
        }
    }
}

#[derive(Template)]
#[template(path = "partials/travel_rows.html")]
struct TravelRowsTemplate<'a> {
    rows: Vec<TravelRow>,
    with_actions: bool,
    colspan: usize,
    empty_text: &'a str,
}

/// Table body for the dashboard, with Edit and Delete actions per row.
pub fn render_dashboard_rows(travels: &[Travel]) -> Result<String, askama::Error> {
    TravelRowsTemplate {
        rows: travels.iter().map(TravelRow::from).collect(),
        with_actions: true,
        colspan: DASHBOARD_COLUMNS,
        empty_text: NO_TRAVELS,
    }
    .render()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResultsView {
    pub label: String,
    pub rows_html: String,
}

pub fn render_search_results(travels: &[Travel]) -> Result<SearchResultsView, askama::Error> {
    let rows_html = TravelRowsTemplate {
        rows: travels.iter().map(TravelRow::from).collect(),
        with_actions: false,
        colspan: SEARCH_COLUMNS,
        empty_text: NO_MATCHES,
    }
    .render()?;
    Ok(SearchResultsView {
        label: results_label(travels.len()),
        rows_html,
    })
}

pub fn results_label(count: usize) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{count} result{suffix} found")
}

#[derive(Template)]
#[template(path = "partials/search_inputs.html")]
struct SearchInputsTemplate {
    mode: &'static str,
    travel_types: Vec<&'static str>,
}

/// Input panel shown for a search mode.
pub fn render_search_inputs(mode: SearchMode) -> Result<String, askama::Error> {
    SearchInputsTemplate {
        mode: mode.slug(),
        travel_types: TravelType::ALL.iter().map(|kind| kind.label()).collect(),
    }
    .render()
}

#[derive(Debug, Clone, PartialEq)]
pub struct TravelStats {
    pub total: usize,
    pub upcoming: usize,
    pub average_price: f64,
    pub by_type: Vec<(TravelType, usize)>,
}

impl TravelStats {
    /// A trip is upcoming when its departure day, taken as midnight UTC, is
    /// strictly later than `now`.
    pub fn compute(travels: &[Travel], now: DateTime<Utc>) -> Self {
        let total = travels.len();
        let upcoming = travels
            .iter()
            .filter(|travel| departure_instant(travel) > now)
            .count();
        let average_price = if total > 0 {
            travels.iter().map(|travel| travel.price).sum::<f64>() / total as f64
        } else {
            0.0
        };
        let by_type = TravelType::ALL
            .into_iter()
            .map(|kind| {
                let count = travels.iter().filter(|t| t.travel_type == kind).count();
                (kind, count)
            })
            .filter(|(_, count)| *count > 0)
            .collect();

        Self {
            total,
            upcoming,
            average_price,
            by_type,
        }
    }

    pub fn average_text(&self) -> String {
        format!("${:.2}", self.average_price)
    }
}

fn departure_instant(travel: &Travel) -> DateTime<Utc> {
    travel.departure_date.and_time(NaiveTime::MIN).and_utc()
}

/// `2024-06-01` becomes `Jun 1, 2024`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}
