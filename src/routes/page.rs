use askama::Template;
use askama_axum::IntoResponse as AskamaTemplateResponse;
use axum::response::Response;
use chrono::Utc;

use crate::{
    error::AppError,
    models::{form::TravelForm, search::SearchMode, travel::TravelType},
    panel::{EditModal, PanelState, Tab, DELETE_PROMPT},
    views::{self, TravelStats},
};

#[derive(Clone)]
struct TabLink {
    slug: &'static str,
    title: &'static str,
    active: bool,
}

#[derive(Clone)]
struct TypeOption {
    label: &'static str,
    selected: bool,
}

#[derive(Clone)]
struct TypeCount {
    label: &'static str,
    count: usize,
}

#[derive(Clone)]
struct Toast {
    class: &'static str,
    message: String,
    remaining_ms: u128,
}

#[derive(Template)]
#[template(path = "index.html")]
struct PageTemplate {
    tabs: Vec<TabLink>,
    active_tab: &'static str,
    total: usize,
    upcoming: usize,
    average_text: String,
    type_counts: Vec<TypeCount>,
    dashboard_rows: String,
    add_form: TravelForm,
    add_types: Vec<TypeOption>,
    search_modes: Vec<TabLink>,
    search_mode: &'static str,
    search_inputs: String,
    results_label: String,
    search_rows: String,
    editing: Option<EditModal>,
    edit_types: Vec<TypeOption>,
    toast: Option<Toast>,
}

pub fn render(panel: &PanelState) -> Result<Response, AppError> {
    let stats = TravelStats::compute(panel.travels(), Utc::now());
    let results = views::render_search_results(panel.search_results())?;
    let editing = panel.editing().cloned();
    let edit_types = editing
        .as_ref()
        .map(|modal| type_options(&modal.form.travel_type))
        .unwrap_or_default();

    let page = PageTemplate {
        tabs: Tab::ALL
            .into_iter()
            .map(|tab| TabLink {
                slug: tab.slug(),
                title: tab_title(tab),
                active: tab == panel.active_tab(),
            })
            .collect(),
        active_tab: panel.active_tab().slug(),
        total: stats.total,
        upcoming: stats.upcoming,
        average_text: stats.average_text(),
        type_counts: stats
            .by_type
            .iter()
            .map(|(kind, count)| TypeCount {
                label: kind.label(),
                count: *count,
            })
            .collect(),
        dashboard_rows: views::render_dashboard_rows(panel.travels())?,
        add_types: type_options(&panel.add_form().travel_type),
        add_form: panel.add_form().clone(),
        search_modes: SearchMode::ALL
            .into_iter()
            .map(|mode| TabLink {
                slug: mode.slug(),
                title: mode.title(),
                active: mode == panel.search_mode(),
            })
            .collect(),
        search_mode: panel.search_mode().slug(),
        search_inputs: views::render_search_inputs(panel.search_mode())?,
        results_label: results.label,
        search_rows: results.rows_html,
        editing,
        edit_types,
        toast: panel.notifier().current().map(|note| Toast {
            class: note.kind.css_class(),
            message: note.message.clone(),
            remaining_ms: panel
                .notifier()
                .remaining()
                .map(|left| left.as_millis())
                .unwrap_or_default(),
        }),
    };
    Ok(AskamaTemplateResponse::into_response(page))
}

#[derive(Template)]
#[template(path = "confirm_delete.html")]
struct ConfirmDeleteTemplate {
    id: i64,
    prompt: &'static str,
}

pub fn render_delete_confirmation(id: i64) -> Response {
    AskamaTemplateResponse::into_response(ConfirmDeleteTemplate {
        id,
        prompt: DELETE_PROMPT,
    })
}

fn tab_title(tab: Tab) -> &'static str {
    match tab {
        Tab::Dashboard => "Dashboard",
        Tab::AddTravel => "Add Travel",
        Tab::SearchTravel => "Search Travel",
    }
}

fn type_options(selected: &str) -> Vec<TypeOption> {
    TravelType::ALL
        .into_iter()
        .map(|kind| TypeOption {
            label: kind.label(),
            selected: kind.label() == selected,
        })
        .collect()
}
