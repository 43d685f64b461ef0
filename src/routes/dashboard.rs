use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
    routing::{get, post},
    Router,
};
use tracing::warn;

use crate::{error::AppError, panel::Tab, routes::page, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/tab/:tab", get(activate_tab))
        .route("/travels/refresh", post(refresh))
        .route("/notification/dismiss", post(dismiss_notification))
}

async fn index(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let view = state.panel.view().await;
    page::render(&view)
}

async fn activate_tab(
    State(state): State<AppState>,
    Path(tab): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let tab: Tab = tab.parse().map_err(AppError::BadRequest)?;
    if let Err(err) = state.panel.activate_tab(tab).await {
        warn!("Failed to activate the {tab} tab: {err}");
    }
    let view = state.panel.view().await;
    page::render(&view)
}

async fn refresh(State(state): State<AppState>) -> Redirect {
    if let Err(err) = state.panel.refresh_travels().await {
        warn!("Failed to refresh travel records: {err}");
    }
    Redirect::to("/")
}

async fn dismiss_notification(State(state): State<AppState>) -> Redirect {
    state.panel.dismiss_notification().await;
    Redirect::to("/")
}
