use axum::{
    extract::{Path, State},
    response::Redirect,
    routing::{get, post},
    Form, Router,
};
use tracing::warn;

use crate::{
    error::AppError,
    models::search::{SearchForm, SearchMode},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/search", post(search))
        .route("/search/all", post(search_all))
        .route("/search/mode/:mode", get(set_mode))
}

async fn set_mode(
    State(state): State<AppState>,
    Path(mode): Path<String>,
) -> Result<Redirect, AppError> {
    let mode: SearchMode = mode.parse().map_err(AppError::BadRequest)?;
    state.panel.set_search_mode(mode).await;
    Ok(Redirect::to("/"))
}

async fn search(State(state): State<AppState>, Form(form): Form<SearchForm>) -> Redirect {
    if let Err(err) = state.panel.search(&form).await {
        warn!("Search failed: {err}");
    }
    Redirect::to("/")
}

async fn search_all(State(state): State<AppState>) -> Redirect {
    if let Err(err) = state.panel.search_all().await {
        warn!("Failed to list all travels: {err}");
    }
    Redirect::to("/")
}
