use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use tracing::warn;

use crate::{
    error::AppError,
    models::form::TravelForm,
    panel::Confirmation,
    routes::page,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/travels", post(add_travel))
        .route("/travels/:id", post(update_travel))
        .route("/travels/:id/edit", get(open_edit))
        .route("/travels/:id/delete", get(confirm_delete).post(delete_travel))
        .route("/edit/close", get(close_edit))
}

async fn add_travel(State(state): State<AppState>, Form(form): Form<TravelForm>) -> Redirect {
    if let Err(err) = state.panel.add_travel(form).await {
        warn!("Failed to add travel record: {err}");
    }
    Redirect::to("/")
}

async fn open_edit(State(state): State<AppState>, Path(id): Path<i64>) -> Redirect {
    state.panel.open_edit(id).await;
    Redirect::to("/")
}

async fn close_edit(State(state): State<AppState>) -> Redirect {
    state.panel.close_edit().await;
    Redirect::to("/")
}

async fn update_travel(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(mut form): Form<TravelForm>,
) -> Result<Redirect, AppError> {
    let path_id = id.to_string();
    if let Some(raw) = form.id.as_deref().map(str::trim) {
        if raw != path_id {
            return Err(AppError::BadRequest(format!(
                "travel id {raw} does not match /travels/{id}"
            )));
        }
    }
    form.id = Some(path_id);
    if let Err(err) = state.panel.update_travel(form).await {
        warn!("Failed to update travel {id}: {err}");
    }
    Ok(Redirect::to("/"))
}

async fn confirm_delete(Path(id): Path<i64>) -> impl IntoResponse {
    page::render_delete_confirmation(id)
}

#[derive(Deserialize)]
struct DeleteForm {
    confirm: String,
}

async fn delete_travel(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<DeleteForm>,
) -> Redirect {
    let confirmation = if form.confirm == "yes" {
        Confirmation::Confirmed
    } else {
        Confirmation::Declined
    };
    if let Err(err) = state.panel.delete_travel(id, confirmation).await {
        warn!("Failed to delete travel {id}: {err}");
    }
    Redirect::to("/")
}
