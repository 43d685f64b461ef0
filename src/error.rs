use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Template(#[from] askama::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
    #[error("not found")]
    NotFound,
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Config(_) | AppError::Io(_) | AppError::Template(_) | AppError::Other(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        (status, self.to_string()).into_response()
    }
}

/// Failure of a call against the travel API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error("network error: {0}")]
    Network(String),
    #[error("invalid response: {0}")]
    Decode(String),
}

/// A form field that could not be coerced into the wire type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("missing travel id")]
    MissingId,
    #[error("invalid travel id: {0}")]
    InvalidId(String),
    #[error("invalid price: {0}")]
    InvalidPrice(String),
    #[error("invalid number of passengers: {0}")]
    InvalidPassengers(String),
    #[error("invalid date: {0}")]
    InvalidDate(String),
    #[error("invalid travel type: {0}")]
    InvalidTravelType(String),
}

/// Why a panel action did not complete. Both kinds have already been shown
/// to the user as an error toast when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    Form(#[from] FormError),
}
