use axum::response::IntoResponse;
use reqwest::StatusCode;

/// Failure of a single request against the upstream API.
///
/// The store only keeps the `Display` text of these, so the message is what
/// the dashboard ends up showing next to the failed card.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("Error {status}")]
    Http { status: u16 },
    #[error("invalid JSON response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("storage io: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage contents: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Internal(color_eyre::eyre::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            Self::NotFound(what) => (StatusCode::NOT_FOUND, format!("Not found: {what}")),
            Self::BadRequest(why) => (StatusCode::BAD_REQUEST, format!("Bad request: {why}")),
            Self::Internal(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Something went wrong: {err}"),
            ),
        }
        .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<color_eyre::eyre::Error>,
{
    fn from(err: E) -> Self {
        Self::Internal(err.into())
    }
}
