use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use thiserror::Error;

use crate::reports::PdfError;

/// Failure of a request handler, mapped to a response by [`IntoResponse`].
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Not found")]
    NotFound,

    #[error("Forbidden")]
    Forbidden,

    #[error("Login required")]
    Unauthenticated,
}

fn status_page(status: StatusCode, title: &str, message: &str) -> Response {
    let body = format!(
        "<!DOCTYPE html><html><head><title>{title}</title><link rel=\"stylesheet\" href=\"/static/styles.css\"></head>\
         <body><main class=\"container\"><h1>{title}</h1><p>{message}</p><p><a href=\"/\">Back to home</a></p></main></body></html>"
    );
    (status, Html(body)).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Unauthenticated => Redirect::to("/login/").into_response(),
            AppError::Forbidden => status_page(
                StatusCode::FORBIDDEN,
                "403 Forbidden",
                "You do not have permission to access this page.",
            ),
            AppError::NotFound => status_page(
                StatusCode::NOT_FOUND,
                "404 Not Found",
                "The requested incident does not exist.",
            ),
            other => {
                tracing::error!(e = %other, "Request failed");
                status_page(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "500 Internal Server Error",
                    "Something went wrong while handling your request.",
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::LOCATION;

    #[test]
    fn unauthenticated_redirects_to_login() {
        let resp = AppError::Unauthenticated.into_response();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get(LOCATION).unwrap(), "/login/");
    }

    #[test]
    fn status_codes_follow_variant() {
        assert_eq!(AppError::Forbidden.into_response().status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::NotFound.into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Database(sqlx::Error::RowNotFound).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
