//! HTML error pages for browser-facing routes.

use askama::Template;
use askama_web::WebTemplate;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::domain::entities::Caller;
use crate::error::AppError;

/// Error page rendered inside the site layout.
#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub caller: Option<Caller>,
    pub status: u16,
    pub title: String,
    pub message: String,
}

/// Content of an error page, kept in the response extensions so that
/// [`crate::web::middleware::session::layer`] can re-render it for a
/// signed-in caller.
#[derive(Debug, Clone)]
pub struct ErrorPage {
    pub status: StatusCode,
    pub title: &'static str,
    pub message: String,
}

impl ErrorPage {
    pub fn render(&self, caller: Option<Caller>) -> Response {
        let page = ErrorTemplate {
            caller,
            status: self.status.as_u16(),
            title: self.title.to_string(),
            message: self.message.clone(),
        };

        let mut response = (self.status, page).into_response();
        response.extensions_mut().insert(self.clone());
        response
    }
}

/// An [`AppError`] rendered as an HTML page instead of JSON.
///
/// Internal errors never expose their message; it was already logged where
/// the error was created.
#[derive(Debug)]
pub struct PageError(pub AppError);

impl From<AppError> for PageError {
    fn from(error: AppError) -> Self {
        Self(error)
    }
}

impl PageError {
    fn page(&self) -> ErrorPage {
        let (title, message) = match &self.0 {
            AppError::NotFound { .. } => (
                "Page not found",
                "The link you followed does not exist or has been removed.".to_string(),
            ),
            AppError::Internal { .. } => (
                "Something went wrong",
                "Please try again in a moment.".to_string(),
            ),
            AppError::Unauthorized { .. } => ("Sign in required", self.0.message().to_string()),
            AppError::Validation { .. } | AppError::Conflict { .. } => {
                ("Request rejected", self.0.message().to_string())
            }
        };

        ErrorPage {
            status: self.0.status_code(),
            title,
            message,
        }
    }
}

impl IntoResponse for PageError {
    /// Renders the anonymous layout; the session layer swaps in the
    /// signed-in header when there is a caller.
    fn into_response(self) -> Response {
        self.page().render(None)
    }
}

/// Plain 404 page for unmatched browser routes.
pub async fn not_found_handler() -> Response {
    PageError(AppError::not_found("Page not found", serde_json::json!({}))).into_response()
}
