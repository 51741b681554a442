//! Error handling middleware - errors rendered as HTML pages.

use std::fmt;
use std::sync::LazyLock;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use blogly_core::DomainError;
use blogly_shared::{ErrorPage, FormError};
use minijinja::Value;

use crate::templates::{MiniJinjaEngine, TemplateEngine};

/// `ResponseError::error_response` has no access to app state, so error pages
/// get their own engine.
static ERROR_TEMPLATES: LazyLock<MiniJinjaEngine> = LazyLock::new(MiniJinjaEngine::new);

/// Application-level error type that converts to HTML error pages.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl AppError {
    fn page(&self) -> ErrorPage {
        match self {
            AppError::NotFound(detail) => ErrorPage::not_found(detail),
            AppError::BadRequest(detail) => ErrorPage::bad_request(detail),
            AppError::Conflict(detail) => ErrorPage::conflict(detail),
            AppError::Internal(detail) => {
                // Log internal errors
                tracing::error!("Internal error: {}", detail);
                ErrorPage::internal_error()
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let page = self.page();
        let html = match ERROR_TEMPLATES.render("error.html", Value::from_serialize(&page)) {
            Ok(html) => html,
            Err(e) => {
                tracing::error!("Failed to render error template: {}", e);
                fallback_html(&page)
            }
        };

        HttpResponse::build(self.status_code())
            .content_type("text/html; charset=utf-8")
            .body(html)
    }
}

fn fallback_html(page: &ErrorPage) -> String {
    format!(
        "<!DOCTYPE html><html><head><title>{status} {title}</title></head>\
         <body><h1>{status} {title}</h1></body></html>",
        status = page.status,
        title = page.title
    )
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, id } => {
                AppError::NotFound(format!("{} with id {} not found", entity_type, id))
            }
            DomainError::Validation(msg) => AppError::BadRequest(msg),
            DomainError::Constraint(msg) => AppError::Conflict(msg),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<FormError> for AppError {
    fn from(err: FormError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;

    use super::*;

    #[test]
    fn test_domain_errors_map_to_statuses() {
        let cases = [
            (DomainError::not_found("User", 100), StatusCode::NOT_FOUND),
            (DomainError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (DomainError::Constraint("x".into()), StatusCode::CONFLICT),
            (DomainError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).status_code(), status);
        }
    }

    #[actix_web::test]
    async fn test_not_found_page_names_the_entity() {
        let resp = AppError::from(DomainError::not_found("User", 100)).error_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let html = std::str::from_utf8(&body).unwrap();
        assert!(html.contains("404 Not Found"));
        assert!(html.contains("User with id 100 not found"));
    }

    #[actix_web::test]
    async fn test_internal_details_are_hidden() {
        let resp = AppError::Internal("connection refused".into()).error_response();
        let body = to_bytes(resp.into_body()).await.unwrap();
        let html = std::str::from_utf8(&body).unwrap();
        assert!(html.contains("Internal Server Error"));
        assert!(!html.contains("connection refused"));
    }
}
