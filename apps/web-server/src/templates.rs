//! HTML templates embedded at compile time and rendered with minijinja.

use actix_web::HttpResponse;
use blogly_core::domain::format_timestamp;
use chrono::{DateTime, Utc};
use minijinja::{Environment, Error, ErrorKind, Value, default_auto_escape_callback};

use crate::middleware::error::{AppError, AppResult};

pub trait TemplateEngine: Send + Sync {
    fn render(&self, template_name: &str, context: Value) -> Result<String, Error>;
}

pub struct MiniJinjaEngine {
    env: Environment<'static>,
}

impl MiniJinjaEngine {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(default_auto_escape_callback);
        env.set_loader(embedded_template_loader);
        env.add_filter("datetime", datetime);
        Self { env }
    }
}

impl Default for MiniJinjaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn render(&self, template_name: &str, context: Value) -> Result<String, Error> {
        let tmpl = self.env.get_template(template_name)?;
        tmpl.render(context)
    }
}

/// Render `template_name` into a `200 OK` HTML response.
pub fn render_page(
    engine: &dyn TemplateEngine,
    template_name: &str,
    context: Value,
) -> AppResult<HttpResponse> {
    let html = engine.render(template_name, context).map_err(|e| {
        AppError::Internal(format!("failed to render {}: {}", template_name, e))
    })?;

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}

/// `{{ post.created_at | datetime }}` - RFC 3339 in, "Mon Jan 1 2024, 9:05 AM" out.
fn datetime(value: &str) -> Result<String, Error> {
    let at = DateTime::parse_from_rfc3339(value).map_err(|e| {
        Error::new(ErrorKind::InvalidOperation, "not an RFC 3339 timestamp").with_source(e)
    })?;
    Ok(format_timestamp(&at.with_timezone(&Utc)))
}

fn embedded_template_loader(name: &str) -> Result<Option<String>, Error> {
    let template_content = match name {
        "base.html" => Some(include_str!("../templates/base.html")),
        "home.html" => Some(include_str!("../templates/home.html")),
        "error.html" => Some(include_str!("../templates/error.html")),

        // Users
        "users/list.html" => Some(include_str!("../templates/users/list.html")),
        "users/new.html" => Some(include_str!("../templates/users/new.html")),
        "users/detail.html" => Some(include_str!("../templates/users/detail.html")),
        "users/edit.html" => Some(include_str!("../templates/users/edit.html")),

        // Posts
        "posts/new.html" => Some(include_str!("../templates/posts/new.html")),
        "posts/detail.html" => Some(include_str!("../templates/posts/detail.html")),
        "posts/edit.html" => Some(include_str!("../templates/posts/edit.html")),

        // Tags
        "tags/list.html" => Some(include_str!("../templates/tags/list.html")),
        "tags/new.html" => Some(include_str!("../templates/tags/new.html")),
        "tags/detail.html" => Some(include_str!("../templates/tags/detail.html")),
        "tags/edit.html" => Some(include_str!("../templates/tags/edit.html")),

        _ => None,
    };

    Ok(template_content.map(|s| s.to_string()))
}
