//! User pages.

use actix_web::{HttpResponse, web};
use blogly_shared::UserForm;
use minijinja::context;

use super::redirect;
use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::templates::render_page;

/// GET /users
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let users = state.service.list_users().await?;
    render_page(state.templates.as_ref(), "users/list.html", context! { users => users })
}

/// GET /users/new
pub async fn new_form(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    render_page(state.templates.as_ref(), "users/new.html", context! {})
}

/// POST /users/new
pub async fn create(
    state: web::Data<AppState>,
    form: web::Form<UserForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    state
        .service
        .create_user(&form.first, Some(&form.last), Some(&form.image))
        .await?;
    Ok(redirect("/users"))
}

/// GET /users/{id}
pub async fn show(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let details = state.service.user_details(path.into_inner()).await?;
    render_page(
        state.templates.as_ref(),
        "users/detail.html",
        context! { user => details.user, posts => details.posts },
    )
}

/// GET /users/{id}/edit
pub async fn edit_form(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let user = state.service.get_user(path.into_inner()).await?;
    render_page(state.templates.as_ref(), "users/edit.html", context! { user => user })
}

/// POST /users/{id}/edit
///
/// Blank inputs leave the stored value alone.
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    form: web::Form<UserForm>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let form = form.into_inner();
    state
        .service
        .edit_user(id, Some(&form.first), Some(&form.last), Some(&form.image))
        .await?;
    Ok(redirect(format!("/users/{}", id)))
}

/// POST /users/{id}/delete
pub async fn delete(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    state.service.delete_user(path.into_inner()).await?;
    Ok(redirect("/users"))
}
