//! Tag pages.

use actix_web::{HttpResponse, web};
use blogly_shared::TagForm;
use minijinja::context;

use super::redirect;
use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::templates::render_page;

/// GET /tags
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let tags = state.service.list_tags().await?;
    render_page(state.templates.as_ref(), "tags/list.html", context! { tags => tags })
}

/// GET /tags/new
pub async fn new_form(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    render_page(state.templates.as_ref(), "tags/new.html", context! {})
}

/// POST /tags/new
pub async fn create(
    state: web::Data<AppState>,
    form: web::Form<TagForm>,
) -> AppResult<HttpResponse> {
    state.service.create_tag(&form.name).await?;
    Ok(redirect("/tags"))
}

/// GET /tags/{id}
pub async fn show(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let details = state.service.tag_details(path.into_inner()).await?;
    render_page(
        state.templates.as_ref(),
        "tags/detail.html",
        context! { tag => details.tag, posts => details.posts },
    )
}

/// GET /tags/{id}/edit
pub async fn edit_form(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let tag = state.service.get_tag(path.into_inner()).await?;
    render_page(state.templates.as_ref(), "tags/edit.html", context! { tag => tag })
}

/// POST /tags/{id}/edit
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    form: web::Form<TagForm>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.service.edit_tag(id, &form.name).await?;
    Ok(redirect(format!("/tags/{}", id)))
}

/// POST /tags/{id}/delete
pub async fn delete(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    state.service.delete_tag(path.into_inner()).await?;
    Ok(redirect("/tags"))
}

#[cfg(test)]
mod tests {
    use actix_web::http::{StatusCode, header};
    use actix_web::{App, test};

    use super::super::configure_routes;
    use super::*;

    #[actix_web::test]
    async fn test_create_tag_is_lowercased() {
        let state = AppState::in_memory();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/tags/new")
            .set_form([("name", "Music")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/tags");

        let tags = state.service.list_tags().await.unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].name, "music");
    }

    #[actix_web::test]
    async fn test_duplicate_tag_is_409() {
        let state = AppState::in_memory();
        state.service.create_tag("music").await.unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/tags/new")
            .set_form([("name", "MUSIC")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn test_tag_page_lists_tagged_posts() {
        let state = AppState::in_memory();
        let user = state
            .service
            .create_user("Test", Some("Case"), None)
            .await
            .unwrap();
        let tag = state.service.create_tag("fun").await.unwrap();
        state
            .service
            .create_post(user.id, "Tagged", "Hello", &[tag.id])
            .await
            .unwrap();
        state
            .service
            .create_post(user.id, "Untagged", "Hello", &[])
            .await
            .unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri(&format!("/tags/{}", tag.id))
            .to_request();
        let body = test::read_body(test::call_service(&app, req).await).await;
        let html = std::str::from_utf8(&body).unwrap();
        assert!(html.contains("Tagged"));
        assert!(!html.contains("Untagged"));
    }

    #[actix_web::test]
    async fn test_rename_and_delete() {
        let state = AppState::in_memory();
        let tag = state.service.create_tag("fun").await.unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri(&format!("/tags/{}/edit", tag.id))
            .set_form([("name", "ROCK")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            format!("/tags/{}", tag.id).as_str()
        );
        assert_eq!(state.service.get_tag(tag.id).await.unwrap().name, "rock");

        let req = test::TestRequest::post()
            .uri(&format!("/tags/{}/delete", tag.id))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FOUND);
        assert!(state.service.list_tags().await.unwrap().is_empty());

        let req = test::TestRequest::post()
            .uri(&format!("/tags/{}/delete", tag.id))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }
}
