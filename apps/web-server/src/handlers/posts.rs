//! Post pages.

use actix_web::{HttpResponse, web};
use blogly_shared::PostForm;
use minijinja::context;

use super::redirect;
use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::templates::render_page;

/// Checkbox groups repeat the `tags` key, which a struct extractor would reject.
type RawForm = web::Form<Vec<(String, String)>>;

/// GET /users/{id}/posts/new
pub async fn new_form(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let ctx = state.service.new_post_context(path.into_inner()).await?;
    render_page(
        state.templates.as_ref(),
        "posts/new.html",
        context! { user => ctx.user, tags => ctx.tags },
    )
}

/// POST /users/{id}/posts/new
pub async fn create(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    form: RawForm,
) -> AppResult<HttpResponse> {
    let user_id = path.into_inner();
    let form = PostForm::from_pairs(form.into_inner())?;
    state
        .service
        .create_post(user_id, &form.title, &form.content, &form.tags)
        .await?;
    Ok(redirect(format!("/users/{}", user_id)))
}

/// GET /posts/{id}
pub async fn show(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let details = state.service.post_details(path.into_inner()).await?;
    render_page(
        state.templates.as_ref(),
        "posts/detail.html",
        context! { post => details.post, author => details.author, tags => details.tags },
    )
}

/// GET /posts/{id}/edit
pub async fn edit_form(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let ctx = state.service.edit_post_context(path.into_inner()).await?;
    render_page(
        state.templates.as_ref(),
        "posts/edit.html",
        context! { post => ctx.post, tags => ctx.tags, selected => ctx.selected },
    )
}

/// POST /posts/{id}/edit
///
/// Unchecked boxes are absent from the body, so the submitted tags replace
/// the stored set.
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    form: RawForm,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let form = PostForm::from_pairs(form.into_inner())?;
    state
        .service
        .edit_post(id, &form.title, &form.content, &form.tags)
        .await?;
    Ok(redirect(format!("/posts/{}", id)))
}

/// POST /posts/{id}/delete
pub async fn delete(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let post = state.service.delete_post(path.into_inner()).await?;
    Ok(redirect(format!("/users/{}", post.user_id)))
}

#[cfg(test)]
mod tests {
    use actix_web::http::{StatusCode, header};
    use actix_web::{App, test};
    use blogly_core::domain::User;

    use super::super::configure_routes;
    use super::*;

    async fn seeded() -> (AppState, User) {
        let state = AppState::in_memory();
        let user = state
            .service
            .create_user("Test", Some("Case"), None)
            .await
            .unwrap();
        (state, user)
    }

    fn form_body(pairs: &[(&str, &str)]) -> String {
        pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }

    fn post_form(uri: &str, pairs: &[(&str, &str)]) -> test::TestRequest {
        test::TestRequest::post()
            .uri(uri)
            .insert_header((header::CONTENT_TYPE, "application/x-www-form-urlencoded"))
            .set_payload(form_body(pairs))
    }

    #[actix_web::test]
    async fn test_create_post_with_checked_tags() {
        let (state, user) = seeded().await;
        let fun = state.service.create_tag("fun").await.unwrap();
        let rust = state.service.create_tag("rust").await.unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(configure_routes),
        )
        .await;

        let fun_id = fun.id.to_string();
        let rust_id = rust.id.to_string();
        let req = post_form(
            &format!("/users/{}/posts/new", user.id),
            &[
                ("title", "Blogly"),
                ("content", "Hello"),
                ("tags", &fun_id),
                ("tags", &rust_id),
            ],
        )
        .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            format!("/users/{}", user.id).as_str()
        );

        let posts = state.service.user_details(user.id).await.unwrap().posts;
        assert_eq!(posts.len(), 1);
        let details = state.service.post_details(posts[0].id).await.unwrap();
        let names: Vec<_> = details.tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["fun", "rust"]);
    }

    #[actix_web::test]
    async fn test_create_post_for_unknown_user_is_404() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::in_memory()))
                .configure(configure_routes),
        )
        .await;

        let req = post_form("/users/100/posts/new", &[("title", "T"), ("content", "C")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_bad_tag_id_is_400() {
        let (state, user) = seeded().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        let req = post_form(
            &format!("/users/{}/posts/new", user.id),
            &[("title", "T"), ("content", "C"), ("tags", "music")],
        )
        .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_post_page_shows_author_and_timestamp() {
        let (state, user) = seeded().await;
        let post = state
            .service
            .create_post(user.id, "Blogly", "Hello there.", &[])
            .await
            .unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri(&format!("/posts/{}", post.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        let html = std::str::from_utf8(&body).unwrap();
        assert!(html.contains("Test Case"));
        assert!(html.contains(&post.created_at_display()));
    }

    #[actix_web::test]
    async fn test_edit_form_checks_current_tags() {
        let (state, user) = seeded().await;
        let fun = state.service.create_tag("fun").await.unwrap();
        let post = state
            .service
            .create_post(user.id, "Blogly", "Hello there.", &[fun.id])
            .await
            .unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri(&format!("/posts/{}/edit", post.id))
            .to_request();
        let body = test::read_body(test::call_service(&app, req).await).await;
        let html = std::str::from_utf8(&body).unwrap();
        assert!(html.contains(&format!(r#"id="tag_{}" checked"#, fun.id)));
    }

    #[actix_web::test]
    async fn test_edit_without_boxes_clears_tags() {
        let (state, user) = seeded().await;
        let fun = state.service.create_tag("fun").await.unwrap();
        let post = state
            .service
            .create_post(user.id, "Blogly", "Hello there.", &[fun.id])
            .await
            .unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(configure_routes),
        )
        .await;

        let req = post_form(
            &format!("/posts/{}/edit", post.id),
            &[("title", "Blogly"), ("content", "Bye")],
        )
        .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);

        let details = state.service.post_details(post.id).await.unwrap();
        assert_eq!(details.post.content, "Bye");
        assert!(details.tags.is_empty());
    }

    #[actix_web::test]
    async fn test_delete_redirects_to_author() {
        let (state, user) = seeded().await;
        let post = state
            .service
            .create_post(user.id, "Blogly", "Hello there.", &[])
            .await
            .unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri(&format!("/posts/{}/delete", post.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            format!("/users/{}", user.id).as_str()
        );

        let req = test::TestRequest::get()
            .uri(&format!("/posts/{}", post.id))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }
}
