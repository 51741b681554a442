//! HTTP handlers and route configuration.

mod health;
mod posts;
mod tags;
mod users;

use actix_web::{HttpResponse, http::header, web};
use minijinja::context;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;
use crate::templates::render_page;

/// How many posts the home page lists.
const RECENT_POSTS: u64 = 5;

/// Configure all application routes.
///
/// Ids that fail to parse from the path get the same 404 page as missing rows.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::NotFound(err.to_string()).into()),
    )
    .route("/", web::get().to(home))
        .service(
            web::scope("/users")
                .route("", web::get().to(users::list))
                .route("/new", web::get().to(users::new_form))
                .route("/new", web::post().to(users::create))
                .route("/{id}", web::get().to(users::show))
                .route("/{id}/edit", web::get().to(users::edit_form))
                .route("/{id}/edit", web::post().to(users::update))
                .route("/{id}/delete", web::post().to(users::delete))
                .route("/{id}/posts/new", web::get().to(posts::new_form))
                .route("/{id}/posts/new", web::post().to(posts::create)),
        )
        .service(
            web::scope("/posts")
                .route("/{id}", web::get().to(posts::show))
                .route("/{id}/edit", web::get().to(posts::edit_form))
                .route("/{id}/edit", web::post().to(posts::update))
                .route("/{id}/delete", web::post().to(posts::delete)),
        )
        .service(
            web::scope("/tags")
                .route("", web::get().to(tags::list))
                .route("/new", web::get().to(tags::new_form))
                .route("/new", web::post().to(tags::create))
                .route("/{id}", web::get().to(tags::show))
                .route("/{id}/edit", web::get().to(tags::edit_form))
                .route("/{id}/edit", web::post().to(tags::update))
                .route("/{id}/delete", web::post().to(tags::delete)),
        )
        .service(web::scope("/api").route("/health", web::get().to(health::health_check)));
}

/// GET /
async fn home(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.service.recent_posts(RECENT_POSTS).await?;
    render_page(state.templates.as_ref(), "home.html", context! { posts => posts })
}

/// Fallback for every unmatched path.
pub async fn not_found() -> AppResult<HttpResponse> {
    Err(AppError::NotFound("No page lives at this address".to_string()))
}

/// `302 Found` pointing at `location`, sent after every successful form post.
fn redirect(location: impl AsRef<str>) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location.as_ref()))
        .finish()
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, test};

    use super::*;

    #[actix_web::test]
    async fn test_home_lists_recent_posts_newest_first() {
        let state = AppState::in_memory();
        let user = state
            .service
            .create_user("Test", Some("Case"), None)
            .await
            .unwrap();
        for title in ["one", "two", "three", "four", "five", "six"] {
            state
                .service
                .create_post(user.id, title, "Hello there.", &[])
                .await
                .unwrap();
        }

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;
        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        let html = std::str::from_utf8(&body).unwrap();
        assert!(html.contains("six"));
        assert!(!html.contains(">one<"));
        assert!(html.contains("Test Case"));
    }

    #[actix_web::test]
    async fn test_unknown_path_renders_404_page() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::in_memory()))
                .configure(configure_routes)
                .default_service(web::to(not_found)),
        )
        .await;
        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/nowhere").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body = test::read_body(resp).await;
        assert!(std::str::from_utf8(&body).unwrap().contains("404 Not Found"));
    }

    #[actix_web::test]
    async fn test_non_numeric_id_renders_404_page() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::in_memory()))
                .configure(configure_routes),
        )
        .await;
        for uri in ["/users/abc", "/posts/abc/edit", "/tags/1.5"] {
            let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");

            let body = test::read_body(resp).await;
            assert!(std::str::from_utf8(&body).unwrap().contains("404 Not Found"));
        }
    }
}
