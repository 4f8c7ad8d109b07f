//! HTTP handlers and route configuration.

mod auth;
mod health;
mod posts;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            // Post routes. Literal segments are registered before `{id}`
            // so `slug`, `admin` and `my` are not swallowed by it.
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list_published))
                    .route("", web::post().to(posts::create))
                    .route("/slug/{slug}", web::get().to(posts::get_by_slug))
                    .route("/admin/all", web::get().to(posts::list_for_admin))
                    .route("/my", web::get().to(posts::list_mine))
                    .route("/{id}", web::get().to(posts::get_by_id))
                    .route("/{id}", web::patch().to(posts::update))
                    .route("/{id}/publish", web::patch().to(posts::publish))
                    .route("/{id}/archive", web::patch().to(posts::archive))
                    .route("/{id}", web::delete().to(posts::remove)),
            ),
    );
}
