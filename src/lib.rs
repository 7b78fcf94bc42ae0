#![allow(async_fn_in_trait)]

pub mod config;
pub mod context;
pub mod core;
pub mod database;
pub mod error;
pub mod handlers;
pub mod request;
pub mod response;

use actix_web::web::{get, post, scope, ServiceConfig};

/// Route table shared by the server binary and the HTTP tests.
pub fn routes(cfg: &mut ServiceConfig) {
    cfg.route("/", get().to(handlers::health::landing))
        .route("/health/", get().to(handlers::health::health))
        .service(
            scope("/polls")
                .route("/", get().to(handlers::question::index))
                .route("/{question_id}/", get().to(handlers::question::detail))
                .route("/{question_id}/results/", get().to(handlers::question::results))
                .route("/{question_id}/vote/", post().to(handlers::vote::vote)),
        );
}
