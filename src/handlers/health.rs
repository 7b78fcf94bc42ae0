use crate::response::{Health, Landing};
use actix_web::web::Json;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        message: "polls server is running",
        version: VERSION,
    })
}

pub async fn landing() -> Json<Landing> {
    Json(Landing {
        name: env!("CARGO_PKG_NAME"),
        version: VERSION,
        polls: "/polls/",
        health: "/health/",
    })
}
