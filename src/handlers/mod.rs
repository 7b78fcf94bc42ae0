pub mod health;
pub mod question;
pub mod vote;

use crate::context::{clear_cookie, Context, Message};
use crate::response::Page;
use actix_web::HttpResponse;
use serde::Serialize;

/// Renders a page and drains the client's flash queue.
pub fn render<T>(ctx: Context, content: T, error_message: Option<&str>, fresh: Vec<Message>) -> HttpResponse
where
    T: Serialize,
{
    let mut builder = HttpResponse::Ok();
    if ctx.has_pending() {
        builder.cookie(clear_cookie());
    }
    let mut messages = ctx.take();
    messages.extend(fresh);
    builder.json(Page {
        content,
        messages,
        error_message: error_message.map(str::to_owned),
    })
}

pub fn results_url(question_id: i64) -> String {
    format!("/polls/{}/results/", question_id)
}
