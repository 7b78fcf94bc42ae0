use crate::context::{queue_cookie, Context, Message};
use crate::core::ports::repository::Manager;
use crate::core::services::vote::{recorded_message, vote as cast_vote, VoteOutcome, NO_CHOICE_MESSAGE};
use crate::database::sqlite::SqlxManager;
use crate::error::Error;
use crate::handlers::{render, results_url};
use crate::request::VoteForm;
use actix_web::http::header;
use actix_web::web::{Data, Form, Path};
use actix_web::HttpResponse;

/// `POST /polls/{id}/vote/`. A counted vote answers with a redirect to the
/// results page so that replaying the request is not silent.
pub async fn vote(ctx: Context, question_id: Path<i64>, form: Option<Form<VoteForm>>, manager: Data<SqlxManager>) -> Result<HttpResponse, Error> {
    let question_id = question_id.into_inner();
    let choice = form.as_ref().and_then(|f| f.choice.as_deref());
    let mut db = manager.db().await?;
    match cast_vote(&mut db, question_id, choice).await? {
        VoteOutcome::Recorded(choice) => {
            let queued = ctx.carry_forward(Message::success(recorded_message(&choice)));
            Ok(HttpResponse::Found()
                .insert_header((header::LOCATION, results_url(question_id)))
                .cookie(queue_cookie(&queued)?)
                .finish())
        }
        VoteOutcome::InvalidSelection(detail) => Ok(render(ctx, detail, Some(NO_CHOICE_MESSAGE), vec![Message::error(NO_CHOICE_MESSAGE)])),
    }
}
