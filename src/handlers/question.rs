use crate::config::Settings;
use crate::context::Context;
use crate::core::ports::repository::Manager;
use crate::core::services::question::{latest_questions, question_detail, question_results};
use crate::database::sqlite::SqlxManager;
use crate::error::Error;
use crate::handlers::render;
use crate::response::List;
use actix_web::web::{Data, Path};
use actix_web::HttpResponse;

pub async fn index(ctx: Context, manager: Data<SqlxManager>, settings: Data<Settings>) -> Result<HttpResponse, Error> {
    let mut db = manager.db().await?;
    let (questions, total) = latest_questions(&mut db, settings.page_size).await?;
    Ok(render(ctx, List::new(questions, total), None, Vec::new()))
}

pub async fn detail(ctx: Context, question_id: Path<i64>, manager: Data<SqlxManager>) -> Result<HttpResponse, Error> {
    let mut db = manager.db().await?;
    let detail = question_detail(&mut db, question_id.into_inner()).await?;
    Ok(render(ctx, detail, None, Vec::new()))
}

pub async fn results(ctx: Context, question_id: Path<i64>, manager: Data<SqlxManager>) -> Result<HttpResponse, Error> {
    let mut db = manager.db().await?;
    let results = question_results(&mut db, question_id.into_inner()).await?;
    Ok(render(ctx, results, None, Vec::new()))
}
