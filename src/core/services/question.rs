use crate::core::models::{
    choice::Insert as ChoiceInsert,
    common::{validate_text, Pagination},
    question::{total_votes, Create, Detail, Insert as QuestionInsert, Question, Results, Summary, Update},
};
use crate::core::ports::repository::{ChoiceCommon, QuestionCommon, Store, TxStore};
use crate::error::Error;
use chrono::Utc;

pub async fn get_question<S>(storer: &mut S, id: i64) -> Result<Question, Error>
where
    S: Store,
{
    QuestionCommon::get(storer, id).await?.ok_or_else(|| Error::NotFound(format!("question {}", id)))
}

pub async fn latest_questions<S>(storer: &mut S, limit: i64) -> Result<(Vec<Summary>, i64), Error>
where
    S: Store,
{
    let now = Utc::now();
    let total = QuestionCommon::count(storer).await?;
    let questions = QuestionCommon::query(storer, Some(Pagination::first(limit))).await?;
    let mut summaries = Vec::with_capacity(questions.len());
    for question in questions {
        let choices = ChoiceCommon::query_by_question(storer, question.id).await?;
        summaries.push(Summary {
            was_published_recently: question.was_published_recently(now),
            total_votes: total_votes(&choices),
            question,
        });
    }
    Ok((summaries, total))
}

pub async fn all_questions<S>(storer: &mut S) -> Result<(Vec<Question>, i64), Error>
where
    S: Store,
{
    let total = QuestionCommon::count(storer).await?;
    let questions = QuestionCommon::query(storer, None).await?;
    Ok((questions, total))
}

pub async fn question_detail<S>(storer: &mut S, id: i64) -> Result<Detail, Error>
where
    S: Store,
{
    let question = get_question(storer, id).await?;
    let choices = ChoiceCommon::query_by_question(storer, id).await?;
    Ok(Detail::new(question, choices))
}

pub async fn question_results<S>(storer: &mut S, id: i64) -> Result<Results, Error>
where
    S: Store,
{
    Ok(question_detail(storer, id).await?.into())
}

pub async fn create_question<T>(mut storer: T, question: Create) -> Result<i64, Error>
where
    T: TxStore,
{
    validate_text("question_text", &question.question_text)?;
    for choice in &question.choices {
        validate_text("choice_text", choice)?;
    }
    let qid = QuestionCommon::insert(
        &mut storer,
        QuestionInsert {
            question_text: question.question_text,
            pub_date: question.pub_date.unwrap_or_else(Utc::now),
        },
    )
    .await?;
    for choice_text in question.choices {
        ChoiceCommon::insert(
            &mut storer,
            ChoiceInsert {
                question_id: qid,
                choice_text,
                votes: 0,
            },
        )
        .await?;
    }
    storer.commit().await?;
    log::info!("created question {}", qid);
    Ok(qid)
}

pub async fn update_question<S>(storer: &mut S, id: i64, update: Update) -> Result<Question, Error>
where
    S: Store,
{
    if let Some(text) = &update.question_text {
        validate_text("question_text", text)?;
    }
    if !QuestionCommon::update(storer, id, update).await? {
        return Err(Error::NotFound(format!("question {}", id)));
    }
    get_question(storer, id).await
}

/// Removes the question and every choice it owns as one unit.
pub async fn delete_question<T>(mut storer: T, id: i64) -> Result<u64, Error>
where
    T: TxStore,
{
    let removed_choices = ChoiceCommon::delete_by_question(&mut storer, id).await?;
    if !QuestionCommon::delete(&mut storer, id).await? {
        storer.rollback().await?;
        return Err(Error::NotFound(format!("question {}", id)));
    }
    storer.commit().await?;
    log::info!("deleted question {} with {} choices", id, removed_choices);
    Ok(removed_choices)
}
