use crate::core::models::{
    choice::{Choice, Insert as ChoiceInsert, Update},
    common::validate_text,
};
use crate::core::ports::repository::{ChoiceCommon, Store};
use crate::core::services::question::get_question;
use crate::error::Error;

pub async fn get_choice<S>(storer: &mut S, id: i64) -> Result<Choice, Error>
where
    S: Store,
{
    ChoiceCommon::get(storer, id).await?.ok_or_else(|| Error::NotFound(format!("choice {}", id)))
}

/// Fetches a choice only if it belongs to `question_id`.
pub async fn get_choice_of_question<S>(storer: &mut S, question_id: i64, id: i64) -> Result<Choice, Error>
where
    S: Store,
{
    ChoiceCommon::get_in_question(storer, question_id, id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("choice {} of question {}", id, question_id)))
}

pub async fn add_choice<S>(storer: &mut S, question_id: i64, choice_text: String) -> Result<Choice, Error>
where
    S: Store,
{
    validate_text("choice_text", &choice_text)?;
    get_question(storer, question_id).await?;
    let id = ChoiceCommon::insert(
        storer,
        ChoiceInsert {
            question_id,
            choice_text,
            votes: 0,
        },
    )
    .await?;
    get_choice(storer, id).await
}

pub async fn update_choice<S>(storer: &mut S, id: i64, update: Update) -> Result<Choice, Error>
where
    S: Store,
{
    if let Some(text) = &update.choice_text {
        validate_text("choice_text", text)?;
    }
    if let Some(votes) = update.votes {
        if votes < 0 {
            return Err(Error::Validation("votes must not be negative".into()));
        }
    }
    if !ChoiceCommon::update(storer, id, update).await? {
        return Err(Error::NotFound(format!("choice {}", id)));
    }
    get_choice(storer, id).await
}

pub async fn reset_votes<S>(storer: &mut S, id: i64) -> Result<Choice, Error>
where
    S: Store,
{
    let choice = update_choice(
        storer,
        id,
        Update {
            votes: Some(0),
            ..Default::default()
        },
    )
    .await?;
    log::info!("reset votes of choice {}", id);
    Ok(choice)
}

pub async fn delete_choice<S>(storer: &mut S, id: i64) -> Result<(), Error>
where
    S: Store,
{
    if !ChoiceCommon::delete(storer, id).await? {
        return Err(Error::NotFound(format!("choice {}", id)));
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::{add_choice, delete_choice, get_choice, get_choice_of_question, reset_votes, update_choice};
    use crate::core::models::{choice::Update, question::Create};
    use crate::core::ports::repository::Manager;
    use crate::core::services::question::{create_question, question_detail};
    use crate::database::sqlite::{migrated_in_memory, SqlxManager};
    use crate::error::Error;

    async fn question(manager: &SqlxManager, text: &str) -> i64 {
        create_question(
            manager.tx().await.unwrap(),
            Create {
                question_text: text.into(),
                pub_date: None,
                choices: Vec::new(),
            },
        )
        .await
        .unwrap()
    }

    #[actix_web::test]
    async fn test_add_choice_defaults_to_zero_votes() {
        let manager = migrated_in_memory().await;
        let qid = question(&manager, "Test?").await;
        let mut db = manager.db().await.unwrap();
        let choice = add_choice(&mut db, qid, "Test choice".into()).await.unwrap();
        assert_eq!(choice.votes, 0);
        assert_eq!(choice.question_id, qid);
        assert_eq!(choice.to_string(), "Test choice (0 votes)");
        assert!(matches!(add_choice(&mut db, 999, "lost".into()).await, Err(Error::NotFound(_))));
        assert!(matches!(add_choice(&mut db, qid, "".into()).await, Err(Error::Validation(_))));
    }

    #[actix_web::test]
    async fn test_get_choice_of_question() {
        let manager = migrated_in_memory().await;
        let first = question(&manager, "First?").await;
        let second = question(&manager, "Second?").await;
        let mut db = manager.db().await.unwrap();
        let choice = add_choice(&mut db, first, "Yes".into()).await.unwrap();
        assert_eq!(get_choice_of_question(&mut db, first, choice.id).await.unwrap(), choice);
        assert!(matches!(get_choice_of_question(&mut db, second, choice.id).await, Err(Error::NotFound(_))));
        assert!(matches!(get_choice_of_question(&mut db, first, 999).await, Err(Error::NotFound(_))));
    }

    #[actix_web::test]
    async fn test_edit_and_reset() {
        let manager = migrated_in_memory().await;
        let qid = question(&manager, "Test?").await;
        let mut db = manager.db().await.unwrap();
        let choice = add_choice(&mut db, qid, "Maybe".into()).await.unwrap();
        let edited = update_choice(
            &mut db,
            choice.id,
            Update {
                choice_text: Some("Perhaps".into()),
                votes: Some(12),
            },
        )
        .await
        .unwrap();
        assert_eq!(edited.choice_text, "Perhaps");
        assert_eq!(edited.votes, 12);
        assert!(matches!(
            update_choice(
                &mut db,
                choice.id,
                Update {
                    votes: Some(-3),
                    ..Default::default()
                }
            )
            .await,
            Err(Error::Validation(_))
        ));
        assert_eq!(reset_votes(&mut db, choice.id).await.unwrap().votes, 0);
        assert!(matches!(reset_votes(&mut db, 999).await, Err(Error::NotFound(_))));
    }

    #[actix_web::test]
    async fn test_delete_choice() {
        let manager = migrated_in_memory().await;
        let qid = question(&manager, "Test?").await;
        let mut db = manager.db().await.unwrap();
        let gone = add_choice(&mut db, qid, "Gone".into()).await.unwrap();
        add_choice(&mut db, qid, "Stays".into()).await.unwrap();
        delete_choice(&mut db, gone.id).await.unwrap();
        assert!(matches!(get_choice(&mut db, gone.id).await, Err(Error::NotFound(_))));
        assert!(matches!(delete_choice(&mut db, gone.id).await, Err(Error::NotFound(_))));
        let detail = question_detail(&mut db, qid).await.unwrap();
        assert_eq!(detail.choices.len(), 1);
        assert_eq!(detail.choices[0].choice_text, "Stays");
    }
}
