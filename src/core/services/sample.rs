use crate::core::models::{choice::Insert as ChoiceInsert, question::Insert as QuestionInsert};
use crate::core::ports::repository::{ChoiceCommon, QuestionCommon, TxStore};
use crate::error::Error;
use chrono::{Duration, Utc};

pub const SAMPLE_POLLS: [(&str, [&str; 5]); 5] = [
    (
        "What is the best programming language for space exploration?",
        ["Python", "JavaScript", "Rust", "C++", "Go"],
    ),
    ("Which planet should humans colonize first?", ["Mars", "Europa", "Titan", "Venus", "The Moon"]),
    (
        "What is the most important web framework feature?",
        ["Admin Interface", "ORM", "URL Routing", "Template System", "Security Features"],
    ),
    (
        "Best way to learn a web framework?",
        ["Official Tutorial", "Building Projects", "Online Courses", "Reading Documentation", "Code Examples"],
    ),
    ("Favorite space-themed movie?", ["Interstellar", "The Martian", "Gravity", "Star Wars", "Star Trek"]),
];

/// Starting vote count of choice `j` in sample question `i`.
pub fn sample_votes(i: usize, j: usize) -> i64 {
    ((5 - j as i64) * (i as i64 + 1) + j as i64 * 2).max(0)
}

/// Replaces every stored poll with the sample set. Question `i` is dated `i`
/// days back so the listing order matches the table above.
pub async fn create_sample_polls<T>(mut storer: T) -> Result<Vec<i64>, Error>
where
    T: TxStore,
{
    let removed = QuestionCommon::delete_all(&mut storer).await?;
    log::info!("cleared {} existing questions", removed);
    let now = Utc::now();
    let mut ids = Vec::with_capacity(SAMPLE_POLLS.len());
    for (i, (text, choices)) in SAMPLE_POLLS.iter().enumerate() {
        let qid = QuestionCommon::insert(
            &mut storer,
            QuestionInsert {
                question_text: text.to_string(),
                pub_date: now - Duration::days(i as i64),
            },
        )
        .await?;
        for (j, choice_text) in choices.iter().enumerate() {
            ChoiceCommon::insert(
                &mut storer,
                ChoiceInsert {
                    question_id: qid,
                    choice_text: choice_text.to_string(),
                    votes: sample_votes(i, j),
                },
            )
            .await?;
        }
        log::info!("created question: \"{}\"", text);
        ids.push(qid);
    }
    storer.commit().await?;
    Ok(ids)
}

#[cfg(test)]
mod test {
    use super::{create_sample_polls, sample_votes, SAMPLE_POLLS};
    use crate::core::models::question::Create;
    use crate::core::ports::repository::Manager;
    use crate::core::services::question::{create_question, latest_questions, question_detail};
    use crate::database::sqlite::migrated_in_memory;

    #[test]
    fn test_sample_votes() {
        assert_eq!(sample_votes(0, 0), 5);
        assert_eq!(sample_votes(0, 4), 9);
        assert_eq!(sample_votes(4, 0), 25);
        assert_eq!(sample_votes(4, 4), 13);
    }

    #[actix_web::test]
    async fn test_create_sample_polls_replaces_existing() {
        let manager = migrated_in_memory().await;
        create_question(
            manager.tx().await.unwrap(),
            Create {
                question_text: "Leftover?".into(),
                pub_date: None,
                choices: vec!["x".into()],
            },
        )
        .await
        .unwrap();
        let ids = create_sample_polls(manager.tx().await.unwrap()).await.unwrap();
        assert_eq!(ids.len(), SAMPLE_POLLS.len());

        let mut db = manager.db().await.unwrap();
        let (latest, total) = latest_questions(&mut db, 10).await.unwrap();
        assert_eq!(total, 5);
        let texts: Vec<&str> = latest.iter().map(|s| s.question.question_text.as_str()).collect();
        let expected: Vec<&str> = SAMPLE_POLLS.iter().map(|(text, _)| *text).collect();
        assert_eq!(texts, expected);

        let first = question_detail(&mut db, ids[0]).await.unwrap();
        assert_eq!(first.choices.len(), 5);
        assert_eq!(first.total_votes, (0..5).map(|j| sample_votes(0, j)).sum::<i64>());
    }
}
