use crate::core::models::{choice::Choice, question::Detail};
use crate::core::ports::repository::{ChoiceCommon, Store};
use crate::core::services::choice::get_choice;
use crate::core::services::question::get_question;
use crate::error::Error;

pub const NO_CHOICE_MESSAGE: &str = "You didn't select a choice.";

#[derive(Debug)]
pub enum VoteOutcome {
    /// The vote was counted; carries the choice as persisted after the increment.
    Recorded(Choice),
    /// No usable choice was submitted. Nothing was written.
    InvalidSelection(Detail),
}

pub fn recorded_message(choice: &Choice) -> String {
    format!("Your vote for '{}' has been recorded!", choice.choice_text)
}

/// Records one vote for `choice` (the raw form value) within `question_id`.
///
/// The counter is bumped by a single `votes = votes + 1` statement so that
/// overlapping votes on the same choice are never lost. A missing,
/// malformed or foreign choice id leaves every count untouched and yields
/// [`VoteOutcome::InvalidSelection`] instead of an error.
pub async fn vote<S>(storer: &mut S, question_id: i64, choice: Option<&str>) -> Result<VoteOutcome, Error>
where
    S: Store,
{
    let question = get_question(storer, question_id).await?;
    if let Some(choice_id) = choice.and_then(|c| c.trim().parse::<i64>().ok()) {
        if ChoiceCommon::increment_votes(storer, question_id, choice_id, 1).await? {
            let choice = get_choice(storer, choice_id).await?;
            log::info!("vote recorded for choice {} of question {}, now {}", choice.id, question_id, choice.votes);
            return Ok(VoteOutcome::Recorded(choice));
        }
    }
    log::warn!("invalid selection {:?} for question {}", choice, question_id);
    let choices = ChoiceCommon::query_by_question(storer, question.id).await?;
    Ok(VoteOutcome::InvalidSelection(Detail::new(question, choices)))
}
