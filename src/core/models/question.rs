use crate::core::models::choice::{Choice, ChoiceWithPercentage};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
pub struct Question {
    pub id: i64,
    pub question_text: String,
    pub pub_date: DateTime<Utc>,
}

impl Question {
    /// True when the question went out within the last day. Future-dated
    /// questions are not considered recent.
    pub fn was_published_recently(&self, now: DateTime<Utc>) -> bool {
        now - Duration::days(1) <= self.pub_date && self.pub_date <= now
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.question_text)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Insert {
    pub question_text: String,
    pub pub_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Update {
    pub question_text: Option<String>,
    pub pub_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Create {
    pub question_text: String,
    pub pub_date: Option<DateTime<Utc>>,
    pub choices: Vec<String>,
}

/// One entry of the latest-questions listing.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    #[serde(flatten)]
    pub question: Question,
    pub was_published_recently: bool,
    pub total_votes: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Detail {
    #[serde(flatten)]
    pub question: Question,
    pub choices: Vec<Choice>,
    pub total_votes: i64,
}

impl Detail {
    pub fn new(question: Question, choices: Vec<Choice>) -> Self {
        let total_votes = total_votes(&choices);
        Self {
            question,
            choices,
            total_votes,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Results {
    #[serde(flatten)]
    pub question: Question,
    pub choices: Vec<ChoiceWithPercentage>,
    pub total_votes: i64,
}

impl From<Detail> for Results {
    fn from(detail: Detail) -> Self {
        let total = detail.total_votes;
        Self {
            question: detail.question,
            choices: detail.choices.into_iter().map(|c| ChoiceWithPercentage::new(c, total)).collect(),
            total_votes: total,
        }
    }
}

pub fn total_votes(choices: &[Choice]) -> i64 {
    choices.iter().map(|c| c.votes).sum()
}

#[cfg(test)]
mod test {
    use super::{total_votes, Detail, Question, Results};
    use crate::core::models::choice::Choice;
    use chrono::{Duration, Utc};

    fn question(pub_date: chrono::DateTime<Utc>) -> Question {
        Question {
            id: 1,
            question_text: "What is Django?".into(),
            pub_date,
        }
    }

    fn choice(id: i64, text: &str, votes: i64) -> Choice {
        Choice {
            id,
            question_id: 1,
            choice_text: text.into(),
            votes,
        }
    }

    #[test]
    fn test_was_published_recently() {
        let now = Utc::now();
        assert!(question(now - Duration::hours(1)).was_published_recently(now));
        assert!(question(now - Duration::hours(23) - Duration::minutes(59)).was_published_recently(now));
        assert!(!question(now - Duration::days(2)).was_published_recently(now));
        assert!(!question(now + Duration::days(30)).was_published_recently(now));
    }

    #[test]
    fn test_display_is_question_text() {
        assert_eq!(question(Utc::now()).to_string(), "What is Django?");
    }

    #[test]
    fn test_total_votes() {
        let choices = vec![choice(1, "A", 10), choice(2, "B", 20), choice(3, "C", 15)];
        assert_eq!(total_votes(&choices), 45);
        assert_eq!(total_votes(&[]), 0);
    }

    #[test]
    fn test_results_from_detail() {
        let detail = Detail::new(question(Utc::now()), vec![choice(2, "B", 75), choice(1, "A", 25)]);
        assert_eq!(detail.total_votes, 100);
        let results = Results::from(detail);
        assert_eq!(results.choices[0].vote_percentage, 75.0);
        assert_eq!(results.choices[1].vote_percentage, 25.0);
    }
}
