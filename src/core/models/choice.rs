use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

#[derive(Debug, Clone, Serialize, FromRow, PartialEq, Eq)]
pub struct Choice {
    pub id: i64,
    pub question_id: i64,
    pub choice_text: String,
    pub votes: i64,
}

impl Choice {
    /// Share of `total` held by this choice, in percent rounded to one
    /// decimal place. Zero when nobody has voted yet.
    pub fn vote_percentage(&self, total: i64) -> f64 {
        if total == 0 {
            return 0.0;
        }
        let percentage = self.votes as f64 / total as f64 * 100.0;
        (percentage * 10.0).round() / 10.0
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} votes)", self.choice_text, self.votes)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChoiceWithPercentage {
    #[serde(flatten)]
    pub choice: Choice,
    pub vote_percentage: f64,
}

impl ChoiceWithPercentage {
    pub fn new(choice: Choice, total: i64) -> Self {
        let vote_percentage = choice.vote_percentage(total);
        Self { choice, vote_percentage }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Insert {
    pub question_id: i64,
    pub choice_text: String,
    pub votes: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Update {
    pub choice_text: Option<String>,
    pub votes: Option<i64>,
}

#[cfg(test)]
mod test {
    use super::Choice;

    fn choice(votes: i64) -> Choice {
        Choice {
            id: 1,
            question_id: 1,
            choice_text: "Yes".into(),
            votes,
        }
    }

    #[test]
    fn test_vote_percentage() {
        assert_eq!(choice(25).vote_percentage(100), 25.0);
        assert_eq!(choice(1).vote_percentage(3), 33.3);
        assert_eq!(choice(2).vote_percentage(3), 66.7);
        assert_eq!(choice(7).vote_percentage(7), 100.0);
    }

    #[test]
    fn test_vote_percentage_without_votes() {
        assert_eq!(choice(0).vote_percentage(0), 0.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(choice(3).to_string(), "Yes (3 votes)");
    }
}
