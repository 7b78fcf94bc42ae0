use crate::core::models::{
    choice::{Choice, Insert as ChoiceInsert, Update as ChoiceUpdate},
    common::Pagination,
    question::{Insert as QuestionInsert, Question, Update as QuestionUpdate},
};
use crate::error::Error;

pub trait QuestionCommon {
    async fn insert(&mut self, question: QuestionInsert) -> Result<i64, Error>;
    /// Newest first by `pub_date`, ties broken by descending id.
    async fn query(&mut self, pagination: Option<Pagination>) -> Result<Vec<Question>, Error>;
    async fn count(&mut self) -> Result<i64, Error>;
    async fn get(&mut self, id: i64) -> Result<Option<Question>, Error>;
    async fn update(&mut self, id: i64, update: QuestionUpdate) -> Result<bool, Error>;
    async fn delete(&mut self, id: i64) -> Result<bool, Error>;
    async fn delete_all(&mut self) -> Result<u64, Error>;
}

pub trait ChoiceCommon {
    async fn insert(&mut self, choice: ChoiceInsert) -> Result<i64, Error>;
    /// Ordered by votes descending, then text, then id.
    async fn query_by_question(&mut self, question_id: i64) -> Result<Vec<Choice>, Error>;
    async fn get(&mut self, id: i64) -> Result<Option<Choice>, Error>;
    async fn get_in_question(&mut self, question_id: i64, id: i64) -> Result<Option<Choice>, Error>;
    async fn update(&mut self, id: i64, update: ChoiceUpdate) -> Result<bool, Error>;
    /// Adds `by` to the vote count in a single statement evaluated by the
    /// storage engine. Returns false when no choice `id` belongs to
    /// `question_id`.
    async fn increment_votes(&mut self, question_id: i64, id: i64, by: i64) -> Result<bool, Error>;
    async fn delete(&mut self, id: i64) -> Result<bool, Error>;
    async fn delete_by_question(&mut self, question_id: i64) -> Result<u64, Error>;
}

pub trait Common: QuestionCommon + ChoiceCommon {}

pub trait Store: Common {}

pub trait TxStore: Store {
    async fn commit(self) -> Result<(), Error>;
    async fn rollback(self) -> Result<(), Error>;
}

pub trait Manager {
    type Store: Store;
    type TxStore: TxStore;

    async fn db(&self) -> Result<Self::Store, Error>;
    async fn tx(&self) -> Result<Self::TxStore, Error>;
}
