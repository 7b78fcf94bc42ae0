use crate::core::models::{
    choice::{Choice, Insert as ChoiceInsert, Update as ChoiceUpdate},
    common::Pagination,
    question::{Insert as QuestionInsert, Question, Update as QuestionUpdate},
};
use crate::core::ports::repository::{ChoiceCommon, Common, Manager, QuestionCommon, Store, TxStore};
use crate::error::Error;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::{query, query_as, query_scalar, Executor, QueryBuilder, Sqlite, Transaction};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

pub struct Sqlx<E>
where
    for<'e> &'e mut E: Executor<'e>,
{
    executor: E,
}

impl<E> Sqlx<E>
where
    for<'e> &'e mut E: Executor<'e>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }
}

impl<E> QuestionCommon for Sqlx<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Sqlite>,
{
    async fn insert(&mut self, question: QuestionInsert) -> Result<i64, Error> {
        let id = query_scalar("INSERT INTO questions (question_text, pub_date) VALUES (?, ?) RETURNING id")
            .bind(question.question_text)
            .bind(question.pub_date)
            .fetch_one(&mut self.executor)
            .await?;
        Ok(id)
    }

    async fn query(&mut self, pagination: Option<Pagination>) -> Result<Vec<Question>, Error> {
        let mut stmt = QueryBuilder::<Sqlite>::new("SELECT id, question_text, pub_date FROM questions ORDER BY pub_date DESC, id DESC");
        if let Some(pagination) = pagination {
            stmt.push(" LIMIT ").push_bind(pagination.limit);
        }
        let questions = stmt.build_query_as().fetch_all(&mut self.executor).await?;
        Ok(questions)
    }

    async fn count(&mut self) -> Result<i64, Error> {
        let total = query_scalar("SELECT COUNT(*) FROM questions").fetch_one(&mut self.executor).await?;
        Ok(total)
    }

    async fn get(&mut self, id: i64) -> Result<Option<Question>, Error> {
        let question = query_as("SELECT id, question_text, pub_date FROM questions WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut self.executor)
            .await?;
        Ok(question)
    }

    async fn update(&mut self, id: i64, update: QuestionUpdate) -> Result<bool, Error> {
        let res = query(
            "UPDATE questions
            SET question_text = COALESCE(?, question_text),
                pub_date = COALESCE(?, pub_date)
            WHERE id = ?",
        )
        .bind(update.question_text)
        .bind(update.pub_date)
        .bind(id)
        .execute(&mut self.executor)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete(&mut self, id: i64) -> Result<bool, Error> {
        let res = query("DELETE FROM questions WHERE id = ?").bind(id).execute(&mut self.executor).await?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete_all(&mut self) -> Result<u64, Error> {
        query("DELETE FROM choices").execute(&mut self.executor).await?;
        let res = query("DELETE FROM questions").execute(&mut self.executor).await?;
        Ok(res.rows_affected())
    }
}

impl<E> ChoiceCommon for Sqlx<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Sqlite>,
{
    async fn insert(&mut self, choice: ChoiceInsert) -> Result<i64, Error> {
        let id = query_scalar("INSERT INTO choices (question_id, choice_text, votes) VALUES (?, ?, ?) RETURNING id")
            .bind(choice.question_id)
            .bind(choice.choice_text)
            .bind(choice.votes)
            .fetch_one(&mut self.executor)
            .await?;
        Ok(id)
    }

    async fn query_by_question(&mut self, question_id: i64) -> Result<Vec<Choice>, Error> {
        let choices = query_as(
            "SELECT id, question_id, choice_text, votes
            FROM choices
            WHERE question_id = ?
            ORDER BY votes DESC, choice_text ASC, id ASC",
        )
        .bind(question_id)
        .fetch_all(&mut self.executor)
        .await?;
        Ok(choices)
    }

    async fn get(&mut self, id: i64) -> Result<Option<Choice>, Error> {
        let choice = query_as("SELECT id, question_id, choice_text, votes FROM choices WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut self.executor)
            .await?;
        Ok(choice)
    }

    async fn get_in_question(&mut self, question_id: i64, id: i64) -> Result<Option<Choice>, Error> {
        let choice = query_as("SELECT id, question_id, choice_text, votes FROM choices WHERE id = ? AND question_id = ?")
            .bind(id)
            .bind(question_id)
            .fetch_optional(&mut self.executor)
            .await?;
        Ok(choice)
    }

    async fn update(&mut self, id: i64, update: ChoiceUpdate) -> Result<bool, Error> {
        let res = query(
            "UPDATE choices
            SET choice_text = COALESCE(?, choice_text),
                votes = COALESCE(?, votes)
            WHERE id = ?",
        )
        .bind(update.choice_text)
        .bind(update.votes)
        .bind(id)
        .execute(&mut self.executor)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn increment_votes(&mut self, question_id: i64, id: i64, by: i64) -> Result<bool, Error> {
        let res = query("UPDATE choices SET votes = votes + ? WHERE id = ? AND question_id = ?")
            .bind(by)
            .bind(id)
            .bind(question_id)
            .execute(&mut self.executor)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete(&mut self, id: i64) -> Result<bool, Error> {
        let res = query("DELETE FROM choices WHERE id = ?").bind(id).execute(&mut self.executor).await?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete_by_question(&mut self, question_id: i64) -> Result<u64, Error> {
        let res = query("DELETE FROM choices WHERE question_id = ?")
            .bind(question_id)
            .execute(&mut self.executor)
            .await?;
        Ok(res.rows_affected())
    }
}

impl Common for Sqlx<PoolConnection<Sqlite>> {}
impl Common for Sqlx<Transaction<'static, Sqlite>> {}
impl Store for Sqlx<PoolConnection<Sqlite>> {}
impl Store for Sqlx<Transaction<'static, Sqlite>> {}

impl TxStore for Sqlx<Transaction<'static, Sqlite>> {
    async fn commit(self) -> Result<(), Error> {
        self.executor.commit().await?;
        Ok(())
    }

    async fn rollback(self) -> Result<(), Error> {
        self.executor.rollback().await?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct SqlxManager {
    pool: SqlitePool,
}

impl SqlxManager {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, Error> {
        let options = SqliteConnectOptions::from_str(url)?;
        Self::connect_with(options, max_connections).await
    }

    /// Opens (creating if needed) a database file shared by up to
    /// `max_connections` connections.
    pub async fn open(path: impl AsRef<Path>, max_connections: u32) -> Result<Self, Error> {
        let options = SqliteConnectOptions::new().filename(path);
        Self::connect_with(options, max_connections).await
    }

    async fn connect_with(options: SqliteConnectOptions, max_connections: u32) -> Result<Self, Error> {
        // WAL lets readers proceed while another connection writes.
        let options = options.create_if_missing(true).journal_mode(SqliteJournalMode::Wal);
        let pool = SqlitePoolOptions::new().max_connections(max_connections).connect_with(options).await?;
        Ok(Self::new(pool))
    }

    /// A single-connection in-memory database. The connection is never
    /// recycled because the data lives and dies with it.
    pub async fn in_memory() -> Result<Self, Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect("sqlite::memory:")
            .await?;
        Ok(Self::new(pool))
    }

    pub async fn migrate(&self) -> Result<(), Error> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub async fn begin(&self) -> Result<Sqlx<Transaction<'static, Sqlite>>, Error> {
        let tx = self.pool.begin().await?;
        Ok(Sqlx::new(tx))
    }

    pub async fn acquire(&self) -> Result<Sqlx<PoolConnection<Sqlite>>, Error> {
        let conn = self.pool.acquire().await?;
        Ok(Sqlx::new(conn))
    }
}

impl Manager for SqlxManager {
    type Store = Sqlx<PoolConnection<Sqlite>>;
    type TxStore = Sqlx<Transaction<'static, Sqlite>>;

    async fn db(&self) -> Result<Self::Store, Error> {
        self.acquire().await
    }

    async fn tx(&self) -> Result<Self::TxStore, Error> {
        self.begin().await
    }
}

#[cfg(test)]
pub(crate) async fn migrated_in_memory() -> SqlxManager {
    let manager = SqlxManager::in_memory().await.unwrap();
    manager.migrate().await.unwrap();
    manager
}

/// A migrated database file with several connections, so that concurrent
/// callers really interleave. The directory must outlive the manager.
#[cfg(test)]
pub(crate) async fn migrated_on_disk(max_connections: u32) -> (tempfile::TempDir, SqlxManager) {
    let dir = tempfile::tempdir().unwrap();
    let manager = SqlxManager::open(dir.path().join("polls.sqlite3"), max_connections).await.unwrap();
    manager.migrate().await.unwrap();
    (dir, manager)
}
