// src/repository/mod.rs

//! Data access for the `quiz` table.
//!
//! Repositories translate operations into SQL and own no business rules.
//! Absence is reported as `None` (or silently ignored for deletes), never as an error.

use async_trait::async_trait;

use crate::models::quiz::Quiz;

pub mod postgres;
pub mod sqlite;

pub use postgres::PgQuizRepository;
pub use sqlite::SqliteQuizRepository;

#[async_trait]
pub trait QuizRepository: Send + Sync {
    /// Every stored record, ordered by id.
    async fn find_all(&self) -> Result<Vec<Quiz>, sqlx::Error>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Quiz>, sqlx::Error>;

    /// Inserts a record without an id, or overwrites the row with the record's id.
    ///
    /// Overwriting an id with no row yields `sqlx::Error::RowNotFound`.
    async fn save(&self, quiz: Quiz) -> Result<Quiz, sqlx::Error>;

    /// Deleting a missing id is a no-op.
    async fn delete_by_id(&self, id: i64) -> Result<(), sqlx::Error>;

    /// One id picked uniformly at random by the database, `None` on an empty table.
    async fn random_id(&self) -> Result<Option<i64>, sqlx::Error>;

    /// Up to `limit` distinct question texts in random order.
    async fn random_questions(&self, limit: i64) -> Result<Vec<String>, sqlx::Error>;
}
