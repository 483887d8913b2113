// src/repository/sqlite.rs

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::QuizRepository;
use crate::models::quiz::Quiz;

/// SQLite-backed repository, used for local runs and the test suite.
#[derive(Clone)]
pub struct SqliteQuizRepository {
    pool: SqlitePool,
}

impl SqliteQuizRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuizRepository for SqliteQuizRepository {
    async fn find_all(&self) -> Result<Vec<Quiz>, sqlx::Error> {
        sqlx::query_as::<_, Quiz>("SELECT id, question, answer, author FROM quiz ORDER BY id")
            .fetch_all(&self.pool)
            .await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Quiz>, sqlx::Error> {
        sqlx::query_as::<_, Quiz>("SELECT id, question, answer, author FROM quiz WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn save(&self, quiz: Quiz) -> Result<Quiz, sqlx::Error> {
        match quiz.id {
            None => {
                sqlx::query_as::<_, Quiz>(
                    r#"
                    INSERT INTO quiz (question, answer, author)
                    VALUES (?, ?, ?)
                    RETURNING id, question, answer, author
                    "#,
                )
                .bind(&quiz.question)
                .bind(quiz.answer)
                .bind(&quiz.author)
                .fetch_one(&self.pool)
                .await
            }
            Some(id) => {
                sqlx::query_as::<_, Quiz>(
                    r#"
                    UPDATE quiz
                    SET question = ?, answer = ?, author = ?
                    WHERE id = ?
                    RETURNING id, question, answer, author
                    "#,
                )
                .bind(&quiz.question)
                .bind(quiz.answer)
                .bind(&quiz.author)
                .bind(id)
                .fetch_one(&self.pool)
                .await
            }
        }
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM quiz WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn random_id(&self) -> Result<Option<i64>, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT id FROM quiz ORDER BY RANDOM() LIMIT 1")
            .fetch_optional(&self.pool)
            .await
    }

    async fn random_questions(&self, limit: i64) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT question FROM quiz ORDER BY RANDOM() LIMIT ?")
            .bind(limit)
            .fetch_all(&self.pool)
            .await
    }
}
