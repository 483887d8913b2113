// src/services/quiz.rs

use std::sync::Arc;

use crate::{error::AppError, models::quiz::Quiz, repository::QuizRepository};

/// Number of questions returned by [`QuizService::get_random_quizzes`].
pub const RANDOM_QUIZ_COUNT: u32 = 5;

/// Business logic for quizzes. Stateless; clones share the same repository.
#[derive(Clone)]
pub struct QuizService {
    repo: Arc<dyn QuizRepository>,
}

impl QuizService {
    pub fn new(repo: Arc<dyn QuizRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_all(&self) -> Result<Vec<Quiz>, AppError> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Quiz>, AppError> {
        Ok(self.repo.find_by_id(id).await?)
    }

    /// Picks a random quiz, or `None` when the table is empty.
    ///
    /// If the picked row is deleted before it is read back, this also yields `None`.
    pub async fn get_random_quiz(&self) -> Result<Option<Quiz>, AppError> {
        let Some(id) = self.repo.random_id().await? else {
            return Ok(None);
        };
        Ok(self.repo.find_by_id(id).await?)
    }

    /// `true` only if the quiz exists and its answer equals `submitted`.
    /// An unknown id counts as a wrong answer.
    pub async fn check_answer(&self, id: i64, submitted: bool) -> Result<bool, AppError> {
        let quiz = self.repo.find_by_id(id).await?;
        Ok(quiz.is_some_and(|q| q.answer == submitted))
    }

    pub async fn create(&self, quiz: Quiz) -> Result<Quiz, AppError> {
        if quiz.id.is_some() {
            return Err(AppError::BadRequest(
                "A new quiz must not carry an id".to_string(),
            ));
        }
        let saved = self.repo.save(quiz).await?;
        tracing::info!(id = ?saved.id, "Quiz created");
        Ok(saved)
    }

    /// Overwrites an existing quiz. Updating an id with no row is `NotFound`.
    pub async fn update(&self, quiz: Quiz) -> Result<Quiz, AppError> {
        let Some(id) = quiz.id else {
            return Err(AppError::BadRequest("Quiz id is required".to_string()));
        };
        let saved = self.repo.save(quiz).await.map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::NotFound(format!("Quiz {} not found", id)),
            other => other.into(),
        })?;
        tracing::info!(id, "Quiz updated");
        Ok(saved)
    }

    pub async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        self.repo.delete_by_id(id).await?;
        tracing::info!(id, "Quiz deleted");
        Ok(())
    }

    pub async fn get_random_quizzes(&self) -> Result<Vec<String>, AppError> {
        self.get_random_quizzes_with(RANDOM_QUIZ_COUNT).await
    }

    /// Up to `count` random question texts.
    pub async fn get_random_quizzes_with(&self, count: u32) -> Result<Vec<String>, AppError> {
        Ok(self.repo.random_questions(i64::from(count)).await?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::{db::connect_sqlite, repository::SqliteQuizRepository};

    async fn service() -> QuizService {
        let pool = connect_sqlite("sqlite::memory:", 1).await.unwrap();
        QuizService::new(Arc::new(SqliteQuizRepository::new(pool)))
    }

    /// Repository whose random pick points at a row that no longer exists.
    #[derive(Default)]
    struct StaleRepo {
        random: Option<i64>,
        lookups: AtomicUsize,
    }

    #[async_trait]
    impl QuizRepository for StaleRepo {
        async fn find_all(&self) -> Result<Vec<Quiz>, sqlx::Error> {
            Ok(Vec::new())
        }

        async fn find_by_id(&self, _id: i64) -> Result<Option<Quiz>, sqlx::Error> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            Ok(None)
        }

        async fn save(&self, _quiz: Quiz) -> Result<Quiz, sqlx::Error> {
            Err(sqlx::Error::PoolClosed)
        }

        async fn delete_by_id(&self, _id: i64) -> Result<(), sqlx::Error> {
            Ok(())
        }

        async fn random_id(&self) -> Result<Option<i64>, sqlx::Error> {
            Ok(self.random)
        }

        async fn random_questions(&self, _limit: i64) -> Result<Vec<String>, sqlx::Error> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn create_update_delete_scenario() {
        let service = service().await;

        let created = service
            .create(Quiz::new("Java는 객체 지향 언어인가?", true, "작성자1"))
            .await
            .unwrap();
        let id = created.id.expect("storage assigns an id");

        let fetched = service.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(fetched.question, "Java는 객체 지향 언어인가?");
        assert!(fetched.answer);
        assert_eq!(fetched.author, "작성자1");

        service
            .update(Quiz {
                question: "Java는 정적 타입 언어인가?".to_string(),
                ..fetched
            })
            .await
            .unwrap();

        let updated = service.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(updated.question, "Java는 정적 타입 언어인가?");
        assert!(updated.answer);
        assert_eq!(updated.author, "작성자1");

        service.delete_by_id(id).await.unwrap();
        assert!(service.get_by_id(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn create_rejects_record_with_id() {
        let service = service().await;
        let quiz = Quiz {
            id: Some(1),
            ..Quiz::new("Q", true, "a")
        };

        let err = service.create(quiz).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_not_found() {
        let service = service().await;
        let quiz = Quiz {
            id: Some(42),
            ..Quiz::new("Q", true, "a")
        };

        let err = service.update(quiz).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(service.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_without_id_is_bad_request() {
        let service = service().await;
        let err = service.update(Quiz::new("Q", true, "a")).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn delete_of_unknown_id_succeeds() {
        let service = service().await;
        service.delete_by_id(777).await.unwrap();
    }

    #[tokio::test]
    async fn check_answer_compares_exactly() {
        let service = service().await;
        let id = service
            .create(Quiz::new("Rust has a borrow checker.", true, "ferris"))
            .await
            .unwrap()
            .id
            .unwrap();

        assert!(service.check_answer(id, true).await.unwrap());
        assert!(!service.check_answer(id, false).await.unwrap());
        assert!(!service.check_answer(id + 100, true).await.unwrap());
        assert!(!service.check_answer(id + 100, false).await.unwrap());
    }

    #[tokio::test]
    async fn random_quiz_on_empty_store_is_none() {
        let service = service().await;
        assert!(service.get_random_quiz().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn random_quiz_returns_stored_record() {
        let service = service().await;
        let created = service.create(Quiz::new("Only one", false, "a")).await.unwrap();

        let picked = service.get_random_quiz().await.unwrap().unwrap();
        assert_eq!(picked, created);
    }

    #[tokio::test]
    async fn random_quiz_skips_lookup_when_store_is_empty() {
        let repo = Arc::new(StaleRepo::default());
        let service = QuizService::new(repo.clone());

        assert!(service.get_random_quiz().await.unwrap().is_none());
        assert_eq!(repo.lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn random_quiz_deleted_before_lookup_is_none() {
        let repo = Arc::new(StaleRepo {
            random: Some(9),
            ..StaleRepo::default()
        });
        let service = QuizService::new(repo.clone());

        assert!(service.get_random_quiz().await.unwrap().is_none());
        assert_eq!(repo.lookups.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn storage_failure_propagates_as_internal_error() {
        let service = QuizService::new(Arc::new(StaleRepo::default()));
        let err = service.create(Quiz::new("Q", true, "a")).await.unwrap_err();
        assert!(matches!(err, AppError::InternalServerError(_)));
    }

    #[tokio::test]
    async fn random_quizzes_returns_everything_below_five() {
        let service = service().await;
        for q in ["A", "B", "C"] {
            service.create(Quiz::new(q, true, "a")).await.unwrap();
        }

        let mut picked = service.get_random_quizzes().await.unwrap();
        picked.sort();
        assert_eq!(picked, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn random_quizzes_caps_at_five_stored_questions() {
        let service = service().await;
        let mut stored = Vec::new();
        for i in 0..9 {
            let q = format!("Question {}", i);
            service.create(Quiz::new(q.clone(), i % 2 == 0, "a")).await.unwrap();
            stored.push(q);
        }

        let picked = service.get_random_quizzes().await.unwrap();
        assert_eq!(picked.len(), RANDOM_QUIZ_COUNT as usize);
        assert!(picked.iter().all(|q| stored.contains(q)));
    }

    #[tokio::test]
    async fn random_quizzes_with_honors_small_counts() {
        let service = service().await;
        for i in 0..4 {
            service.create(Quiz::new(format!("Q{}", i), true, "a")).await.unwrap();
        }

        assert!(service.get_random_quizzes_with(0).await.unwrap().is_empty());
        assert_eq!(service.get_random_quizzes_with(2).await.unwrap().len(), 2);
        assert_eq!(service.get_random_quizzes_with(u32::MAX).await.unwrap().len(), 4);
    }
}
