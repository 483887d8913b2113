// src/handlers/quiz.rs

use axum::{
    Form, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::{
    error::AppError,
    models::{
        quiz::{FieldErrors, Quiz, QuizForm},
        view::{AnswerView, EditView, ListView, PlayView, RandomQuizzesView},
    },
    services::QuizService,
};

/// Form body for `POST /quiz/delete`.
#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    pub id: i64,
}

/// Form body for `POST /quiz/check`.
#[derive(Debug, Deserialize)]
pub struct CheckForm {
    pub id: i64,
    pub answer: bool,
}

/// Shows the registration form together with every stored quiz.
pub async fn show_list(State(service): State<QuizService>) -> Result<impl IntoResponse, AppError> {
    let list = service.list_all().await?;
    tracing::debug!("Listing {} quizzes", list.len());

    Ok(Json(ListView::new(QuizForm::blank(), list, FieldErrors::new())))
}

/// Registers a quiz.
///
/// * Success redirects to the list.
/// * Validation failure re-renders the list with the entered values and field errors.
pub async fn insert(
    State(service): State<QuizService>,
    Form(form): Form<QuizForm>,
) -> Result<Response, AppError> {
    match form.to_quiz() {
        Ok(quiz) => {
            // the id field is ignored on registration
            service.create(Quiz { id: None, ..quiz }).await?;
            Ok(Redirect::to("/quiz").into_response())
        }
        Err(errors) => {
            tracing::warn!("Quiz registration rejected: {:?}", errors);
            let list = service.list_all().await?;
            Ok((StatusCode::BAD_REQUEST, Json(ListView::new(form, list, errors))).into_response())
        }
    }
}

/// Loads one quiz into the form in edit mode.
/// An unknown id shows the default form, still in edit mode.
pub async fn show_update(
    State(service): State<QuizService>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let form = match service.get_by_id(id).await? {
        Some(quiz) => QuizForm::from(quiz),
        None => {
            tracing::debug!("Quiz {} not found, showing blank edit form", id);
            QuizForm::blank()
        }
    };

    Ok(Json(EditView::new(form, FieldErrors::new())))
}

/// Overwrites a quiz identified by the form's id.
///
/// * Success redirects to the edit view of the same id.
/// * Validation failure re-renders the edit form with errors.
/// * An id with no stored quiz is `404`.
pub async fn update(
    State(service): State<QuizService>,
    Form(form): Form<QuizForm>,
) -> Result<Response, AppError> {
    let Some(id) = form.id else {
        return Err(AppError::BadRequest("Quiz id is required".to_string()));
    };

    match form.to_quiz() {
        Ok(quiz) => {
            service.update(quiz).await?;
            Ok(Redirect::to(&format!("/quiz/{}", id)).into_response())
        }
        Err(errors) => {
            tracing::warn!("Quiz {} update rejected: {:?}", id, errors);
            Ok((StatusCode::BAD_REQUEST, Json(EditView::new(form, errors))).into_response())
        }
    }
}

/// Deletes a quiz and returns to the list. Unknown ids are ignored.
pub async fn delete(
    State(service): State<QuizService>,
    Form(form): Form<DeleteForm>,
) -> Result<Redirect, AppError> {
    service.delete_by_id(form.id).await?;
    Ok(Redirect::to("/quiz"))
}

/// Shows one randomly chosen quiz, or a message when there are none.
pub async fn play(State(service): State<QuizService>) -> Result<impl IntoResponse, AppError> {
    let quiz = service.get_random_quiz().await?;
    tracing::debug!("Random quiz picked: {:?}", quiz.as_ref().and_then(|q| q.id));

    Ok(Json(PlayView::from(quiz)))
}

/// Judges a submitted answer.
pub async fn check(
    State(service): State<QuizService>,
    Form(form): Form<CheckForm>,
) -> Result<impl IntoResponse, AppError> {
    let correct = service.check_answer(form.id, form.answer).await?;

    Ok(Json(AnswerView::new(correct)))
}

/// Shows up to five random question texts.
pub async fn show_random_quizzes(
    State(service): State<QuizService>,
) -> Result<impl IntoResponse, AppError> {
    let random_quizzes = service.get_random_quizzes().await?;
    tracing::debug!("Random quiz set: {:?}", random_quizzes);

    Ok(Json(RandomQuizzesView::new(random_quizzes)))
}
