// src/models/view.rs

//! View models handed to the presentation layer, one per screen.

use serde::Serialize;

use super::quiz::{FieldErrors, Quiz, QuizForm};

pub const SITE_TITLE: &str = "OX Quiz: CRUD";
pub const RANDOM_SITE_TITLE: &str = "OX Quiz: Random Quizzes";
pub const CORRECT_MSG: &str = "Correct!";
pub const WRONG_MSG: &str = "Wrong answer.";
pub const NO_QUIZZES_MSG: &str = "No quizzes are registered.";

/// Registration form plus the quiz table.
#[derive(Debug, Serialize)]
pub struct ListView {
    pub site_title: &'static str,
    pub title: &'static str,
    pub form: QuizForm,
    pub list: Vec<Quiz>,
    pub errors: FieldErrors,
}

impl ListView {
    pub fn new(mut form: QuizForm, list: Vec<Quiz>, errors: FieldErrors) -> Self {
        form.new_quiz = true;
        Self {
            site_title: SITE_TITLE,
            title: "Registration Form",
            form,
            list,
            errors,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EditView {
    pub id: Option<i64>,
    pub title: &'static str,
    pub form: QuizForm,
    pub errors: FieldErrors,
}

impl EditView {
    pub fn new(mut form: QuizForm, errors: FieldErrors) -> Self {
        form.new_quiz = false;
        Self {
            id: form.id,
            title: "Update Form",
            form,
            errors,
        }
    }
}

/// Either a quiz to play or the empty-state message.
#[derive(Debug, Serialize)]
pub struct PlayView {
    pub form: Option<QuizForm>,
    pub msg: Option<&'static str>,
}

impl From<Option<Quiz>> for PlayView {
    fn from(quiz: Option<Quiz>) -> Self {
        match quiz {
            Some(quiz) => Self {
                form: Some(QuizForm::from(quiz)),
                msg: None,
            },
            None => Self {
                form: None,
                msg: Some(NO_QUIZZES_MSG),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AnswerView {
    pub msg: &'static str,
}

impl AnswerView {
    pub fn new(correct: bool) -> Self {
        Self {
            msg: if correct { CORRECT_MSG } else { WRONG_MSG },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RandomQuizzesView {
    pub site_title: &'static str,
    pub title: &'static str,
    pub random_quizzes: Vec<String>,
}

impl RandomQuizzesView {
    pub fn new(random_quizzes: Vec<String>) -> Self {
        Self {
            site_title: RANDOM_SITE_TITLE,
            title: "Random Quiz List",
            random_quizzes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_view_without_quiz_carries_message() {
        let view = PlayView::from(None);
        assert!(view.form.is_none());
        assert_eq!(view.msg, Some(NO_QUIZZES_MSG));
    }

    #[test]
    fn edit_view_forces_edit_mode() {
        let form = QuizForm {
            id: Some(3),
            ..QuizForm::blank()
        };
        let view = EditView::new(form, FieldErrors::new());
        assert!(!view.form.new_quiz);
        assert_eq!(view.id, Some(3));
    }

    #[test]
    fn answer_view_messages() {
        assert_eq!(AnswerView::new(true).msg, CORRECT_MSG);
        assert_eq!(AnswerView::new(false).msg, WRONG_MSG);
    }
}
