// src/models/quiz.rs

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, de};
use sqlx::prelude::FromRow;
use validator::{Validate, ValidationError, ValidationErrors};

/// Represents the 'quiz' table in the database.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Quiz {
    /// Assigned by storage on insert. `None` only for records not yet saved.
    pub id: Option<i64>,

    /// The statement the player judges as true or false.
    pub question: String,

    /// The canonical answer.
    pub answer: bool,

    pub author: String,
}

impl Quiz {
    /// Builds an unsaved record.
    pub fn new(question: impl Into<String>, answer: bool, author: impl Into<String>) -> Self {
        Self {
            id: None,
            question: question.into(),
            answer,
            author: author.into(),
        }
    }
}

/// Field name -> messages, in a stable order for rendering.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Form-backing object for the create/edit views.
///
/// Deserialized from `application/x-www-form-urlencoded` bodies. Empty inputs
/// for `id` and `answer` count as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct QuizForm {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub id: Option<i64>,

    #[serde(default)]
    #[validate(custom(function = not_blank, message = "Question is required."))]
    pub question: String,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(required(message = "Answer is required."))]
    pub answer: Option<bool>,

    #[serde(default)]
    #[validate(custom(function = not_blank, message = "Author is required."))]
    pub author: String,

    /// `true` while registering a new quiz, `false` while editing one.
    #[serde(default)]
    pub new_quiz: bool,
}

impl QuizForm {
    /// The empty registration form: the answer radio starts at `true`.
    pub fn blank() -> Self {
        Self {
            answer: Some(true),
            new_quiz: true,
            ..Self::default()
        }
    }

    /// Validates the form and converts it into a record carrying the form's id.
    pub fn to_quiz(&self) -> Result<Quiz, FieldErrors> {
        self.validate().map_err(|e| field_messages(&e))?;

        let Some(answer) = self.answer else {
            return Err(FieldErrors::from([(
                "answer".to_string(),
                vec!["Answer is required.".to_string()],
            )]));
        };

        Ok(Quiz {
            id: self.id,
            question: self.question.clone(),
            answer,
            author: self.author.clone(),
        })
    }
}

/// An existing record shown in edit mode.
impl From<Quiz> for QuizForm {
    fn from(quiz: Quiz) -> Self {
        Self {
            id: quiz.id,
            question: quiz.question,
            answer: Some(quiz.answer),
            author: quiz.author,
            new_quiz: false,
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Flattens `validator` output into per-field messages.
pub fn field_messages(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

fn empty_string_as_none<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let opt = Option::<String>::deserialize(de)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<T>().map(Some).map_err(de::Error::custom),
    }
}
