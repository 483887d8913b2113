use crate::services::QuizService;
use axum::extract::FromRef;

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: QuizService,
}

impl FromRef<AppState> for QuizService {
    fn from_ref(state: &AppState) -> Self {
        state.quiz_service.clone()
    }
}
