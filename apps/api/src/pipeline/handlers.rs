//! Axum route handler for the question-answering endpoint.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::state::AppState;
use crate::store;

#[derive(Debug, Deserialize)]
pub struct AskQuestionRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct AskQuestionResponse {
    pub answer: String,
}

/// POST /ask-question
///
/// Answers a free-text question about the caller's résumé and appends the
/// exchange to their QA history. A failed pipeline run writes nothing.
pub async fn handle_ask_question(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<AskQuestionRequest>,
) -> Result<Json<AskQuestionResponse>, AppError> {
    if request.question.trim().is_empty() {
        return Err(AppError::Validation("question cannot be empty".to_string()));
    }

    let resume_text = store::resumes::fetch_text(&state.db, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("No resume on file for this user".to_string()))?;

    let answer = state
        .pipeline
        .answer_question(&resume_text, &request.question)
        .await?;

    store::history::append(&state.db, user.id, &request.question, &answer).await?;

    info!(user_id = %user.id, "question answered");
    Ok(Json(AskQuestionResponse { answer }))
}
