//! Axum route handler for the shortlist endpoint.

use std::collections::HashMap;

use axum::{extract::State, Json};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::qa::QaRecordRow;
use crate::shortlist::scoring::{is_shortlisted, score, ShortlistEntry};
use crate::state::AppState;
use crate::store;

/// GET /shortlist-candidates
///
/// Recomputes accuracy for every candidate with QA history and returns those
/// at or above the threshold. Read-only over the history store; a history
/// appended mid-scan shows up on the next request.
pub async fn handle_shortlist(
    State(state): State<AppState>,
) -> Result<Json<Vec<ShortlistEntry>>, AppError> {
    let users = store::users::list_all(&state.db).await?;
    let records = store::history::list_all(&state.db).await?;

    let mut by_user: HashMap<Uuid, Vec<QaRecordRow>> = HashMap::new();
    for record in records {
        by_user.entry(record.user_id).or_default().push(record);
    }

    let mut shortlisted = Vec::new();
    for user in &users {
        let history = by_user.get(&user.id).map(Vec::as_slice).unwrap_or(&[]);
        if let Some(entry) = score(user, history, state.classifier.as_ref()) {
            if is_shortlisted(&entry) {
                shortlisted.push(entry);
            }
        }
    }

    Ok(Json(shortlisted))
}
