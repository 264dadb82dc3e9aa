//! Axum route handler for résumé submission.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde_json::{json, Value};
use tracing::info;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::resume::ResumeRow;
use crate::resume::extract::extract_document;
use crate::state::AppState;
use crate::store;

const RESUME_FIELD: &str = "resume";

/// POST /submit-resume
///
/// Accepts a multipart upload (field `resume`), extracts its text and stores
/// both binary and text, replacing any earlier résumé for the caller.
pub async fn handle_submit_resume(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Value>), AppError> {
    if store::users::fetch(&state.db, user.id).await?.is_none() {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    let mut upload: Option<(String, Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() == Some(RESUME_FIELD) {
            let content_type = field
                .content_type()
                .unwrap_or("application/pdf")
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
            upload = Some((content_type, data));
            break;
        }
    }

    let (content_type, data) =
        upload.ok_or_else(|| AppError::Validation("No resume file uploaded".to_string()))?;

    let document = extract_document(&content_type, &data)?;
    let row = ResumeRow::new(user.id, content_type, data.to_vec(), document.text);
    store::resumes::upsert(&state.db, &row).await?;

    info!(user_id = %user.id, bytes = row.data.len(), "resume stored");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Resume submitted successfully" })),
    ))
}
