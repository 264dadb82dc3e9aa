#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One résumé per candidate: the uploaded binary plus the extracted text the
/// QA pipeline runs against. Re-submission replaces the row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content_type: String,
    #[serde(skip_serializing)]
    pub data: Vec<u8>,
    pub resume_text: String,
    pub created_at: DateTime<Utc>,
}

impl ResumeRow {
    pub fn new(user_id: Uuid, content_type: String, data: Vec<u8>, resume_text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            content_type,
            data,
            resume_text,
            created_at: Utc::now(),
        }
    }
}
