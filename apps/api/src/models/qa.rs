use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One question/answer exchange in a candidate's history.
/// Rows are append-only: answers are never re-evaluated or edited in place —
/// the shortlist recomputes derived accuracy from them at request time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QaRecordRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
}
