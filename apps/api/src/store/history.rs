use sqlx::PgPool;
use uuid::Uuid;

use crate::models::qa::QaRecordRow;

/// Appends one QA exchange. Append-only: rows are never updated or deleted.
pub async fn append(
    pool: &PgPool,
    user_id: Uuid,
    question: &str,
    answer: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO qa_records (id, user_id, question, answer) VALUES ($1, $2, $3, $4)",
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(question)
    .bind(answer)
    .execute(pool)
    .await?;
    Ok(())
}

/// Every QA record across all candidates, ordered per candidate by ask time.
/// The shortlist handler groups these in memory.
pub async fn list_all(pool: &PgPool) -> Result<Vec<QaRecordRow>, sqlx::Error> {
    sqlx::query_as::<_, QaRecordRow>("SELECT * FROM qa_records ORDER BY user_id, created_at")
        .fetch_all(pool)
        .await
}
