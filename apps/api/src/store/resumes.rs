use sqlx::PgPool;
use uuid::Uuid;

use crate::models::resume::ResumeRow;

/// One résumé per user: re-submission replaces the previous row in place.
pub async fn upsert(pool: &PgPool, row: &ResumeRow) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO resumes (id, user_id, content_type, data, resume_text, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (user_id) DO UPDATE
        SET content_type = EXCLUDED.content_type,
            data = EXCLUDED.data,
            resume_text = EXCLUDED.resume_text,
            created_at = EXCLUDED.created_at
        "#,
    )
    .bind(row.id)
    .bind(row.user_id)
    .bind(&row.content_type)
    .bind(&row.data)
    .bind(&row.resume_text)
    .bind(row.created_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// The extracted text the QA pipeline runs against; `None` means no résumé
/// on file.
pub async fn fetch_text(pool: &PgPool, user_id: Uuid) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>("SELECT resume_text FROM resumes WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}
