use anyhow::Result;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::extract::ParsedResume;
use crate::models::resume::ResumeDocumentRow;

/// Stores the parsed and redacted profiles for one upload under a fresh
/// identifier.
pub async fn store_resume_document(
    pool: &PgPool,
    filename: &str,
    parsed: &ParsedResume,
    cleaned: &ParsedResume,
) -> Result<Uuid> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO resume_documents (id, filename, parsed, cleaned)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(id)
    .bind(filename)
    .bind(serde_json::to_value(parsed)?)
    .bind(serde_json::to_value(cleaned)?)
    .execute(pool)
    .await?;

    info!("Stored resume document {id} ({filename})");
    Ok(id)
}

pub async fn get_resume_document(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<ResumeDocumentRow>, sqlx::Error> {
    sqlx::query_as::<_, ResumeDocumentRow>("SELECT * FROM resume_documents WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}
