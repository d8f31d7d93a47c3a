use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates the two stores on startup if they do not exist yet:
/// `resume_documents` (append-only JSONB payloads) and `candidates`
/// (one relational row per screening, FK into the document store).
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS resume_documents (
            id UUID PRIMARY KEY,
            filename TEXT NOT NULL,
            parsed JSONB NOT NULL,
            cleaned JSONB NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS candidates (
            id UUID PRIMARY KEY,
            resume_id UUID NOT NULL REFERENCES resume_documents(id),
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            job_title TEXT NOT NULL,
            skill_match_score DOUBLE PRECISION NOT NULL,
            prediction TEXT NOT NULL,
            label_class INT NOT NULL,
            confidence_score DOUBLE PRECISION NOT NULL,
            overall_score DOUBLE PRECISION NOT NULL,
            bias_detected BOOLEAN NOT NULL DEFAULT FALSE,
            experience_ratio DOUBLE PRECISION NOT NULL,
            education_score DOUBLE PRECISION NOT NULL,
            certification_count INT NOT NULL,
            skill_count INT NOT NULL,
            experience_required DOUBLE PRECISION NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_candidates_created_at ON candidates (created_at DESC)",
    )
    .execute(pool)
    .await?;

    info!("Database schema ensured");
    Ok(())
}
