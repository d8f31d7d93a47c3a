use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// One stored resume payload: the parsed profile and its redacted twin,
/// kept verbatim as JSONB. Append-only, keyed by a generated identifier.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeDocumentRow {
    pub id: Uuid,
    pub filename: String,
    pub parsed: Value,
    pub cleaned: Value,
    pub created_at: DateTime<Utc>,
}
