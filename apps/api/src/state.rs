use std::sync::Arc;

use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::bias::redact::Redactor;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::matching::embedder::SkillEmbedder;
use crate::scoring::model::SuitabilityModel;

/// Shared application state injected into all route handlers via Axum
/// extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
    /// Pluggable embedding backend behind the `SkillEmbedder` seam.
    pub embedder: Arc<dyn SkillEmbedder>,
    /// Current prediction backend. Training swaps the value in place;
    /// concurrent retrains are last-writer-wins.
    pub model: Arc<RwLock<SuitabilityModel>>,
    pub redactor: Arc<Redactor>,
    pub config: Config,
}
