pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::screening::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Screening pipeline
        .route("/api/v1/screenings", post(handlers::handle_screen_resume))
        // Stored candidates
        .route("/api/v1/candidates", get(handlers::handle_list_candidates))
        .route(
            "/api/v1/candidates/:id",
            get(handlers::handle_candidate_detail),
        )
        .route(
            "/api/v1/candidates/:id/interview-questions",
            post(handlers::handle_interview_questions),
        )
        .route(
            "/api/v1/candidates/:id/rejection-email",
            post(handlers::handle_rejection_email),
        )
        // Model lifecycle and analytics
        .route("/api/v1/model/train", post(handlers::handle_train_model))
        .route("/api/v1/analytics/fairness", get(handlers::handle_fairness))
        .with_state(state)
}
