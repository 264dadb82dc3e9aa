pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::pipeline::handlers as qa_handlers;
use crate::resume::handlers as resume_handlers;
use crate::shortlist::handlers as shortlist_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/submit-resume",
            post(resume_handlers::handle_submit_resume),
        )
        .route("/ask-question", post(qa_handlers::handle_ask_question))
        .route(
            "/shortlist-candidates",
            get(shortlist_handlers::handle_shortlist),
        )
        .with_state(state)
}
