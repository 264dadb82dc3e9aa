use std::sync::Arc;

use sqlx::PgPool;

use crate::pipeline::QaPipeline;
use crate::shortlist::scoring::AnswerQualityClassifier;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub pipeline: QaPipeline,
    /// Pluggable answer-quality policy. Default: DeclinedPrefixClassifier.
    pub classifier: Arc<dyn AnswerQualityClassifier>,
}
