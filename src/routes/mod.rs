use std::sync::Arc;

use agrolead_content::ContentSource;
use agrolead_lead::LeadTransport;
use axum::{
    Router,
    routing::{get, post},
};

mod health;
mod lead;

pub use lead::{FieldsQuery, FieldsResponse, SubmitResponse};

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub transport: Arc<dyn LeadTransport>,
    pub content: Option<Arc<dyn ContentSource>>,
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/{locale}/leads/{subject}/fields", get(lead::fields))
        .route("/{locale}/leads/{subject}", post(lead::submit))
        .with_state(app_state)
}
