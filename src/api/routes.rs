use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::auth::auth_routes;
use super::chat::persona_routes;
use super::fitness::fitness_routes;
use super::health::health_check;
use super::AppState;
use crate::auth::cors_layer;
use crate::config::AppConfig;
use crate::models::PersonaKind;

pub fn create_routes(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/health", get(health_check))
        .nest("/api/auth", auth_routes(state.clone()))
        .nest("/api/fitness", fitness_routes(state.clone()))
        .nest(
            "/api/ai/fitness",
            persona_routes(state.clone(), PersonaKind::FitnessTrainer),
        )
        .nest(
            "/api/ai/nutritionist",
            persona_routes(state, PersonaKind::Nutritionist),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origins))
}
