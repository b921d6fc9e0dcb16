use axum::{
    extract::State,
    middleware,
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use axum_extra::extract::WithRejection;

use crate::api::{ApiError, AppState};
use crate::auth::{jwt_auth_middleware, UserSession};
use crate::models::{ChatRequest, ChatResponse, ConversationHistory, PersonaKind};

/// Chat routes bound to one persona
pub fn persona_routes(state: AppState, persona: PersonaKind) -> Router {
    Router::new()
        .route("/chat", post(chat))
        .route("/history", get(history))
        .route_layer(middleware::from_fn_with_state(
            state.auth_service.clone(),
            jwt_auth_middleware,
        ))
        .layer(Extension(persona))
        .with_state(state)
}

/// Answer one message and log both sides of the exchange
#[tracing::instrument(
    skip(state, session, request),
    fields(username = %session.username, persona = persona.as_str())
)]
async fn chat(
    State(state): State<AppState>,
    Extension(persona): Extension<PersonaKind>,
    Extension(session): Extension<UserSession>,
    WithRejection(Json(request), _): WithRejection<Json<ChatRequest>, ApiError>,
) -> Result<Json<ChatResponse>, ApiError> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(ApiError::validation("Message is required"));
    }

    let context = state.user_context(&session.username)?;
    let reply = state.dispatcher.respond(message, persona, &context).await;

    let (_, logged_reply) = state.conversations.append_exchange(
        &session.username,
        persona,
        message.to_string(),
        reply.clone(),
    )?;

    Ok(Json(ChatResponse {
        reply,
        conversation_id: logged_reply.id,
    }))
}

#[tracing::instrument(
    skip(state, session),
    fields(username = %session.username, persona = persona.as_str())
)]
async fn history(
    State(state): State<AppState>,
    Extension(persona): Extension<PersonaKind>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<ConversationHistory>, ApiError> {
    let conversations = state.conversations.list(&session.username, persona)?;
    Ok(Json(ConversationHistory { conversations }))
}
