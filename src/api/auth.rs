use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use axum_extra::extract::WithRejection;

use crate::api::{ApiError, AppState};
use crate::auth::{
    jwt_auth_middleware, AuthResponse, AuthService, ChangePasswordRequest, LoginRequest,
    MessageResponse, RegisterRequest, UpdateProfileRequest, UserInfo, UserSession, VerifyResponse,
};

/// Authentication routes
pub fn auth_routes(state: AppState) -> Router {
    let protected = Router::new()
        .route("/profile", get(get_profile).put(update_profile))
        .route("/change-password", post(change_password))
        .route("/logout", post(logout))
        .route("/verify", get(verify))
        .route_layer(middleware::from_fn_with_state(
            state.auth_service.clone(),
            jwt_auth_middleware,
        ));

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .merge(protected)
        .with_state(state)
}

/// Register a new user
#[tracing::instrument(skip(auth_service, request))]
async fn register(
    State(auth_service): State<AuthService>,
    WithRejection(Json(request), _): WithRejection<Json<RegisterRequest>, ApiError>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let response = auth_service.register(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Login user
#[tracing::instrument(skip(auth_service, request))]
async fn login(
    State(auth_service): State<AuthService>,
    WithRejection(Json(request), _): WithRejection<Json<LoginRequest>, ApiError>,
) -> Result<Json<AuthResponse>, ApiError> {
    let response = auth_service.login(request).await?;
    Ok(Json(response))
}

/// Revoke the presented token
#[tracing::instrument(skip(auth_service, session), fields(username = %session.username))]
async fn logout(
    State(auth_service): State<AuthService>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<MessageResponse>, ApiError> {
    Ok(Json(auth_service.logout(&session)?))
}

#[tracing::instrument(skip(auth_service, session), fields(username = %session.username))]
async fn get_profile(
    State(auth_service): State<AuthService>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<UserInfo>, ApiError> {
    let account = auth_service.get_user(&session.username)?;
    Ok(Json(account.into()))
}

#[tracing::instrument(skip(auth_service, session, request), fields(username = %session.username))]
async fn update_profile(
    State(auth_service): State<AuthService>,
    Extension(session): Extension<UserSession>,
    WithRejection(Json(request), _): WithRejection<Json<UpdateProfileRequest>, ApiError>,
) -> Result<Json<UserInfo>, ApiError> {
    let user = auth_service.update_profile(&session.username, request)?;
    Ok(Json(user))
}

#[tracing::instrument(skip(auth_service, session, request), fields(username = %session.username))]
async fn change_password(
    State(auth_service): State<AuthService>,
    Extension(session): Extension<UserSession>,
    WithRejection(Json(request), _): WithRejection<Json<ChangePasswordRequest>, ApiError>,
) -> Result<Json<MessageResponse>, ApiError> {
    let response = auth_service
        .change_password(&session.username, request)
        .await?;
    Ok(Json(response))
}

/// Confirms the token is valid and returns its owner
async fn verify(
    State(auth_service): State<AuthService>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<VerifyResponse>, ApiError> {
    let account = auth_service.get_user(&session.username)?;
    Ok(Json(VerifyResponse {
        valid: true,
        user: account.into(),
    }))
}
