use axum::{
    extract::{Query, State},
    http::StatusCode,
    middleware,
    response::Json,
    routing::get,
    Extension, Router,
};
use axum_extra::extract::WithRejection;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::api::{ApiError, AppState};
use crate::auth::{jwt_auth_middleware, MessageResponse, UserSession};
use crate::models::{
    CreateGoalRequest, CreateWorkoutRequest, ExerciseRecommendationQuery,
    ExerciseRecommendationResponse, FitnessProfileSummary, GoalRecord, ProgressResponse,
    TrainingPlanTemplate, UserProfile, WorkoutAnalysis, WorkoutPage, WorkoutQuery, WorkoutRecord,
};
use crate::services::workout_analyzer;

const DEFAULT_PAGE_SIZE: usize = 10;
const MAX_PAGE_SIZE: usize = 100;
const DEFAULT_WEIGHT_KG: f64 = 70.0;

#[derive(Debug, Serialize)]
pub struct WorkoutCreatedResponse {
    pub message: String,
    pub workout: WorkoutRecord,
}

#[derive(Debug, Serialize)]
pub struct GoalCreatedResponse {
    pub message: String,
    pub goal: GoalRecord,
}

#[derive(Debug, Serialize)]
pub struct GoalListResponse {
    pub goals: Vec<GoalRecord>,
}

#[derive(Debug, Serialize)]
pub struct FitnessDataResponse {
    pub workouts: Vec<WorkoutRecord>,
    pub fitness_goals: Vec<GoalRecord>,
}

/// Combined submission; either part may be omitted.
#[derive(Debug, Deserialize)]
pub struct FitnessDataSubmission {
    pub workout: Option<CreateWorkoutRequest>,
    pub goal: Option<CreateGoalRequest>,
}

/// Fitness tracking routes, all behind JWT authentication
pub fn fitness_routes(state: AppState) -> Router {
    Router::new()
        .route("/workouts", get(list_workouts).post(add_workout))
        .route("/goals", get(list_goals).post(add_goal))
        .route("/data", get(get_fitness_data).post(submit_fitness_data))
        .route("/training-plan", get(get_training_plan))
        .route("/analysis", get(get_analysis))
        .route("/exercises/recommendations", get(get_exercise_recommendations))
        .route("/profile", get(get_fitness_profile))
        .route("/progress", get(get_progress))
        .route_layer(middleware::from_fn_with_state(
            state.auth_service.clone(),
            jwt_auth_middleware,
        ))
        .with_state(state)
}

/// Get a page of the user's workouts in submission order
#[tracing::instrument(skip(state, session), fields(username = %session.username))]
async fn list_workouts(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    WithRejection(Query(query), _): WithRejection<Query<WorkoutQuery>, ApiError>,
) -> Result<Json<WorkoutPage>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);
    let offset = query.offset.unwrap_or(0);

    let workouts = state.workouts.list(&session.username)?;
    let total = workouts.len();
    let page = workouts.into_iter().skip(offset).take(limit).collect();

    Ok(Json(WorkoutPage {
        workouts: page,
        total,
        limit,
        offset,
    }))
}

/// Record a workout, estimating calories when none were reported
#[tracing::instrument(skip(state, session, request), fields(username = %session.username))]
async fn add_workout(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    WithRejection(Json(request), _): WithRejection<Json<CreateWorkoutRequest>, ApiError>,
) -> Result<(StatusCode, Json<WorkoutCreatedResponse>), ApiError> {
    let workout = record_workout(&state, &session.username, request)?;

    Ok((
        StatusCode::CREATED,
        Json(WorkoutCreatedResponse {
            message: "Workout added successfully".to_string(),
            workout,
        }),
    ))
}

#[tracing::instrument(skip(state, session), fields(username = %session.username))]
async fn list_goals(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<GoalListResponse>, ApiError> {
    let goals = state.goals.list(&session.username)?;
    Ok(Json(GoalListResponse { goals }))
}

#[tracing::instrument(skip(state, session, request), fields(username = %session.username))]
async fn add_goal(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    WithRejection(Json(request), _): WithRejection<Json<CreateGoalRequest>, ApiError>,
) -> Result<(StatusCode, Json<GoalCreatedResponse>), ApiError> {
    let goal = record_goal(&state, &session.username, request)?;

    Ok((
        StatusCode::CREATED,
        Json(GoalCreatedResponse {
            message: "Goal added successfully".to_string(),
            goal,
        }),
    ))
}

#[tracing::instrument(skip(state, session), fields(username = %session.username))]
async fn get_fitness_data(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<FitnessDataResponse>, ApiError> {
    Ok(Json(FitnessDataResponse {
        workouts: state.workouts.list(&session.username)?,
        fitness_goals: state.goals.list(&session.username)?,
    }))
}

#[tracing::instrument(skip(state, session, submission), fields(username = %session.username))]
async fn submit_fitness_data(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    WithRejection(Json(submission), _): WithRejection<Json<FitnessDataSubmission>, ApiError>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    if submission.workout.is_none() && submission.goal.is_none() {
        return Err(ApiError::validation("workout or goal is required"));
    }

    // Nothing is stored unless both parts are valid.
    if let Some(workout) = &submission.workout {
        validate_workout(workout)?;
    }
    if let Some(goal) = &submission.goal {
        validate_goal(goal)?;
    }

    if let Some(workout) = submission.workout {
        record_workout(&state, &session.username, workout)?;
    }
    if let Some(goal) = submission.goal {
        record_goal(&state, &session.username, goal)?;
    }

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Data submitted successfully")),
    ))
}

/// Personalized weekly plan for the caller's profile
#[tracing::instrument(skip(state, session), fields(username = %session.username))]
async fn get_training_plan(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<TrainingPlanTemplate>, ApiError> {
    let profile = profile_of(&state, &session.username)?.unwrap_or_default();
    Ok(Json(state.plan_generator.generate(&profile)))
}

#[tracing::instrument(skip(state, session), fields(username = %session.username))]
async fn get_analysis(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<WorkoutAnalysis>, ApiError> {
    let workouts = state.workouts.list(&session.username)?;
    Ok(Json(workout_analyzer::analyze_workouts(&workouts)))
}

#[tracing::instrument(skip(state))]
async fn get_exercise_recommendations(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<ExerciseRecommendationQuery>, ApiError>,
) -> Result<Json<ExerciseRecommendationResponse>, ApiError> {
    let muscle_group = query
        .muscle_group
        .filter(|group| !group.trim().is_empty())
        .ok_or_else(|| ApiError::validation("Muscle group is required"))?;

    let recommendations = state
        .exercise_catalog
        .recommend(&muscle_group, query.difficulty);

    Ok(Json(ExerciseRecommendationResponse {
        muscle_group,
        difficulty: query.difficulty,
        recommendations,
    }))
}

#[tracing::instrument(skip(state, session), fields(username = %session.username))]
async fn get_fitness_profile(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<FitnessProfileSummary>, ApiError> {
    let context = state.user_context(&session.username)?;
    Ok(Json(workout_analyzer::summarize_profile(
        context.profile,
        &context.workouts,
        &context.goals,
    )))
}

#[tracing::instrument(skip(state, session), fields(username = %session.username))]
async fn get_progress(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<ProgressResponse>, ApiError> {
    let workouts = state.workouts.list(&session.username)?;
    let goals = state.goals.list(&session.username)?;

    Ok(Json(ProgressResponse {
        progress: workout_analyzer::track_progress(&workouts, &goals),
    }))
}

fn profile_of(state: &AppState, username: &str) -> Result<Option<UserProfile>, ApiError> {
    Ok(state.users.get(username)?.map(|account| account.profile))
}

fn validate_workout(request: &CreateWorkoutRequest) -> Result<(), ApiError> {
    if request.workout_type.trim().is_empty() {
        return Err(ApiError::validation("type is required"));
    }
    if !request.duration_minutes.is_finite() || request.duration_minutes <= 0.0 {
        return Err(ApiError::validation("duration must be a positive number of minutes"));
    }
    if let Some(calories) = request.calories_burned {
        if !calories.is_finite() || calories < 0.0 {
            return Err(ApiError::validation("calories_burned must not be negative"));
        }
    }
    Ok(())
}

fn record_workout(
    state: &AppState,
    username: &str,
    request: CreateWorkoutRequest,
) -> Result<WorkoutRecord, ApiError> {
    validate_workout(&request)?;

    let calories_burned = match request.reported_calories() {
        Some(calories) => calories,
        None => {
            let weight = profile_of(state, username)?
                .map(|profile| profile.weight_kg)
                .filter(|weight| *weight > 0.0)
                .unwrap_or(DEFAULT_WEIGHT_KG);
            state.calorie_estimator.estimate(
                request.primary_exercise(),
                request.duration_minutes,
                weight,
            )
        }
    };

    let workout = WorkoutRecord {
        id: 0,
        workout_type: request.workout_type,
        duration_minutes: request.duration_minutes,
        calories_burned,
        exercises: request.exercises,
        notes: request.notes.unwrap_or_default(),
        date: request.date.unwrap_or_else(Utc::now),
    };

    let stored = state.workouts.append(username, workout)?;
    tracing::info!(workout_id = stored.id, calories = stored.calories_burned, "Recorded workout");
    Ok(stored)
}

fn validate_goal(request: &CreateGoalRequest) -> Result<(), ApiError> {
    if request.goal_type.trim().is_empty() {
        return Err(ApiError::validation("type is required"));
    }
    if !request.target.is_finite() || !request.current.is_finite() {
        return Err(ApiError::validation("target and current must be numbers"));
    }
    Ok(())
}

fn record_goal(
    state: &AppState,
    username: &str,
    request: CreateGoalRequest,
) -> Result<GoalRecord, ApiError> {
    validate_goal(&request)?;

    let stored = state.goals.append(username, request.into_record(Utc::now()))?;
    tracing::info!(goal_id = stored.id, "Recorded goal");
    Ok(stored)
}
