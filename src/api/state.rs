use std::sync::Arc;

use anyhow::Result;
use axum::extract::FromRef;

use crate::api::ApiError;
use crate::auth::{AuthService, JwtService};
use crate::config::seeding::DemoSeeder;
use crate::config::AppConfig;
use crate::models::{GoalRecord, UserContext, WorkoutRecord};
use crate::repositories::{
    ConversationRepository, InMemoryStore, RecordRepository, UserRepository,
};
use crate::services::{CalorieEstimator, ChatDispatcher, ExerciseCatalog, TrainingPlanGenerator};

/// Shared handles for every route group.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub users: Arc<dyn UserRepository>,
    pub workouts: Arc<dyn RecordRepository<WorkoutRecord>>,
    pub goals: Arc<dyn RecordRepository<GoalRecord>>,
    pub conversations: Arc<dyn ConversationRepository>,
    pub dispatcher: Arc<ChatDispatcher>,
    pub calorie_estimator: Arc<CalorieEstimator>,
    pub plan_generator: Arc<TrainingPlanGenerator>,
    pub exercise_catalog: Arc<ExerciseCatalog>,
}

impl AppState {
    /// Wires every repository to a single process-memory store.
    pub fn in_memory(config: &AppConfig) -> Result<Self> {
        let store = Arc::new(InMemoryStore::new());
        let jwt_service = JwtService::new(&config.jwt_secret, config.jwt_expires_hours);
        let auth_service = AuthService::new(store.clone(), jwt_service, config.bcrypt_cost);

        Ok(Self {
            auth_service,
            users: store.clone(),
            workouts: store.clone(),
            goals: store.clone(),
            conversations: store,
            dispatcher: Arc::new(ChatDispatcher::new(config.ai.clone())?),
            calorie_estimator: Arc::new(CalorieEstimator::new()),
            plan_generator: Arc::new(TrainingPlanGenerator::new()),
            exercise_catalog: Arc::new(ExerciseCatalog::new()),
        })
    }

    pub fn seeder(&self) -> DemoSeeder {
        DemoSeeder::new(
            self.auth_service.clone(),
            self.workouts.clone(),
            self.goals.clone(),
        )
    }

    /// Snapshot of everything the chat engine may consult for `username`.
    pub fn user_context(&self, username: &str) -> Result<UserContext, ApiError> {
        let profile = self.users.get(username)?.map(|account| account.profile);
        let workouts = self.workouts.list(username)?;
        let goals = self.goals.list(username)?;

        Ok(UserContext::new(profile, workouts, goals))
    }
}

impl FromRef<AppState> for AuthService {
    fn from_ref(state: &AppState) -> Self {
        state.auth_service.clone()
    }
}
