// Domain services: fitness helpers and the chat engine

pub mod calorie_estimator;
pub mod chat_dispatcher;
pub mod exercise_catalog;
pub mod keyword_response;
pub mod plan_generator;
pub mod workout_analyzer;

pub use calorie_estimator::CalorieEstimator;
pub use chat_dispatcher::{ChatDispatcher, CompletionError};
pub use exercise_catalog::ExerciseCatalog;
pub use keyword_response::{Persona, Reply, Trigger};
pub use plan_generator::TrainingPlanGenerator;
