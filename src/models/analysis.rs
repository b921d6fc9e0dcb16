use serde::Serialize;

use super::{GoalProgress, GoalRecord, UserProfile, WorkoutRecord};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WorkoutStats {
    pub total_workouts: usize,
    pub total_calories: f64,
    pub average_duration: f64,
    pub weekly_frequency: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WorkoutAnalysis {
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<WorkoutStats>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProgressStats {
    pub total_workouts: usize,
    pub total_calories: f64,
    pub weekly_frequency: usize,
    pub active_goals: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProgressReport {
    pub stats: ProgressStats,
    pub goal_progress: Vec<GoalProgress>,
    pub recent_activity: Vec<WorkoutRecord>,
}

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub progress: ProgressReport,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProfileStats {
    pub total_workouts: usize,
    pub total_calories: f64,
    pub active_goals: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FitnessProfileSummary {
    pub basic_info: Option<UserProfile>,
    pub stats: ProfileStats,
    pub recent_workouts: Vec<WorkoutRecord>,
    pub active_goals: Vec<GoalRecord>,
}
