use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::repositories::Sequenced;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutRecord {
    pub id: u64,
    #[serde(rename = "type")]
    pub workout_type: String,
    #[serde(alias = "duration")]
    pub duration_minutes: f64,
    pub calories_burned: f64,
    pub exercises: Vec<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(alias = "workout_date")]
    pub date: DateTime<Utc>,
}

impl Sequenced for WorkoutRecord {
    fn assign_id(&mut self, id: u64) {
        self.id = id;
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateWorkoutRequest {
    #[serde(rename = "type")]
    pub workout_type: String,
    #[serde(alias = "duration")]
    pub duration_minutes: f64,
    pub calories_burned: Option<f64>,
    #[serde(default)]
    pub exercises: Vec<String>,
    pub notes: Option<String>,
    #[serde(alias = "workout_date")]
    pub date: Option<DateTime<Utc>>,
}

impl CreateWorkoutRequest {
    /// Name used for calorie estimation: the first exercise, else the workout type.
    pub fn primary_exercise(&self) -> &str {
        self.exercises
            .first()
            .map(String::as_str)
            .unwrap_or(&self.workout_type)
    }

    /// Calories supplied by the client, treating zero as "not supplied".
    pub fn reported_calories(&self) -> Option<f64> {
        self.calories_burned.filter(|calories| *calories > 0.0)
    }
}

#[derive(Debug, Deserialize)]
pub struct WorkoutQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct WorkoutPage {
    pub workouts: Vec<WorkoutRecord>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}
