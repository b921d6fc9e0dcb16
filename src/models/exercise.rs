use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseCategory {
    Strength,
    Cardio,
    Flexibility,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ExerciseDefinition {
    pub name: &'static str,
    pub category: ExerciseCategory,
    pub muscle_group: Vec<&'static str>,
    pub difficulty: Difficulty,
    pub description: &'static str,
    pub instructions: &'static str,
}

impl ExerciseDefinition {
    /// True when any muscle-group tag contains `query`.
    pub fn targets(&self, query: &str) -> bool {
        self.muscle_group.iter().any(|tag| tag.contains(query))
    }
}

#[derive(Debug, Deserialize)]
pub struct ExerciseRecommendationQuery {
    pub muscle_group: Option<String>,
    #[serde(default)]
    pub difficulty: Difficulty,
}

#[derive(Debug, Serialize)]
pub struct ExerciseRecommendationResponse {
    pub muscle_group: String,
    pub difficulty: Difficulty,
    pub recommendations: Vec<ExerciseDefinition>,
}
