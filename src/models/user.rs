use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum FitnessLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl FitnessLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FitnessLevel::Beginner => "beginner",
            FitnessLevel::Intermediate => "intermediate",
            FitnessLevel::Advanced => "advanced",
        }
    }
}

/// Goal tags declared on a profile. Unknown tags deserialize as `Other`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GoalTag {
    WeightLoss,
    MuscleGain,
    Flexibility,
    Endurance,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct UserProfile {
    pub age: u32,
    pub gender: Gender,
    #[serde(alias = "height")]
    pub height_cm: f64,
    #[serde(alias = "weight")]
    pub weight_kg: f64,
    pub fitness_level: FitnessLevel,
    pub goals: BTreeSet<GoalTag>,
}

impl UserProfile {
    pub fn has_goal(&self, goal: GoalTag) -> bool {
        self.goals.contains(&goal)
    }
}

/// Partial profile update; absent fields keep their stored value.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProfilePatch {
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    #[serde(alias = "height")]
    pub height_cm: Option<f64>,
    #[serde(alias = "weight")]
    pub weight_kg: Option<f64>,
    pub fitness_level: Option<FitnessLevel>,
    pub goals: Option<BTreeSet<GoalTag>>,
}

impl ProfilePatch {
    pub fn apply(self, profile: &mut UserProfile) {
        if let Some(age) = self.age {
            profile.age = age;
        }
        if let Some(gender) = self.gender {
            profile.gender = gender;
        }
        if let Some(height) = self.height_cm {
            profile.height_cm = height;
        }
        if let Some(weight) = self.weight_kg {
            profile.weight_kg = weight;
        }
        if let Some(level) = self.fitness_level {
            profile.fitness_level = level;
        }
        if let Some(goals) = self.goals {
            profile.goals = goals;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub profile: UserProfile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
