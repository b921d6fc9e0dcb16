use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::repositories::Sequenced;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    #[default]
    Active,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoalRecord {
    pub id: u64,
    #[serde(rename = "type")]
    pub goal_type: String,
    pub target: f64,
    pub current: f64,
    #[serde(default)]
    pub unit: String,
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub status: GoalStatus,
    pub created_at: DateTime<Utc>,
}

impl GoalRecord {
    pub fn is_active(&self) -> bool {
        self.status == GoalStatus::Active
    }

    /// Completion in percent, one decimal. A non-positive target counts as 0%.
    pub fn progress_percentage(&self) -> f64 {
        if self.target <= 0.0 {
            return 0.0;
        }
        let percentage = (self.current / self.target * 100.0).max(0.0);
        (percentage * 10.0).round() / 10.0
    }
}

impl Sequenced for GoalRecord {
    fn assign_id(&mut self, id: u64) {
        self.id = id;
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateGoalRequest {
    #[serde(rename = "type")]
    pub goal_type: String,
    pub target: f64,
    #[serde(default)]
    pub current: f64,
    #[serde(default)]
    pub unit: String,
    pub deadline: Option<NaiveDate>,
}

impl CreateGoalRequest {
    pub fn into_record(self, now: DateTime<Utc>) -> GoalRecord {
        GoalRecord {
            id: 0,
            goal_type: self.goal_type,
            target: self.target,
            current: self.current,
            unit: self.unit,
            deadline: self.deadline,
            status: GoalStatus::Active,
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GoalProgress {
    #[serde(rename = "type")]
    pub goal_type: String,
    pub target: f64,
    pub current: f64,
    pub progress_percentage: f64,
    pub deadline: Option<NaiveDate>,
}

impl From<&GoalRecord> for GoalProgress {
    fn from(goal: &GoalRecord) -> Self {
        Self {
            goal_type: goal.goal_type.clone(),
            target: goal.target,
            current: goal.current,
            progress_percentage: goal.progress_percentage(),
            deadline: goal.deadline,
        }
    }
}
