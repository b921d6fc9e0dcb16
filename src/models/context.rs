use super::{GoalRecord, UserProfile, WorkoutRecord};

/// Snapshot of a user's data handed to the chat engine for one turn.
#[derive(Debug, Clone, Default)]
pub struct UserContext {
    pub profile: Option<UserProfile>,
    pub workouts: Vec<WorkoutRecord>,
    pub goals: Vec<GoalRecord>,
}

impl UserContext {
    pub fn new(
        profile: Option<UserProfile>,
        workouts: Vec<WorkoutRecord>,
        goals: Vec<GoalRecord>,
    ) -> Self {
        Self {
            profile,
            workouts,
            goals,
        }
    }

    /// Last recorded workout in submission order.
    pub fn latest_workout(&self) -> Option<&WorkoutRecord> {
        self.workouts.last()
    }
}
