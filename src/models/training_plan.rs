use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScheduleDay {
    pub day: String,
    pub focus: String,
    pub exercises: Vec<String>,
    pub duration_minutes: u32,
}

impl ScheduleDay {
    pub fn new(day: &str, focus: &str, exercises: &[&str], duration_minutes: u32) -> Self {
        Self {
            day: day.to_string(),
            focus: focus.to_string(),
            exercises: exercises.iter().map(|e| e.to_string()).collect(),
            duration_minutes,
        }
    }

    pub fn focus_contains_any(&self, terms: &[&str]) -> bool {
        terms.iter().any(|term| self.focus.contains(term))
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrainingPlanTemplate {
    pub name: String,
    pub description: String,
    pub weekly_schedule: Vec<ScheduleDay>,
}

impl TrainingPlanTemplate {
    pub fn total_minutes(&self) -> u32 {
        self.weekly_schedule.iter().map(|day| day.duration_minutes).sum()
    }
}
