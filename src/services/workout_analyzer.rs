use crate::models::{
    FitnessProfileSummary, GoalProgress, GoalRecord, ProfileStats, ProgressReport, ProgressStats,
    UserProfile, WorkoutAnalysis, WorkoutRecord, WorkoutStats,
};

/// Records counted toward the weekly frequency.
pub const WEEKLY_WINDOW: usize = 7;
pub const MIN_WEEKLY_SESSIONS: usize = 3;
pub const MIN_SESSION_MINUTES: f64 = 30.0;

const RECENT_ACTIVITY: usize = 3;

pub const NO_DATA_SUMMARY: &str = "暂无运动数据";
pub const FIRST_WORKOUT_PROMPT: &str = "开始记录您的第一次运动吧！";
pub const INCREASE_FREQUENCY: &str = "建议增加运动频率，每周至少3次";
pub const LONGER_SESSIONS: &str = "每次运动时间可以适当延长至30分钟以上";

fn round_one(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn total_calories(workouts: &[WorkoutRecord]) -> f64 {
    workouts.iter().map(|w| w.calories_burned).sum()
}

/// Most recently dated records first, at most `WEEKLY_WINDOW` of them.
/// Records sharing a date keep their submission order.
pub fn recent_workouts(workouts: &[WorkoutRecord]) -> Vec<WorkoutRecord> {
    let mut sorted = workouts.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(WEEKLY_WINDOW);
    sorted
}

pub fn analyze_workouts(workouts: &[WorkoutRecord]) -> WorkoutAnalysis {
    if workouts.is_empty() {
        return WorkoutAnalysis {
            summary: NO_DATA_SUMMARY.to_string(),
            stats: None,
            recommendations: vec![FIRST_WORKOUT_PROMPT.to_string()],
        };
    }

    let total_workouts = workouts.len();
    let total_calories = total_calories(workouts);
    let average_duration =
        workouts.iter().map(|w| w.duration_minutes).sum::<f64>() / total_workouts as f64;
    let weekly_frequency = recent_workouts(workouts).len();

    let mut recommendations = Vec::new();
    if weekly_frequency < MIN_WEEKLY_SESSIONS {
        recommendations.push(INCREASE_FREQUENCY.to_string());
    }
    if average_duration < MIN_SESSION_MINUTES {
        recommendations.push(LONGER_SESSIONS.to_string());
    }

    WorkoutAnalysis {
        // f64 Display: whole totals print without ".0".
        summary: format!("您已完成{}次运动，共消耗{}卡路里", total_workouts, total_calories),
        stats: Some(WorkoutStats {
            total_workouts,
            total_calories,
            average_duration: round_one(average_duration),
            weekly_frequency,
        }),
        recommendations,
    }
}

pub fn track_progress(workouts: &[WorkoutRecord], goals: &[GoalRecord]) -> ProgressReport {
    let mut recent = recent_workouts(workouts);
    let weekly_frequency = recent.len();
    recent.truncate(RECENT_ACTIVITY);

    ProgressReport {
        stats: ProgressStats {
            total_workouts: workouts.len(),
            total_calories: total_calories(workouts),
            weekly_frequency,
            active_goals: goals.len(),
        },
        goal_progress: goals
            .iter()
            .filter(|goal| goal.is_active())
            .map(GoalProgress::from)
            .collect(),
        recent_activity: recent,
    }
}

pub fn summarize_profile(
    profile: Option<UserProfile>,
    workouts: &[WorkoutRecord],
    goals: &[GoalRecord],
) -> FitnessProfileSummary {
    let active_goals: Vec<GoalRecord> = goals.iter().filter(|g| g.is_active()).cloned().collect();
    let recent_start = workouts.len().saturating_sub(RECENT_ACTIVITY);

    FitnessProfileSummary {
        basic_info: profile,
        stats: ProfileStats {
            total_workouts: workouts.len(),
            total_calories: total_calories(workouts),
            active_goals: active_goals.len(),
        },
        recent_workouts: workouts[recent_start..].to_vec(),
        active_goals,
    }
}
