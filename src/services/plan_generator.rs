use std::collections::HashMap;

use tracing::debug;

use crate::models::{FitnessLevel, GoalTag, ScheduleDay, TrainingPlanTemplate, UserProfile};

const CARDIO_TERMS: &[&str] = &["有氧"];
const STRENGTH_TERMS: &[&str] = &["力量", "胸部", "背部", "腿部"];

const WEIGHT_LOSS_EXTRA_MINUTES: u32 = 10;
const MUSCLE_GAIN_EXTRA_MINUTES: u32 = 15;

const WEIGHT_LOSS_NOTE: &str = " - 重点减脂";
const MUSCLE_GAIN_NOTE: &str = " - 重点增肌";

/// Builds personalized weekly plans from the per-level templates.
#[derive(Debug, Clone)]
pub struct TrainingPlanGenerator {
    templates: HashMap<FitnessLevel, TrainingPlanTemplate>,
    fallback: TrainingPlanTemplate,
}

impl Default for TrainingPlanGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl TrainingPlanGenerator {
    pub fn new() -> Self {
        let fallback = Self::beginner_template();
        let mut templates = Self::load_training_templates();
        templates.insert(FitnessLevel::Beginner, fallback.clone());

        Self {
            templates,
            fallback,
        }
    }

    fn beginner_template() -> TrainingPlanTemplate {
        TrainingPlanTemplate {
            name: "初学者训练计划".to_string(),
            description: "适合健身新手的全面训练计划".to_string(),
            weekly_schedule: vec![
                ScheduleDay::new("周一", "全身力量", &["深蹲", "俯卧撑", "仰卧起坐"], 30),
                ScheduleDay::new("周三", "有氧运动", &["跑步", "跳绳"], 20),
                ScheduleDay::new("周五", "柔韧性", &["瑜伽", "拉伸"], 15),
            ],
        }
    }

    fn load_training_templates() -> HashMap<FitnessLevel, TrainingPlanTemplate> {
        let mut templates = HashMap::new();

        templates.insert(
            FitnessLevel::Intermediate,
            TrainingPlanTemplate {
                name: "中级训练计划".to_string(),
                description: "适合有一定基础的健身者".to_string(),
                weekly_schedule: vec![
                    ScheduleDay::new("周一", "胸部+三头肌", &["卧推", "哑铃飞鸟", "三头肌下压"], 45),
                    ScheduleDay::new("周二", "背部+二头肌", &["引体向上", "划船", "弯举"], 45),
                    ScheduleDay::new("周四", "腿部", &["深蹲", "腿举", "腿弯举"], 45),
                    ScheduleDay::new("周五", "有氧+核心", &["跑步", "平板支撑", "俄罗斯转体"], 30),
                ],
            },
        );

        templates
    }

    /// Stored template for a level, or the beginner template when none exists.
    pub fn template_for(&self, level: FitnessLevel) -> &TrainingPlanTemplate {
        self.templates.get(&level).unwrap_or(&self.fallback)
    }

    /// Returns an adjusted copy; the stored templates are left untouched.
    pub fn generate(&self, profile: &UserProfile) -> TrainingPlanTemplate {
        let mut plan = self.template_for(profile.fitness_level).clone();

        if profile.has_goal(GoalTag::WeightLoss) {
            plan.description.push_str(WEIGHT_LOSS_NOTE);
            Self::extend_matching_days(&mut plan, CARDIO_TERMS, WEIGHT_LOSS_EXTRA_MINUTES);
        }

        if profile.has_goal(GoalTag::MuscleGain) {
            plan.description.push_str(MUSCLE_GAIN_NOTE);
            Self::extend_matching_days(&mut plan, STRENGTH_TERMS, MUSCLE_GAIN_EXTRA_MINUTES);
        }

        debug!(
            level = profile.fitness_level.as_str(),
            total_minutes = plan.total_minutes(),
            "Generated training plan"
        );

        plan
    }

    fn extend_matching_days(plan: &mut TrainingPlanTemplate, terms: &[&str], minutes: u32) {
        for day in plan
            .weekly_schedule
            .iter_mut()
            .filter(|day| day.focus_contains_any(terms))
        {
            day.duration_minutes += minutes;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn profile(level: FitnessLevel, goals: &[GoalTag]) -> UserProfile {
        UserProfile {
            fitness_level: level,
            goals: goals.iter().copied().collect(),
            ..Default::default()
        }
    }

    fn durations(plan: &TrainingPlanTemplate) -> Vec<u32> {
        plan.weekly_schedule.iter().map(|d| d.duration_minutes).collect()
    }

    #[test]
    fn test_no_goals_returns_template_copy() {
        let generator = TrainingPlanGenerator::new();
        let plan = generator.generate(&profile(FitnessLevel::Beginner, &[]));
        assert_eq!(&plan, generator.template_for(FitnessLevel::Beginner));
    }

    #[test]
    fn test_advanced_falls_back_to_beginner() {
        let generator = TrainingPlanGenerator::new();
        let plan = generator.generate(&profile(FitnessLevel::Advanced, &[]));
        assert_eq!(plan.name, "初学者训练计划");
    }

    #[test]
    fn test_weight_loss_extends_cardio_days() {
        let generator = TrainingPlanGenerator::new();
        let plan = generator.generate(&profile(FitnessLevel::Beginner, &[GoalTag::WeightLoss]));

        assert_eq!(durations(&plan), vec![30, 30, 15]);
        assert_eq!(plan.description, "适合健身新手的全面训练计划 - 重点减脂");
    }

    #[test]
    fn test_muscle_gain_extends_strength_days() {
        let generator = TrainingPlanGenerator::new();
        let plan = generator.generate(&profile(FitnessLevel::Intermediate, &[GoalTag::MuscleGain]));

        assert_eq!(durations(&plan), vec![60, 60, 60, 30]);
        assert_eq!(plan.description, "适合有一定基础的健身者 - 重点增肌");
    }

    #[test]
    fn test_goals_stack_once_per_day() {
        let generator = TrainingPlanGenerator::new();
        let plan = generator.generate(&profile(
            FitnessLevel::Intermediate,
            &[GoalTag::WeightLoss, GoalTag::MuscleGain],
        ));

        assert_eq!(durations(&plan), vec![60, 60, 60, 40]);
        assert_eq!(plan.description, "适合有一定基础的健身者 - 重点减脂 - 重点增肌");
    }

    #[test]
    fn test_repeated_generation_does_not_leak() {
        let generator = TrainingPlanGenerator::new();

        let first = generator.generate(&profile(FitnessLevel::Beginner, &[GoalTag::WeightLoss]));
        let second = generator.generate(&profile(
            FitnessLevel::Beginner,
            &[GoalTag::WeightLoss, GoalTag::MuscleGain],
        ));
        let third = generator.generate(&profile(FitnessLevel::Beginner, &[]));

        assert_eq!(durations(&first), vec![30, 30, 15]);
        assert_eq!(durations(&second), vec![45, 30, 15]);
        assert_eq!(durations(&third), vec![30, 20, 15]);
        assert_eq!(third.description, "适合健身新手的全面训练计划");
    }
}
