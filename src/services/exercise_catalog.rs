use crate::models::{Difficulty, ExerciseCategory, ExerciseDefinition};

const MAX_RECOMMENDATIONS: usize = 5;

/// Read-only exercise table, grouped by category in a fixed order.
#[derive(Debug, Clone)]
pub struct ExerciseCatalog {
    categories: Vec<(ExerciseCategory, Vec<ExerciseDefinition>)>,
}

impl Default for ExerciseCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ExerciseCatalog {
    pub fn new() -> Self {
        Self {
            categories: Self::load_exercises(),
        }
    }

    fn load_exercises() -> Vec<(ExerciseCategory, Vec<ExerciseDefinition>)> {
        vec![
            (
                ExerciseCategory::Strength,
                vec![
                    ExerciseDefinition {
                        name: "深蹲",
                        category: ExerciseCategory::Strength,
                        muscle_group: vec!["腿部", "核心"],
                        difficulty: Difficulty::Beginner,
                        description: "基础的下半身力量训练",
                        instructions: "双脚与肩同宽，背部挺直，慢慢下蹲至大腿与地面平行",
                    },
                    ExerciseDefinition {
                        name: "卧推",
                        category: ExerciseCategory::Strength,
                        muscle_group: vec!["胸部", "肩部", "三头肌"],
                        difficulty: Difficulty::Intermediate,
                        description: "上半身力量训练",
                        instructions: "平躺在卧推凳上，双手握杠铃，缓慢下放至胸部然后推起",
                    },
                ],
            ),
            (
                ExerciseCategory::Cardio,
                vec![ExerciseDefinition {
                    name: "跑步",
                    category: ExerciseCategory::Cardio,
                    muscle_group: vec!["全身"],
                    difficulty: Difficulty::Beginner,
                    description: "有氧运动，提高心肺功能",
                    instructions: "保持均匀呼吸，控制速度和时间",
                }],
            ),
            (
                ExerciseCategory::Flexibility,
                vec![ExerciseDefinition {
                    name: "瑜伽",
                    category: ExerciseCategory::Flexibility,
                    muscle_group: vec!["全身"],
                    difficulty: Difficulty::Beginner,
                    description: "提高身体柔韧性和平衡性",
                    instructions: "跟随指导进行各种瑜伽姿势",
                }],
            ),
        ]
    }

    pub fn all(&self) -> impl Iterator<Item = &ExerciseDefinition> {
        self.categories.iter().flat_map(|(_, exercises)| exercises.iter())
    }

    pub fn by_category(&self, category: ExerciseCategory) -> &[ExerciseDefinition] {
        self.categories
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, exercises)| exercises.as_slice())
            .unwrap_or(&[])
    }

    /// Up to five exercises at `difficulty` whose muscle groups mention `muscle_group`,
    /// in catalog order.
    pub fn recommend(&self, muscle_group: &str, difficulty: Difficulty) -> Vec<ExerciseDefinition> {
        self.all()
            .filter(|exercise| exercise.difficulty == difficulty && exercise.targets(muscle_group))
            .take(MAX_RECOMMENDATIONS)
            .cloned()
            .collect()
    }
}
