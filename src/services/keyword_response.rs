//! Keyword-matched replies used whenever the remote completion service is
//! unavailable. Each persona owns an ordered trigger table: the first trigger
//! phrase contained in the message wins, otherwise the persona's default reply.

use crate::models::{PersonaKind, UserContext};

pub type ReplyGenerator = fn(&UserContext) -> String;

#[derive(Debug, Clone, Copy)]
pub enum Reply {
    Fixed(&'static str),
    Generated(ReplyGenerator),
}

impl Reply {
    fn render(&self, context: &UserContext) -> String {
        match self {
            Reply::Fixed(text) => text.to_string(),
            Reply::Generated(generate) => generate(context),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Trigger {
    pub phrase: &'static str,
    pub reply: Reply,
}

impl Trigger {
    pub const fn fixed(phrase: &'static str, text: &'static str) -> Self {
        Self {
            phrase,
            reply: Reply::Fixed(text),
        }
    }

    pub const fn generated(phrase: &'static str, generate: ReplyGenerator) -> Self {
        Self {
            phrase,
            reply: Reply::Generated(generate),
        }
    }

    pub fn matches(&self, message: &str) -> bool {
        message.contains(self.phrase)
    }
}

/// A chatbot role: its system prompt for the remote service, its trigger
/// table, and the reply used when nothing matches.
#[derive(Debug, Clone)]
pub struct Persona {
    kind: PersonaKind,
    system_prompt: &'static str,
    triggers: Vec<Trigger>,
    default_reply: &'static str,
}

impl Persona {
    pub fn new(
        kind: PersonaKind,
        system_prompt: &'static str,
        triggers: Vec<Trigger>,
        default_reply: &'static str,
    ) -> Self {
        Self {
            kind,
            system_prompt,
            triggers,
            default_reply,
        }
    }

    pub fn for_kind(kind: PersonaKind) -> Self {
        match kind {
            PersonaKind::FitnessTrainer => Self::fitness_trainer(),
            PersonaKind::Nutritionist => Self::nutritionist(),
        }
    }

    pub fn fitness_trainer() -> Self {
        Self::new(
            PersonaKind::FitnessTrainer,
            FITNESS_TRAINER_PROMPT,
            vec![
                Trigger::generated("体能概况", fitness_overview),
                Trigger::fixed(
                    "训练计划",
                    "当前训练计划：周一力量训练，周三有氧运动，周五柔韧性训练。需要调整计划吗？",
                ),
                Trigger::generated("运动记录", workout_history),
                Trigger::generated("健身目标", fitness_goals),
                Trigger::fixed(
                    "开始健身",
                    "太好了！让我们开始您的健身之旅。首先，我需要了解您的健身目标和当前水平。",
                ),
                Trigger::fixed(
                    "如何增肌",
                    "增肌需要结合力量训练和适当的营养。建议每周进行3-4次力量训练，并确保摄入足够的蛋白质。",
                ),
                Trigger::fixed(
                    "如何减脂",
                    "减脂需要创造热量赤字。建议结合有氧运动和力量训练，控制饮食热量摄入。",
                ),
            ],
            "我理解您想了解健身相关信息。您可以问我关于体能概况、训练计划、运动记录或健身目标的问题。",
        )
    }

    pub fn nutritionist() -> Self {
        Self::new(
            PersonaKind::Nutritionist,
            NUTRITIONIST_PROMPT,
            vec![
                Trigger::fixed(
                    "营养概况",
                    "根据您的饮食记录，您今天的蛋白质摄入量已达到目标的75%，碳水化合物82%，脂肪80%。",
                ),
                Trigger::fixed(
                    "饮食记录",
                    "您今天的饮食记录：早餐牛奶面包，午餐鸡胸肉沙拉，晚餐鱼肉糙米饭。",
                ),
                Trigger::fixed(
                    "营养目标",
                    "您的营养目标：每日蛋白质60g，热量控制1800kcal，每周减重0.5kg。",
                ),
                Trigger::fixed(
                    "膳食计划",
                    "本周膳食计划：周一高蛋白早餐+轻食午餐+低脂晚餐，周二水果早餐+均衡午餐+素食晚餐。",
                ),
                Trigger::fixed(
                    "减肥",
                    "减肥期间建议：控制总热量摄入，增加蛋白质比例，减少精制碳水化合物。",
                ),
                Trigger::fixed(
                    "增肌",
                    "增肌期间建议：增加蛋白质摄入至1.6-2.2g/kg体重，配合力量训练。",
                ),
                Trigger::fixed(
                    "糖尿病",
                    "糖尿病患者饮食建议：控制碳水化合物总量，选择低GI食物，定时定量。",
                ),
                Trigger::fixed("高血压", "高血压患者饮食建议：低盐饮食，增加钾摄入，控制体重。"),
            ],
            "我理解您想了解营养相关信息。请告诉我您具体想了解什么？比如营养概况、饮食记录、营养目标或膳食计划等。",
        )
    }

    pub fn kind(&self) -> PersonaKind {
        self.kind
    }

    pub fn system_prompt(&self) -> &'static str {
        self.system_prompt
    }

    pub fn default_reply(&self) -> &'static str {
        self.default_reply
    }

    pub fn triggers(&self) -> &[Trigger] {
        &self.triggers
    }

    /// First trigger in table order whose phrase occurs anywhere in `message`.
    pub fn matching_trigger(&self, message: &str) -> Option<&Trigger> {
        self.triggers.iter().find(|trigger| trigger.matches(message))
    }

    pub fn respond(&self, message: &str, context: &UserContext) -> String {
        match self.matching_trigger(message) {
            Some(trigger) => trigger.reply.render(context),
            None => self.default_reply.to_string(),
        }
    }
}

const FITNESS_TRAINER_PROMPT: &str = "你是一名专业的AI健身教练，专注于提供个性化的健身指导和训练计划。
你的职责包括：
1. 分析用户的健身需求和身体状况
2. 提供科学的训练建议和运动指导
3. 解答健身相关的专业问题
4. 帮助用户制定合理的健身目标

请用专业、友好的语气回复用户的问题，提供具体、实用的建议。";

const NUTRITIONIST_PROMPT: &str = "你是一名专业的AI营养师，专注于提供个性化的营养建议和饮食指导。
你的职责包括：
1. 分析用户的营养需求和健康状况
2. 提供科学的饮食建议和膳食计划
3. 解答营养相关的专业问题
4. 帮助用户制定合理的营养目标

请用专业、友好的语气回复用户的问题，提供具体、实用的建议。";

fn fitness_overview(context: &UserContext) -> String {
    let level = context
        .profile
        .as_ref()
        .map(|profile| profile.fitness_level.as_str())
        .unwrap_or("未知");

    format!("根据您的数据，您的体能水平为{}。建议加强核心训练和心肺功能。", level)
}

fn workout_history(context: &UserContext) -> String {
    match context.latest_workout() {
        Some(workout) => format!(
            "您最近一次运动是{}，持续{}分钟。",
            workout.workout_type, workout.duration_minutes
        ),
        None => "您还没有记录任何运动。开始记录您的第一次运动吧！".to_string(),
    }
}

fn fitness_goals(context: &UserContext) -> String {
    if context.goals.is_empty() {
        return "您还没有设定健身目标。让我们一起设定明确的目标吧！".to_string();
    }

    let goal_types: Vec<&str> = context.goals.iter().map(|g| g.goal_type.as_str()).collect();
    format!("您的健身目标：{}。需要我帮您制定具体计划吗？", goal_types.join(", "))
}
