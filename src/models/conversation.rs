use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PersonaKind {
    FitnessTrainer,
    Nutritionist,
}

impl PersonaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonaKind::FitnessTrainer => "fitness_trainer",
            PersonaKind::Nutritionist => "nutritionist",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationMessage {
    pub id: u64,
    pub message: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub conversation_id: u64,
}

#[derive(Debug, Serialize)]
pub struct ConversationHistory {
    pub conversations: Vec<ConversationMessage>,
}
