pub mod ai;
pub mod app;
pub mod seeding;

pub use ai::AiServiceConfig;
pub use app::AppConfig;
