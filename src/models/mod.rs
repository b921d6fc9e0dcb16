// Domain models and request/response payloads

pub mod analysis;
pub mod context;
pub mod conversation;
pub mod exercise;
pub mod goal;
pub mod training_plan;
pub mod user;
pub mod workout;

pub use analysis::*;
pub use context::*;
pub use conversation::*;
pub use exercise::*;
pub use goal::*;
pub use training_plan::*;
pub use user::*;
pub use workout::*;
