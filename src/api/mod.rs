// API routes and handlers

pub mod auth;
pub mod chat;
pub mod error;
pub mod fitness;
pub mod health;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_routes;
pub use state::AppState;
