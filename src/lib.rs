// Library exports for the fitness coach service
// This allows testing of internal modules

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod repositories;
pub mod services;
