pub mod app;
pub mod cache;
pub mod config;
pub mod error;
pub mod gemini;
pub mod generator;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod prompts;
pub mod rate_limit;
pub mod state;
pub mod telemetry;
