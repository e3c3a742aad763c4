//! # HTTP Server Module
//!
//! Axum server exposing the exercise tracker.
//!
//! # Endpoints
//!
//! - `/` - Landing page
//! - `/health` - Health check
//! - `/api/users` - Register (POST) and list (GET) users
//! - `/api/users/:_id/exercises` - Add an exercise
//! - `/api/users/:_id/logs` - Exercise log with `from`, `to`, `limit`
//! - `/api/users/delete`, `/api/exercises/delete` - Bulk resets

pub mod admin_routes;
pub mod config;
pub mod errors;
pub mod exercise_routes;
pub mod extract;
pub mod server;
pub mod site_routes;
pub mod state;
pub mod user_routes;

pub use config::HttpServerConfig;
pub use errors::ErrorResponse;
pub use server::HttpServer;
pub use state::TrackerState;
