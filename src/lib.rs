//! exercise-tracker - users, exercise logs and date-filtered log queries
//! over HTTP

pub mod cli;
pub mod http_server;
pub mod model;
pub mod observability;
pub mod storage;
pub mod tracker;
