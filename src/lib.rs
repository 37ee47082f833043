//! Currency-rate monitor backend: HTTP ingestion of rate readings and
//! latest-reading queries over SQLite, plus static serving of the dashboard.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod types;
