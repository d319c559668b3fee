pub mod api;
pub mod auth;
pub mod config;
pub mod estimator;
pub mod output;
pub mod profile;
pub mod prompt;
pub mod store;
