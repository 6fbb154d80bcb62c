pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod reports;
pub mod routes;
pub mod services;
pub mod templates;
pub mod utils;
