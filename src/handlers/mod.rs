pub mod auth;
pub mod dashboard;
pub mod exports;
pub mod helpers;
pub mod incidents;
pub mod middleware;
pub mod notifications;
pub mod upload;
