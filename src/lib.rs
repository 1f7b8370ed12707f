pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod handlers;
pub mod ids;
pub mod middleware;
pub mod playground;
pub mod routes;
pub mod state;
pub mod upstream;
pub mod youtube;
