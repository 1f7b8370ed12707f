pub mod auth;
pub mod chat;
pub mod extract;
pub mod markdown;
pub mod transcript;
