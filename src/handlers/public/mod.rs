// handlers/public/mod.rs - handlers reachable without a key cookie
//
// These establish the key cookie in the first place, so they cannot
// require it. Everything they accept is validated here.

pub mod auth;

pub use auth::*;
