// handlers/public/auth/mod.rs - the key gate
//
// Two independent ways to obtain the key cookie:
// - POST /api/set-api-key: the visitor pastes a key
// - POST /api/bootstrap:   the key is provisioned through the dashboard

pub mod bootstrap;
pub mod check;
pub mod set_key;

pub use bootstrap::bootstrap_post;
pub use check::check_auth_get;
pub use set_key::set_api_key_post;
