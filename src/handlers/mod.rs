// handlers/mod.rs - two security tiers
//
// Public (no key cookie) → Protected (key cookie required, enforced by
// `middleware::api_key_middleware` before the handler runs)
pub mod protected; // Proxy routes forwarding to the extraction service (/api/*)
pub mod public; // Key gate and bootstrap (/api/check-auth, /api/set-api-key, /api/bootstrap)
