use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub dashboard: DashboardConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    /// Public URL of this playground, used as the post-login redirect target
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub transcript_timeout_secs: u64,
    /// Direct key for server-side tooling; never used by the proxy routes
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub api_url: String,
    pub console_url: String,
    pub timeout_secs: u64,
    pub retry_attempts: u32,
    pub retry_backoff_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub cors_origins: Vec<String>,
    /// Enforce the exact key length on the gate, not only the prefix
    pub strict_key_length: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Some(port) = env::var("WETRO_PLAYGROUND_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.server.port = port;
        }
        if let Ok(v) = env::var("PLAYGROUND_BASE_URL") {
            self.server.base_url = v.trim_end_matches('/').to_string();
        }

        // Upstream overrides
        if let Ok(v) = env::var("WETRO_API_URL") {
            self.upstream.base_url = v.trim_end_matches('/').to_string();
        }
        if let Ok(v) = env::var("WETRO_API_TIMEOUT_SECS") {
            self.upstream.timeout_secs = v.parse().unwrap_or(self.upstream.timeout_secs);
        }
        if let Ok(v) = env::var("WETRO_TRANSCRIPT_TIMEOUT_SECS") {
            self.upstream.transcript_timeout_secs =
                v.parse().unwrap_or(self.upstream.transcript_timeout_secs);
        }
        if let Ok(v) = env::var("WETRO_API_KEY") {
            if !v.trim().is_empty() {
                self.upstream.api_key = Some(v.trim().to_string());
            }
        }

        // Dashboard overrides
        if let Ok(v) = env::var("API_DASHBOARD_URL") {
            self.dashboard.api_url = v.trim_end_matches('/').to_string();
        }
        if let Ok(v) = env::var("CONSOLE_DASHBOARD_URL") {
            self.dashboard.console_url = v.trim_end_matches('/').to_string();
        }
        if let Ok(v) = env::var("DASHBOARD_TIMEOUT_SECS") {
            self.dashboard.timeout_secs = v.parse().unwrap_or(self.dashboard.timeout_secs);
        }
        if let Ok(v) = env::var("DASHBOARD_RETRY_ATTEMPTS") {
            self.dashboard.retry_attempts = v.parse().unwrap_or(self.dashboard.retry_attempts);
        }
        if let Ok(v) = env::var("DASHBOARD_RETRY_BACKOFF_MS") {
            self.dashboard.retry_backoff_ms = v.parse().unwrap_or(self.dashboard.retry_backoff_ms);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Ok(v) = env::var("SECURITY_STRICT_KEY_LENGTH") {
            self.security.strict_key_length = v.parse().unwrap_or(self.security.strict_key_length);
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                port: 3000,
                base_url: "http://localhost:3000".to_string(),
            },
            upstream: UpstreamConfig {
                base_url: "https://api.wetrocloud.com".to_string(),
                timeout_secs: 60,
                transcript_timeout_secs: 30,
                api_key: None,
            },
            dashboard: DashboardConfig {
                api_url: "http://localhost:8000".to_string(),
                console_url: "http://localhost:3001".to_string(),
                timeout_secs: 15,
                retry_attempts: 1,
                retry_backoff_ms: 250,
            },
            security: SecurityConfig {
                cors_origins: vec![
                    "http://localhost:3000".to_string(),
                    "http://localhost:8000".to_string(),
                    "http://127.0.0.1:3000".to_string(),
                    "http://127.0.0.1:8000".to_string(),
                ],
                strict_key_length: false,
            },
        }
    }

    pub fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                port: 3000,
                base_url: "https://playground.staging.wetrocloud.com".to_string(),
            },
            upstream: UpstreamConfig {
                base_url: "https://api.wetrocloud.com".to_string(),
                timeout_secs: 60,
                transcript_timeout_secs: 30,
                api_key: None,
            },
            dashboard: DashboardConfig {
                api_url: "https://api.staging.wetrocloud.com".to_string(),
                console_url: "https://console.staging.wetrocloud.com".to_string(),
                timeout_secs: 15,
                retry_attempts: 1,
                retry_backoff_ms: 250,
            },
            security: SecurityConfig {
                cors_origins: vec!["https://playground.staging.wetrocloud.com".to_string()],
                strict_key_length: true,
            },
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                port: 3000,
                base_url: "https://playground.wetrocloud.com".to_string(),
            },
            upstream: UpstreamConfig {
                base_url: "https://api.wetrocloud.com".to_string(),
                timeout_secs: 60,
                transcript_timeout_secs: 30,
                api_key: None,
            },
            dashboard: DashboardConfig {
                api_url: "https://api.wetrocloud.com".to_string(),
                console_url: "https://console.wetrocloud.com".to_string(),
                timeout_secs: 10,
                retry_attempts: 1,
                retry_backoff_ms: 500,
            },
            security: SecurityConfig {
                cors_origins: vec!["https://playground.wetrocloud.com".to_string()],
                strict_key_length: true,
            },
        }
    }
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn transcript_timeout(&self) -> Duration {
        Duration::from_secs(self.transcript_timeout_secs)
    }
}

impl DashboardConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// External login page that sends the visitor back to `return_to` afterwards
    pub fn login_url(&self, return_to: &str) -> String {
        format!("{}/auth?redirect={}", self.console_url, return_to)
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[macro_export]
macro_rules! is_production {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Production)
    };
}
