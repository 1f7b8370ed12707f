use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const CREDENTIALS_FILE: &str = "credentials.json";

/// What `wetro auth login` remembers between runs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub server: Option<String>,
    pub api_key: Option<String>,
    pub saved_at: Option<DateTime<Utc>>,
}

impl Credentials {
    pub fn new(server: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            server: Some(server.into()),
            api_key: Some(api_key.into()),
            saved_at: Some(Utc::now()),
        }
    }
}

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let config_dir = if let Ok(custom_dir) = std::env::var("WETRO_CLI_CONFIG_DIR") {
        PathBuf::from(custom_dir)
    } else {
        let home = std::env::var("HOME").map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("wetro").join("cli")
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

pub fn load_credentials() -> anyhow::Result<Credentials> {
    load_credentials_from(&get_config_dir()?)
}

pub fn save_credentials(credentials: &Credentials) -> anyhow::Result<()> {
    save_credentials_to(&get_config_dir()?, credentials)
}

pub fn load_credentials_from(dir: &Path) -> anyhow::Result<Credentials> {
    let file = dir.join(CREDENTIALS_FILE);

    if !file.exists() {
        return Ok(Credentials::default());
    }

    let content = fs::read_to_string(file)?;
    let credentials: Credentials = serde_json::from_str(&content)?;
    Ok(credentials)
}

pub fn save_credentials_to(dir: &Path, credentials: &Credentials) -> anyhow::Result<()> {
    let file = dir.join(CREDENTIALS_FILE);

    let content = serde_json::to_string_pretty(credentials)?;
    fs::write(&file, content)?;

    // The file holds a secret key
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&file, fs::Permissions::from_mode(0o600))?;
    }

    Ok(())
}
