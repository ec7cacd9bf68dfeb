// Client-local persisted state. The master key lives in the CLI config
// directory as a single JSON file, overwritten on each successful panel entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::screen::MasterKeyStore;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasterKeyConfig {
    pub master_key: String,
    pub generated_at: DateTime<Utc>,
}

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let config_dir = if let Ok(custom_dir) = std::env::var("SADHANA_CLI_CONFIG_DIR") {
        PathBuf::from(custom_dir)
    } else {
        let home = std::env::var("HOME")
            .map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("sadhana").join("cli")
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

/// Master key storage backed by a JSON file in the CLI config directory
pub struct FileMasterKeyStore {
    dir: PathBuf,
}

impl FileMasterKeyStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn default_location() -> anyhow::Result<Self> {
        Ok(Self::new(get_config_dir()?))
    }

    fn key_file(&self) -> PathBuf {
        self.dir.join("master_key.json")
    }
}

impl MasterKeyStore for FileMasterKeyStore {
    fn load(&self) -> anyhow::Result<Option<String>> {
        let key_file = self.key_file();
        if !key_file.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(key_file)?;
        let config: MasterKeyConfig = serde_json::from_str(&content)?;
        Ok(Some(config.master_key))
    }

    fn store(&self, key: &str) -> anyhow::Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }

        let config = MasterKeyConfig {
            master_key: key.to_string(),
            generated_at: Utc::now(),
        };
        let content = serde_json::to_string_pretty(&config)?;
        fs::write(self.key_file(), content)?;
        Ok(())
    }
}
