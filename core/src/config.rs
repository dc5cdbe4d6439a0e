use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{HealthError, Result};

const CONFIG_DIR: &str = ".fitlog";
const CONFIG_FILE_NAME: &str = "config.json";

/// Where the three exports live.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub nutrition_file: String,
    pub measurement_file: String,
    pub exercise_file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            nutrition_file: "Nutrition-Summary.csv".to_string(),
            measurement_file: "Measurement-Summary.csv".to_string(),
            exercise_file: "Exercise-Summary.csv".to_string(),
        }
    }
}

impl AppConfig {
    /// An explicit path must exist. Without one, `~/.fitlog/config.json` is
    /// used when present and the defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => {
                    debug!("no config file, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            HealthError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: AppConfig = serde_json::from_str(&content)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn with_data_dir(mut self, data_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        self
    }

    pub fn nutrition_path(&self) -> PathBuf {
        self.data_dir.join(&self.nutrition_file)
    }

    pub fn measurement_path(&self) -> PathBuf {
        self.data_dir.join(&self.measurement_file)
    }

    pub fn exercise_path(&self) -> PathBuf {
        self.data_dir.join(&self.exercise_file)
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE_NAME))
}
