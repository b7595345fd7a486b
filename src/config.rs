// Application configuration
//
// A JSON file named by CONTESTLOG_CONFIG, or contestlog.json in the working
// directory. Every field is optional.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cabrillo::TextEncoding;
use crate::error::ConfigError;
use crate::reference::{BuiltinResolver, CtyResolver, GeographyResolver};
use crate::session::StationProfile;

pub const CONFIG_ENV: &str = "CONTESTLOG_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "contestlog.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// SQLite database file
    pub database: PathBuf,
    /// Where Cabrillo and ADIF files are written
    pub output_dir: PathBuf,
    /// CTY.DAT country file; the built-in tables are used when absent
    pub cty_file: Option<PathBuf>,
    pub encoding: TextEncoding,
    pub station: StationProfile,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database: PathBuf::from("contestlog.db"),
            output_dir: PathBuf::from("."),
            cty_file: None,
            encoding: TextEncoding::default(),
            station: StationProfile::default(),
        }
    }
}

impl AppConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw, path)
    }

    fn parse(raw: &str, path: &Path) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Config from CONTESTLOG_CONFIG, else contestlog.json if it exists,
    /// else defaults. A path named by the variable must exist.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(path)
                } else {
                    log::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn resolver(&self) -> Result<Box<dyn GeographyResolver>, ConfigError> {
        match &self.cty_file {
            Some(path) => Ok(Box::new(CtyResolver::from_file(path)?)),
            None => Ok(Box::new(BuiltinResolver::new())),
        }
    }
}
