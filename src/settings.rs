//! Runtime Settings
//!
//! Which persistence backend to use and how to reach it. Values are baked in
//! at build time from `MENU_BOARD_*` environment variables (the page is static,
//! there is nowhere else to read them from).

use crate::document::DOCUMENT_FILE_NAME;
use crate::error::SettingsError;

pub const DEFAULT_POLL_INTERVAL_MS: u32 = 2_000;
pub const DEFAULT_CLOUD_DOCUMENT: &str = "menu/catalog";

const BACKEND: &str = "MENU_BOARD_BACKEND";
const DATA_URL: &str = "MENU_BOARD_DATA_URL";
const POLL_MS: &str = "MENU_BOARD_POLL_MS";
const DEPARTMENTS: &str = "MENU_BOARD_DEPARTMENTS";
const CLOUD_URL: &str = "MENU_BOARD_CLOUD_URL";
const CLOUD_KEY: &str = "MENU_BOARD_CLOUD_KEY";
const CLOUD_DOC: &str = "MENU_BOARD_CLOUD_DOC";

/// Connection parameters for the cloud document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudSettings {
    /// e.g. `https://my-board.firebaseio.com`
    pub database_url: String,
    pub api_key: Option<String>,
    /// Slash separated document path
    pub document_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    FilePoll { data_url: String, interval_ms: u32 },
    Local,
    Cloud(CloudSettings),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSettings {
    pub backend: Backend,
    pub departments_enabled: bool,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            backend: Backend::FilePoll {
                data_url: DOCUMENT_FILE_NAME.to_string(),
                interval_ms: DEFAULT_POLL_INTERVAL_MS,
            },
            departments_enabled: true,
        }
    }
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, SettingsError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "1" | "yes" => Ok(true),
        "off" | "false" | "0" | "no" => Ok(false),
        _ => Err(SettingsError::InvalidValue { key, value: value.to_string() }),
    }
}

impl BoardSettings {
    /// Settings from build-time environment
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| {
            let value = match key {
                BACKEND => option_env!("MENU_BOARD_BACKEND"),
                DATA_URL => option_env!("MENU_BOARD_DATA_URL"),
                POLL_MS => option_env!("MENU_BOARD_POLL_MS"),
                DEPARTMENTS => option_env!("MENU_BOARD_DEPARTMENTS"),
                CLOUD_URL => option_env!("MENU_BOARD_CLOUD_URL"),
                CLOUD_KEY => option_env!("MENU_BOARD_CLOUD_KEY"),
                CLOUD_DOC => option_env!("MENU_BOARD_CLOUD_DOC"),
                _ => None,
            };
            value.map(str::to_string)
        })
    }

    /// Settings from any key lookup; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let departments_enabled = match get(DEPARTMENTS) {
            Some(v) => parse_flag(DEPARTMENTS, &v)?,
            None => true,
        };

        let backend_name = get(BACKEND).unwrap_or_else(|| "file".to_string());
        let backend = match backend_name.trim().to_ascii_lowercase().as_str() {
            "file" => {
                let interval_ms = match get(POLL_MS) {
                    Some(v) => v
                        .trim()
                        .parse::<u32>()
                        .ok()
                        .filter(|ms| *ms > 0)
                        .ok_or(SettingsError::InvalidValue { key: POLL_MS, value: v })?,
                    None => DEFAULT_POLL_INTERVAL_MS,
                };
                Backend::FilePoll {
                    data_url: get(DATA_URL).unwrap_or_else(|| DOCUMENT_FILE_NAME.to_string()),
                    interval_ms,
                }
            }
            "local" => Backend::Local,
            "cloud" => {
                let database_url = get(CLOUD_URL)
                    .ok_or(SettingsError::MissingCloudParameter(CLOUD_URL))?
                    .trim_end_matches('/')
                    .to_string();
                let document_path = get(CLOUD_DOC)
                    .unwrap_or_else(|| DEFAULT_CLOUD_DOCUMENT.to_string())
                    .trim_matches('/')
                    .to_string();
                Backend::Cloud(CloudSettings {
                    database_url,
                    api_key: get(CLOUD_KEY),
                    document_path,
                })
            }
            _ => return Err(SettingsError::UnknownBackend(backend_name)),
        };

        Ok(Self { backend, departments_enabled })
    }
}
