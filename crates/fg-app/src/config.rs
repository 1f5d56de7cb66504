use std::env;
use std::path::PathBuf;
use reqwest::Url;
use crate::error::AppError;

pub const API_URL_KEY: &str = "FACEGEN_API_URL";
pub const DOWNLOAD_DIR_KEY: &str = "FACEGEN_DOWNLOAD_DIR";

const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_DOWNLOAD_DIR: &str = "downloads";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the generation service; relative image URLs resolve against it.
    pub api_url: Url,
    pub download_dir: PathBuf,
}

impl AppConfig {
    /// Reads an optional `.env`, then the process environment.
    pub fn load() -> Result<Self, AppError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(e.into());
            }
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let raw_url = lookup(API_URL_KEY).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = Url::parse(&raw_url).map_err(|e| AppError::InvalidUrl {
            key: API_URL_KEY,
            value: raw_url.clone(),
            reason: e.to_string(),
        })?;

        let download_dir = lookup(DOWNLOAD_DIR_KEY)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DOWNLOAD_DIR));

        Ok(Self {
            api_url,
            download_dir,
        })
    }
}
