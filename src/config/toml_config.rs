use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;

/// 選用的 TOML 設定檔，填入的欄位會覆蓋 CLI 預設值
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    pub prediction: Option<PredictionConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictionConfig {
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub retry_attempts: Option<u32>,
    pub retry_delay_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
}

impl FileConfig {
    pub fn from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }
}
