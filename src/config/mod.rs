#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::{FoldError, Result};
#[cfg(feature = "cli")]
use crate::utils::validation::{
    normalize_sequence, validate_path, validate_range, validate_sequence, validate_url, Validate,
};
#[cfg(feature = "cli")]
use self::toml_config::FileConfig;

#[cfg(feature = "cli")]
use clap::Parser;

pub const DEFAULT_ENDPOINT: &str = "https://api.esmatlas.com/foldSequence/v1/pdb/";

/// 原工具內建的範例蛋白（一個酯酶序列）
pub const EXAMPLE_SEQUENCE: &str = "MGSSHHHHHHSSGLVPRGSHMRGPNPTAASLEASAGPFTVRSFTVSRPSGYGAGTVYYPTNAGGTVGAIAIVPGYTARQSSIKWWGPRLASHGFVVITIDTNSTLDQPSSRSSQQMAALRQVASLNGTSSSPIYGKVDTARMGVMGWSMGGGGSLISAANNPSLKAAAPQAPWDSSTNFSSVTVPTLIFACENDSIAPVNSSALPIYDSMSRNAKQFLEINGGSHSCANSGNSNQALIGKKGVAWMKRFMDNDTRYSTFACENPNSTRVSDFRTANCSLEDPAANKARKEAELAAATAEQ";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "fold-predict")]
#[command(about = "Predict a protein structure with the ESMFold API and report per-residue confidence")]
pub struct CliConfig {
    /// Amino-acid sequence to fold
    #[arg(long)]
    pub sequence: Option<String>,

    /// Read the sequence from a text or FASTA file
    #[arg(long)]
    pub sequence_file: Option<String>,

    /// Use the built-in example protein
    #[arg(long)]
    pub example: bool,

    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value = "3")]
    pub retry_attempts: u32,

    /// Seconds to wait between retry attempts
    #[arg(long, default_value = "5")]
    pub retry_delay: u64,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "120")]
    pub timeout: u64,

    /// Optional TOML config file overriding the flags above
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Enable system monitoring")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 套用 TOML 設定檔：檔案裡有設定的欄位才覆蓋
    pub fn apply_file_config(&mut self, file: &FileConfig) {
        if let Some(prediction) = &file.prediction {
            if let Some(endpoint) = &prediction.endpoint {
                self.endpoint = endpoint.clone();
            }
            if let Some(timeout) = prediction.timeout_seconds {
                self.timeout = timeout;
            }
            if let Some(attempts) = prediction.retry_attempts {
                self.retry_attempts = attempts;
            }
            if let Some(delay) = prediction.retry_delay_seconds {
                self.retry_delay = delay;
            }
        }
        if let Some(output) = &file.output {
            if let Some(path) = &output.path {
                self.output_path = path.clone();
            }
        }
    }

    /// 決定序列來源（檔案 > 旗標 > 範例）並正規化
    pub fn resolve_sequence(&mut self) -> Result<()> {
        let raw = if let Some(path) = &self.sequence_file {
            std::fs::read_to_string(path)?
        } else if let Some(sequence) = &self.sequence {
            sequence.clone()
        } else if self.example {
            EXAMPLE_SEQUENCE.to_string()
        } else {
            return Err(FoldError::MissingConfigError {
                field: "sequence".to_string(),
            });
        };

        self.sequence = Some(normalize_sequence(&raw));
        Ok(())
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn sequence(&self) -> &str {
        self.sequence.as_deref().unwrap_or_default()
    }

    fn api_endpoint(&self) -> &str {
        &self.endpoint
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn retry_attempts(&self) -> u32 {
        self.retry_attempts
    }

    fn retry_delay_seconds(&self) -> u64 {
        self.retry_delay
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_sequence("sequence", self.sequence.as_deref().unwrap_or_default())?;
        validate_url("endpoint", &self.endpoint)?;
        validate_path("output_path", &self.output_path)?;
        validate_range("retry_attempts", self.retry_attempts, 1, 10)?;
        validate_range("retry_delay", self.retry_delay, 0, 300)?;
        validate_range("timeout", self.timeout, 1, 600)?;
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    fn base_config() -> CliConfig {
        CliConfig {
            sequence: Some("MKVLLF".to_string()),
            sequence_file: None,
            example: false,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            output_path: "./output".to_string(),
            retry_attempts: 3,
            retry_delay: 5,
            timeout: 120,
            config: None,
            verbose: false,
            monitor: false,
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_invalid_sequence_fails_validation() {
        let mut config = base_config();
        config.sequence = Some("MKV-99".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_sequence_fails_resolution() {
        let mut config = base_config();
        config.sequence = None;
        assert!(matches!(
            config.resolve_sequence(),
            Err(FoldError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_example_flag_fills_sequence() {
        let mut config = base_config();
        config.sequence = None;
        config.example = true;

        config.resolve_sequence().unwrap();

        assert_eq!(config.sequence.as_deref(), Some(EXAMPLE_SEQUENCE));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_resolve_normalizes_flag_input() {
        let mut config = base_config();
        config.sequence = Some("mkv llf\n".to_string());

        config.resolve_sequence().unwrap();

        assert_eq!(config.sequence.as_deref(), Some("MKVLLF"));
    }

    #[test]
    fn test_retry_attempts_out_of_range_fails() {
        let mut config = base_config();
        config.retry_attempts = 0;
        assert!(config.validate().is_err());

        config.retry_attempts = 11;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_file_config_overrides_set_fields_only() {
        let mut config = base_config();
        let file: FileConfig = toml::from_str(
            r#"
            [prediction]
            retry_attempts = 7

            [output]
            path = "/tmp/fold-out"
        "#,
        )
        .unwrap();

        config.apply_file_config(&file);

        assert_eq!(config.retry_attempts, 7);
        assert_eq!(config.output_path, "/tmp/fold-out");
        // 檔案沒寫的欄位保持原值
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout, 120);
    }
}
