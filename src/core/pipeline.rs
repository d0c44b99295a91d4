use crate::core::structure;
use crate::core::{AnalysisResult, ConfigProvider, Pipeline, Storage};
use crate::domain::model::{Composition, ConfidenceLevel, SummaryReport};
use crate::utils::error::{FoldError, Result};
use crate::utils::validation::validate_sequence;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::io::Write;
use std::time::Duration;
use zip::write::{FileOptions, ZipWriter};

pub const PDB_FILENAME: &str = "predicted.pdb";
pub const PLDDT_FILENAME: &str = "plddt.csv";
pub const SUMMARY_FILENAME: &str = "summary.json";
pub const BUNDLE_FILENAME: &str = "fold_output.zip";

/// 把序列送到 ESMFold、解析回傳 PDB、寫出報告檔的管線
pub struct EsmFoldPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> EsmFoldPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            client: Client::new(),
        }
    }

    async fn post_sequence(&self) -> Result<reqwest::Response> {
        let request = self
            .client
            .post(self.config.api_endpoint())
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .timeout(Duration::from_secs(self.config.timeout_seconds()))
            .body(self.config.sequence().to_string());

        Ok(request.send().await?)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for EsmFoldPipeline<S, C> {
    async fn extract(&self) -> Result<String> {
        // 無效序列絕不發出請求
        validate_sequence("sequence", self.config.sequence())?;

        let attempts = self.config.retry_attempts().max(1);
        let delay = Duration::from_secs(self.config.retry_delay_seconds());

        tracing::info!(
            "🧬 Submitting {} residues to {}",
            self.config.sequence().len(),
            self.config.api_endpoint()
        );

        let mut last_error = None;

        for attempt in 1..=attempts {
            match self.post_sequence().await {
                Ok(response) => {
                    let status = response.status();
                    tracing::debug!("API response status: {}", status);

                    if status.is_success() {
                        let pdb_text = response.text().await?;
                        tracing::info!("✅ Received {} bytes of coordinate data", pdb_text.len());
                        return Ok(pdb_text);
                    }

                    // 4xx 是請求本身的問題，重送也不會變好
                    if status.is_client_error() {
                        return Err(FoldError::ApiStatusError {
                            status: status.as_u16(),
                        });
                    }

                    tracing::warn!(
                        "⚠️ Attempt {}/{} failed with status {}",
                        attempt,
                        attempts,
                        status
                    );
                    last_error = Some(FoldError::ApiStatusError {
                        status: status.as_u16(),
                    });
                }
                Err(e) => {
                    tracing::warn!("⚠️ Attempt {}/{} failed: {}", attempt, attempts, e);
                    last_error = Some(e);
                }
            }

            if attempt < attempts {
                tracing::info!("🔄 Retrying in {:?}", delay);
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error.unwrap_or(FoldError::ProcessingError {
            message: "prediction request was never attempted".to_string(),
        }))
    }

    async fn transform(&self, pdb_text: String) -> Result<AnalysisResult> {
        let atoms = structure::parse_atoms(&pdb_text)?;
        let mean_plddt = structure::mean_plddt(&atoms);
        let residues = structure::residue_confidences(&atoms);
        let confidence = ConfidenceLevel::from_plddt(mean_plddt);
        let composition = Composition::from_sequence(self.config.sequence());

        tracing::info!(
            "🔬 Parsed {} atoms over {} residues, mean pLDDT {:.2} ({})",
            atoms.len(),
            residues.len(),
            mean_plddt,
            confidence
        );

        Ok(AnalysisResult {
            pdb_text,
            sequence_length: self.config.sequence().len(),
            mean_plddt,
            confidence,
            residues,
            composition,
        })
    }

    async fn load(&self, result: AnalysisResult) -> Result<String> {
        // 每殘基信心值表
        let plddt_csv = {
            let mut writer = csv::Writer::from_writer(Vec::new());
            for residue in &result.residues {
                writer.serialize(residue)?;
            }
            writer.into_inner().map_err(|e| FoldError::ProcessingError {
                message: format!("CSV writer: {}", e),
            })?
        };

        // 摘要報告
        let summary = SummaryReport::from_analysis(&result);
        let summary_json = serde_json::to_vec_pretty(&summary)?;

        // 原始座標檔：對應原工具保留的 predicted.pdb
        self.storage
            .write_file(PDB_FILENAME, result.pdb_text.as_bytes())
            .await?;
        self.storage.write_file(PLDDT_FILENAME, &plddt_csv).await?;
        self.storage
            .write_file(SUMMARY_FILENAME, &summary_json)
            .await?;

        // 打包下載用的 bundle
        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

            zip.start_file::<_, ()>(PDB_FILENAME, FileOptions::default())?;
            zip.write_all(result.pdb_text.as_bytes())?;

            zip.start_file::<_, ()>(PLDDT_FILENAME, FileOptions::default())?;
            zip.write_all(&plddt_csv)?;

            zip.start_file::<_, ()>(SUMMARY_FILENAME, FileOptions::default())?;
            zip.write_all(&summary_json)?;

            let cursor = zip.finish()?;
            cursor.into_inner()
        };

        tracing::debug!("Writing bundle ({} bytes) to storage", zip_data.len());
        self.storage.write_file(BUNDLE_FILENAME, &zip_data).await?;

        let output_path = format!("{}/{}", self.config.output_path(), BUNDLE_FILENAME);
        tracing::info!("📦 Prediction artifacts saved: {}", output_path);
        Ok(output_path)
    }
}
