use crate::core::Pipeline;
use crate::domain::model::AnalysisResult;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// 一次預測執行的結果：輸出路徑加上供顯示用的分析數據
pub struct FoldOutcome {
    pub output_path: String,
    pub analysis: AnalysisResult,
}

pub struct FoldEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> FoldEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(false),
        }
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<FoldOutcome> {
        tracing::info!("🚀 Starting structure prediction");
        self.monitor.log_stats("Start");

        // Extract：呼叫遠端預測服務
        let pdb_text = self.pipeline.extract().await?;
        self.monitor.log_stats("Fetch");

        // Transform：解析座標並計算信心統計
        let analysis = self.pipeline.transform(pdb_text).await?;
        self.monitor.log_stats("Analyze");

        // Load：寫出報告檔
        let display = analysis.clone();
        let output_path = self.pipeline.load(analysis).await?;
        self.monitor.log_stats("Save");
        self.monitor.log_final_stats();

        Ok(FoldOutcome {
            output_path,
            analysis: display,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Composition, ConfidenceLevel};
    use crate::utils::error::FoldError;
    use async_trait::async_trait;

    struct StubPipeline {
        fail_extract: bool,
    }

    #[async_trait]
    impl Pipeline for StubPipeline {
        async fn extract(&self) -> Result<String> {
            if self.fail_extract {
                return Err(FoldError::ApiStatusError { status: 503 });
            }
            Ok("stub pdb".to_string())
        }

        async fn transform(&self, pdb_text: String) -> Result<AnalysisResult> {
            Ok(AnalysisResult {
                pdb_text,
                sequence_length: 4,
                mean_plddt: 85.5,
                confidence: ConfidenceLevel::Confident,
                residues: vec![],
                composition: Composition::from_sequence("MKVL"),
            })
        }

        async fn load(&self, _result: AnalysisResult) -> Result<String> {
            Ok("out/fold_output.zip".to_string())
        }
    }

    #[tokio::test]
    async fn test_run_returns_path_and_analysis() {
        let engine = FoldEngine::new(StubPipeline {
            fail_extract: false,
        });

        let outcome = engine.run().await.unwrap();

        assert_eq!(outcome.output_path, "out/fold_output.zip");
        assert_eq!(outcome.analysis.mean_plddt, 85.5);
        assert_eq!(outcome.analysis.confidence, ConfidenceLevel::Confident);
    }

    #[tokio::test]
    async fn test_run_propagates_extract_failure() {
        let engine = FoldEngine::new(StubPipeline { fail_extract: true });

        let result = engine.run().await;

        assert!(matches!(
            result,
            Err(FoldError::ApiStatusError { status: 503 })
        ));
    }
}
