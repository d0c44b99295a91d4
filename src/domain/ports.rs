use crate::domain::model::AnalysisResult;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn sequence(&self) -> &str;
    fn api_endpoint(&self) -> &str;
    fn output_path(&self) -> &str;
    fn retry_attempts(&self) -> u32;
    fn retry_delay_seconds(&self) -> u64;
    fn timeout_seconds(&self) -> u64;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    /// 向預測服務送出序列，取回原始 PDB 文字
    async fn extract(&self) -> Result<String>;
    /// 解析 PDB 並計算信心統計
    async fn transform(&self, pdb_text: String) -> Result<AnalysisResult>;
    /// 寫出結果檔案，回傳輸出路徑
    async fn load(&self, result: AnalysisResult) -> Result<String>;
}
