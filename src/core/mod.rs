pub mod chart;
pub mod engine;
pub mod pipeline;
pub mod structure;

pub use crate::domain::model::{
    AnalysisResult, Composition, ConfidenceLevel, ResidueConfidence, SummaryReport,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
