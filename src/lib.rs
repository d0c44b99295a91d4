pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{cli::LocalStorage, CliConfig};

pub use crate::core::engine::{FoldEngine, FoldOutcome};
pub use crate::core::pipeline::EsmFoldPipeline;
pub use crate::domain::model::ConfidenceLevel;
pub use crate::utils::error::{FoldError, Result};
