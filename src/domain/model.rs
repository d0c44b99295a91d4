use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// ESMFold 回傳的 pLDDT 信心分級（固定門檻 90 / 70 / 50）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    #[serde(rename = "Very High")]
    VeryHigh,
    #[serde(rename = "Confident")]
    Confident,
    #[serde(rename = "Low")]
    Low,
    #[serde(rename = "Very Low")]
    VeryLow,
}

impl ConfidenceLevel {
    /// 純階梯函數：>=90 Very High、[70,90) Confident、[50,70) Low、<50 Very Low
    pub fn from_plddt(plddt: f64) -> Self {
        if plddt >= 90.0 {
            ConfidenceLevel::VeryHigh
        } else if plddt >= 70.0 {
            ConfidenceLevel::Confident
        } else if plddt >= 50.0 {
            ConfidenceLevel::Low
        } else {
            ConfidenceLevel::VeryLow
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceLevel::VeryHigh => "Very High",
            ConfidenceLevel::Confident => "Confident",
            ConfidenceLevel::Low => "Low",
            ConfidenceLevel::VeryLow => "Very Low",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 單一殘基的信心值（pLDDT 取自 PDB 的 temperature factor 欄位）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResidueConfidence {
    pub chain: char,
    pub residue_index: i32,
    pub residue_name: String,
    pub plddt: f64,
}

/// 輸入序列的胺基酸組成統計
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    pub counts: BTreeMap<char, usize>,
    pub total: usize,
}

impl Composition {
    pub fn from_sequence(sequence: &str) -> Self {
        let mut counts = BTreeMap::new();
        for residue in sequence.chars() {
            *counts.entry(residue).or_insert(0) += 1;
        }
        Self {
            total: sequence.len(),
            counts,
        }
    }

    /// 各殘基的出現比例（百分比，保留兩位小數）
    pub fn entries(&self) -> Vec<CompositionEntry> {
        self.counts
            .iter()
            .map(|(&residue, &count)| CompositionEntry {
                residue,
                count,
                percent: if self.total > 0 {
                    round2(count as f64 / self.total as f64 * 100.0)
                } else {
                    0.0
                },
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionEntry {
    pub residue: char,
    pub count: usize,
    pub percent: f64,
}

/// 一次預測的完整分析結果
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub pdb_text: String,
    pub sequence_length: usize,
    pub mean_plddt: f64,
    pub confidence: ConfidenceLevel,
    pub residues: Vec<ResidueConfidence>,
    pub composition: Composition,
}

/// 寫入 summary.json 的報告
#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    pub sequence_length: usize,
    pub mean_plddt: f64,
    pub confidence: ConfidenceLevel,
    pub residue_count: usize,
    pub composition: Vec<CompositionEntry>,
    pub generated_at: DateTime<Utc>,
}

impl SummaryReport {
    pub fn from_analysis(analysis: &AnalysisResult) -> Self {
        Self {
            sequence_length: analysis.sequence_length,
            mean_plddt: analysis.mean_plddt,
            confidence: analysis.confidence,
            residue_count: analysis.residues.len(),
            composition: analysis.composition.entries(),
            generated_at: Utc::now(),
        }
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
