use crate::domain::model::{ConfidenceLevel, ResidueConfidence};

const BAR_WIDTH: usize = 40;

const BUCKETS: [ConfidenceLevel; 4] = [
    ConfidenceLevel::VeryHigh,
    ConfidenceLevel::Confident,
    ConfidenceLevel::Low,
    ConfidenceLevel::VeryLow,
];

/// 每殘基信心分級的文字長條圖（取代原工具的網頁圖表）
pub fn confidence_chart(residues: &[ResidueConfidence]) -> String {
    let counts: Vec<usize> = BUCKETS
        .iter()
        .map(|bucket| {
            residues
                .iter()
                .filter(|r| ConfidenceLevel::from_plddt(r.plddt) == *bucket)
                .count()
        })
        .collect();

    let max_count = counts.iter().copied().max().unwrap_or(0).max(1);

    let mut lines = vec!["Per-residue confidence:".to_string()];
    for (bucket, count) in BUCKETS.iter().zip(&counts) {
        let bar_len = count * BAR_WIDTH / max_count;
        lines.push(format!(
            "  {:<9} {:>4}  {}",
            bucket.label(),
            count,
            "█".repeat(bar_len)
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn residue(index: i32, plddt: f64) -> ResidueConfidence {
        ResidueConfidence {
            chain: 'A',
            residue_index: index,
            residue_name: "ALA".to_string(),
            plddt,
        }
    }

    #[test]
    fn test_chart_counts_buckets() {
        let residues = vec![
            residue(1, 95.0),
            residue(2, 91.0),
            residue(3, 75.0),
            residue(4, 55.0),
            residue(5, 30.0),
        ];

        let chart = confidence_chart(&residues);

        assert!(chart.contains("Very High    2"));
        assert!(chart.contains("Confident    1"));
        assert!(chart.contains("Low          1"));
        assert!(chart.contains("Very Low     1"));
    }

    #[test]
    fn test_chart_scales_longest_bar_to_full_width() {
        let mut residues: Vec<ResidueConfidence> = (0..10).map(|i| residue(i, 95.0)).collect();
        residues.push(residue(10, 40.0));

        let chart = confidence_chart(&residues);
        let very_high_line = chart
            .lines()
            .find(|l| l.contains("Very High"))
            .unwrap();

        assert_eq!(very_high_line.matches('█').count(), BAR_WIDTH);
    }

    #[test]
    fn test_chart_handles_empty_input() {
        let chart = confidence_chart(&[]);
        assert!(chart.contains("Very High    0"));
        assert!(!chart.contains('█'));
    }
}
