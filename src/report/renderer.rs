// src/report/renderer.rs
//! Turns an analysis response into the display the original UI renders:
//! score card, keyword chips, suggestion rows.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::report::banding;
use crate::types::analysis::AnalysisResult;

/// Display-ready view of one analysis. Every number here is a
/// deterministic transform of the score the server returned.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub score: u8,
    pub band: &'static str,
    pub summary: &'static str,
    pub content_quality: u8,
    pub formatting: u8,
    pub missing_keywords: Vec<String>,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_text_length: Option<u64>,
}

impl AnalysisReport {
    pub fn from_result(result: &AnalysisResult) -> Self {
        let score = banding::parse_score(&result.score);
        let band = banding::band(score);

        Self {
            score,
            band: band.label(),
            summary: band.summary(),
            content_quality: banding::content_quality(score),
            formatting: banding::formatting_score(score),
            missing_keywords: result.missing_keywords.clone(),
            suggestions: result.suggestions.clone(),
            extracted_text_length: result.parsed.as_ref().map(|p| p.extracted_text_length),
        }
    }

    /// Print the report to stdout.
    pub fn print(&self) {
        println!();
        println!("ATS Compatibility Score: {}% - {}", self.score, self.band);
        println!("{}", self.summary);
        println!();
        println!(
            "Content Quality: {}%   Formatting: {}%   ATS Score: {}%",
            self.content_quality, self.formatting, self.score
        );

        if !self.missing_keywords.is_empty() {
            println!();
            println!("Missing Keywords ({}):", self.missing_keywords.len());
            println!("  {}", self.missing_keywords.join(", "));
        }

        if !self.suggestions.is_empty() {
            println!();
            println!("Improvement Suggestions ({}):", self.suggestions.len());
            for suggestion in &self.suggestions {
                println!("  ✓ {}", suggestion);
            }
        }

        if let Some(length) = self.extracted_text_length {
            println!();
            println!("Analysis Details:");
            println!("  Text Length: {} characters", length);
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize analysis report")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::analysis::ParsedStats;

    fn result(score: &str) -> AnalysisResult {
        AnalysisResult {
            score: score.to_string(),
            missing_keywords: vec!["Python".to_string()],
            suggestions: vec!["Add metrics".to_string()],
            parsed: Some(ParsedStats {
                extracted_text_length: 3421,
            }),
        }
    }

    #[test]
    fn test_report_from_excellent_score() {
        let report = AnalysisReport::from_result(&result("87%"));
        assert_eq!(report.score, 87);
        assert_eq!(report.band, "Excellent");
        assert_eq!(report.content_quality, 82);
        assert_eq!(report.formatting, 85);
        assert_eq!(report.missing_keywords, vec!["Python"]);
        assert_eq!(report.suggestions, vec!["Add metrics"]);
        assert_eq!(report.extracted_text_length, Some(3421));
    }

    #[test]
    fn test_report_is_deterministic() {
        let a = AnalysisReport::from_result(&result("64%"));
        let b = AnalysisReport::from_result(&result("64%"));
        assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());
    }

    #[test]
    fn test_non_numeric_score_reads_as_needs_work() {
        let report = AnalysisReport::from_result(&result("unknown"));
        assert_eq!(report.score, 0);
        assert_eq!(report.band, "Needs Work");
    }
}
