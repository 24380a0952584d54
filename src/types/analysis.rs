// src/types/analysis.rs
//! Request and response shapes for the resume-analysis service

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One submission to the analyzer. Built fresh for every attempt and
/// dropped once the attempt resolves; never cached or replayed.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub file_path: PathBuf,
    pub file_name: String,
    job_description: Option<String>,
}

impl AnalysisRequest {
    pub fn new(file_path: PathBuf) -> Self {
        let file_name = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("resume.pdf")
            .to_string();

        Self {
            file_path,
            file_name,
            job_description: None,
        }
    }

    /// Attach optional job-description text. Whitespace-only input counts
    /// as no input at all; the field is then omitted from the request.
    pub fn with_job_description(mut self, text: Option<&str>) -> Self {
        self.job_description = text
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from);
        self
    }

    pub fn job_description(&self) -> Option<&str> {
        self.job_description.as_deref()
    }
}

/// What the analyzer returns on success. Fields the server leaves out
/// deserialize to their empty forms so rendering degrades instead of
/// failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Integer percentage with a trailing `%`, e.g. `"82%"`.
    #[serde(default)]
    pub score: String,
    #[serde(default)]
    pub missing_keywords: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsed: Option<ParsedStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedStats {
    pub extracted_text_length: u64,
}
