// src/core/analyzer_client.rs
//! HTTP client for the external resume-analysis service

use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::path::Path;
use tracing::{error, info, trace};

use crate::types::analysis::{AnalysisRequest, AnalysisResult};

const ANALYZE_ENDPOINT: &str = "/analyze";
const PARSE_ENDPOINT: &str = "/parse";

// The observed backend answers in seconds when it answers at all; without
// a client timeout a dead connection would hang a submission forever.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Classified outcome of a failed call. Every variant maps to one
/// user-visible message; none is retried automatically.
#[derive(Debug)]
pub enum AnalyzerError {
    /// The service was never heard from: refused, unreachable, timed out.
    Unreachable { url: String, detail: String },
    /// The service answered with a non-2xx status.
    Server { status: u16, message: Option<String> },
    /// The service answered 2xx but the body was not the expected JSON.
    MalformedResponse { detail: String },
    /// The resume file could not be read from disk.
    FileRead { detail: String },
}

impl AnalyzerError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unreachable { .. } => "SERVICE_UNREACHABLE",
            Self::Server { .. } => "ANALYSIS_FAILED",
            Self::MalformedResponse { .. } => "MALFORMED_RESPONSE",
            Self::FileRead { .. } => "FILE_READ_ERROR",
        }
    }

    /// Message shown to the user when the submission fails.
    pub fn user_message(&self) -> String {
        match self {
            Self::Unreachable { url, .. } => format!(
                "Unable to connect to the analysis server at {}. Please ensure the backend is running and reachable.",
                url
            ),
            Self::Server {
                message: Some(message),
                ..
            } => message.clone(),
            Self::Server {
                status,
                message: None,
            } => format!("Analysis failed with HTTP status {}", status),
            Self::MalformedResponse { .. } => {
                "The analysis server returned an unreadable response. No results are available."
                    .to_string()
            }
            Self::FileRead { detail } => format!("Could not read the resume file: {}", detail),
        }
    }
}

impl std::fmt::Display for AnalyzerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code(), self.user_message())
    }
}

impl std::error::Error for AnalyzerError {}

#[derive(Deserialize)]
struct ServerErrorBody {
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ParseResponse {
    #[serde(default)]
    pub extracted_text: String,
}

pub struct AnalyzerClient {
    client: reqwest::Client,
    base_url: String,
}

impl AnalyzerClient {
    /// Create new analyzer client against the given base URL.
    pub fn new(base_url: String, timeout_seconds: u64) -> Result<Self> {
        let timeout = if timeout_seconds == 0 {
            DEFAULT_TIMEOUT_SECS
        } else {
            timeout_seconds
        };

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit a resume plus optional job description for analysis.
    /// Performs exactly one outbound call; resubmission is the caller's
    /// decision.
    pub async fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResult, AnalyzerError> {
        let url = format!("{}{}", self.base_url, ANALYZE_ENDPOINT);

        let mut form = self
            .resume_form(&request.file_path, &request.file_name)
            .await?;
        if let Some(job_description) = request.job_description() {
            form = form.text("job_description", job_description.to_string());
        }

        info!("Calling analysis service: {}", url);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        trace!("Response status: {}", status);

        if status.is_success() {
            let response_text =
                response
                    .text()
                    .await
                    .map_err(|e| AnalyzerError::MalformedResponse {
                        detail: e.to_string(),
                    })?;

            serde_json::from_str(&response_text).map_err(|e| {
                error!("Unparseable analysis response: {}", e);
                AnalyzerError::MalformedResponse {
                    detail: e.to_string(),
                }
            })
        } else {
            let message = response
                .json::<ServerErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error);

            error!(
                "Analysis service error status {}: {}",
                status,
                message.as_deref().unwrap_or("<no error body>")
            );
            Err(AnalyzerError::Server {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// Extract the text the service can read from a resume, without
    /// scoring it.
    pub async fn parse_resume(
        &self,
        file_path: &Path,
        file_name: &str,
    ) -> Result<ParseResponse, AnalyzerError> {
        let url = format!("{}{}", self.base_url, PARSE_ENDPOINT);
        let form = self.resume_form(file_path, file_name).await?;

        info!("Calling parse service: {}", url);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if status.is_success() {
            response
                .json::<ParseResponse>()
                .await
                .map_err(|e| AnalyzerError::MalformedResponse {
                    detail: e.to_string(),
                })
        } else {
            let message = response
                .json::<ServerErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error);
            Err(AnalyzerError::Server {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// Liveness probe against the service root. Any failure reads as "not
    /// reachable" rather than an error.
    pub async fn health_check(&self) -> bool {
        let url = format!("{}/", self.base_url);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    async fn resume_form(
        &self,
        file_path: &Path,
        file_name: &str,
    ) -> Result<Form, AnalyzerError> {
        let content_type =
            content_type_for(file_name).ok_or_else(|| AnalyzerError::FileRead {
                detail: format!("Unsupported file format: {}", file_name),
            })?;

        let file_content =
            tokio::fs::read(file_path)
                .await
                .map_err(|e| AnalyzerError::FileRead {
                    detail: format!("{}: {}", file_path.display(), e),
                })?;

        let part = Part::bytes(file_content)
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|e| AnalyzerError::FileRead {
                detail: e.to_string(),
            })?;

        Ok(Form::new().part("resume", part))
    }

    fn transport_error(&self, err: reqwest::Error) -> AnalyzerError {
        AnalyzerError::Unreachable {
            url: self.base_url.clone(),
            detail: err.to_string(),
        }
    }
}

/// MIME type for a resume file, derived from its extension.
fn content_type_for(file_name: &str) -> Option<&'static str> {
    let lower_name = file_name.to_lowercase();
    if lower_name.ends_with(".pdf") {
        Some("application/pdf")
    } else if lower_name.ends_with(".docx") {
        Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document")
    } else {
        None
    }
}
