// src/file_validator.rs
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::error;

use crate::utils::{format_file_size, get_file_extension};

/// Client-side ceiling on resume uploads. The server's own limit is
/// unknown; nothing larger than this leaves the machine.
pub const MAX_RESUME_BYTES: u64 = 10 * 1024 * 1024;

const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "docx"];

#[derive(Debug, Clone)]
pub struct ResumeValidationError {
    pub path: PathBuf,
    pub error_type: ResumeErrorType,
    pub message: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumeErrorType {
    UnsupportedType,
    FileTooLarge,
    EmptyFile,
    UnreadableFile,
}

impl ResumeErrorType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedType => "UNSUPPORTED_FILE_TYPE",
            Self::FileTooLarge => "FILE_TOO_LARGE",
            Self::EmptyFile => "RESUME_EMPTY",
            Self::UnreadableFile => "RESUME_UNREADABLE",
        }
    }
}

pub struct ResumeValidator;

impl ResumeValidator {
    /// Decide whether a candidate file may be submitted for analysis.
    /// Looks at the file name and size only; the content is never opened.
    /// A rejection is terminal for this attempt - the caller prompts for
    /// a new selection rather than retrying.
    pub async fn validate(path: &Path) -> Result<(), ResumeValidationError> {
        let metadata = fs::metadata(path).await.map_err(|e| ResumeValidationError {
            path: path.to_path_buf(),
            error_type: ResumeErrorType::UnreadableFile,
            message: format!("Cannot read resume file: {}", e),
            suggestion: "Check the path and file permissions, then try again".to_string(),
        })?;

        if metadata.len() == 0 {
            return Err(ResumeValidationError {
                path: path.to_path_buf(),
                error_type: ResumeErrorType::EmptyFile,
                message: "Resume file is empty".to_string(),
                suggestion: "Please select a file that actually contains your resume".to_string(),
            });
        }

        // Size before type: an oversized file is refused no matter what
        // extension it carries.
        if metadata.len() > MAX_RESUME_BYTES {
            return Err(ResumeValidationError {
                path: path.to_path_buf(),
                error_type: ResumeErrorType::FileTooLarge,
                message: format!(
                    "Resume file too large: {} (max 10MB)",
                    format_file_size(metadata.len())
                ),
                suggestion: "Compress your resume or export a smaller version (max 10MB)"
                    .to_string(),
            });
        }

        let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        match get_file_extension(file_name) {
            Some(ext) if SUPPORTED_EXTENSIONS.contains(&ext.as_str()) => {}
            _ => {
                return Err(ResumeValidationError {
                    path: path.to_path_buf(),
                    error_type: ResumeErrorType::UnsupportedType,
                    message: "Only PDF and Word documents are supported".to_string(),
                    suggestion: "Upload a PDF file (.pdf) or a Word document (.docx)".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Validate and log the outcome in one step for callers that only
    /// care about the decision.
    pub async fn check(path: &Path) -> Result<(), ResumeValidationError> {
        match Self::validate(path).await {
            Ok(()) => {
                tracing::info!("Resume file validation passed: {}", path.display());
                Ok(())
            }
            Err(validation_error) => {
                error!("Resume validation failed: {}", validation_error.message);
                Err(validation_error)
            }
        }
    }
}
