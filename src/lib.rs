use anyhow::Result;
use std::path::Path;

pub mod cli;
pub mod core;
pub mod environment;
pub mod file_validator;
pub mod job_description;
pub mod report;
pub mod session;
pub mod store;
pub mod types;
pub mod utils;

pub use crate::core::analyzer_client::{AnalyzerClient, AnalyzerError};
pub use crate::environment::EnvironmentConfig;
pub use crate::report::AnalysisReport;
pub use crate::session::{AnalysisSession, SubmissionState};
pub use crate::types::analysis::{AnalysisRequest, AnalysisResult};

/// Convenience function for one-shot analysis: validate the file, run a
/// single submission, and band the result.
pub async fn analyze_resume(
    file: &Path,
    job_description: Option<&str>,
    config: &EnvironmentConfig,
) -> Result<AnalysisReport> {
    if let Err(rejection) = file_validator::ResumeValidator::validate(file).await {
        anyhow::bail!("{} [{}]", rejection.message, rejection.error_type.code());
    }

    let client = AnalyzerClient::new(config.analyzer_url.clone(), config.timeout_seconds)?;
    let mut session = AnalysisSession::new(client);
    let request = AnalysisRequest::new(file.to_path_buf()).with_job_description(job_description);

    match session.submit(request).await {
        Ok(SubmissionState::Success(result)) => Ok(AnalysisReport::from_result(result)),
        Ok(SubmissionState::Failed(message)) => anyhow::bail!("{}", message),
        Ok(_) => anyhow::bail!("Analysis did not complete"),
        Err(_) => anyhow::bail!("A submission is already in flight"),
    }
}
