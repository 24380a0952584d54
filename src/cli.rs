// src/cli.rs
use crate::core::AnalyzerClient;
use crate::environment::EnvironmentConfig;
use crate::file_validator::ResumeValidator;
use crate::job_description::{self, JobPostingFetcher};
use crate::report::AnalysisReport;
use crate::session::{AnalysisSession, SubmissionState, SubmitRefusal};
use crate::types::analysis::AnalysisRequest;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resumescan")]
#[command(about = "Check a resume against an ATS analysis service")]
pub struct ScanCli {
    #[command(subcommand)]
    pub command: ScanCommand,
}

#[derive(Subcommand)]
pub enum ScanCommand {
    /// Analyze a resume, optionally against a job description
    Analyze {
        /// Path to the resume (.pdf or .docx, max 10MB)
        file: PathBuf,

        /// Job description text for targeted analysis
        #[arg(long)]
        job_description: Option<String>,

        /// Read the job description from a file
        #[arg(long, conflicts_with = "job_description")]
        job_description_file: Option<PathBuf>,

        /// Scrape the job description from a posting URL
        #[arg(long, conflicts_with_all = ["job_description", "job_description_file"])]
        job_url: Option<String>,

        /// Emit the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Extract the text the analysis service can read from a resume
    Parse {
        /// Path to the resume (.pdf or .docx, max 10MB)
        file: PathBuf,
    },
    /// Check whether the analysis service is reachable
    Health,
}

pub async fn handle_scan_command(cli: ScanCli) -> Result<()> {
    let config = EnvironmentConfig::load()?;
    let client = AnalyzerClient::new(config.analyzer_url.clone(), config.timeout_seconds)?;

    match cli.command {
        ScanCommand::Analyze {
            file,
            job_description,
            job_description_file,
            job_url,
            json,
        } => {
            // Rejected files never reach the network; the user picks a
            // new file and runs again.
            if let Err(rejection) = ResumeValidator::check(&file).await {
                println!("❌ {} [{}]", rejection.message, rejection.error_type.code());
                println!("   {}", rejection.suggestion);
                return Ok(());
            }

            let jd = if let Some(text) = job_description {
                job_description::normalize(Some(&text))
            } else if let Some(path) = job_description_file {
                job_description::from_file(&path).await?
            } else if let Some(url) = job_url {
                JobPostingFetcher::new()?.fetch(&url).await?
            } else {
                None
            };

            let request = AnalysisRequest::new(file).with_job_description(jd.as_deref());
            let mut session = AnalysisSession::new(client);

            match session.submit(request).await {
                Ok(SubmissionState::Success(result)) => {
                    let report = AnalysisReport::from_result(result);
                    if json {
                        println!("{}", report.to_json()?);
                    } else {
                        println!("✓ Analysis complete");
                        report.print();
                    }
                }
                Ok(SubmissionState::Failed(message)) => {
                    println!("❌ Analysis failed: {}", message);
                }
                Ok(_) => {}
                Err(SubmitRefusal::InFlight) => {
                    println!("❌ A submission is already in flight; wait for it to finish");
                }
            }

            Ok(())
        }

        ScanCommand::Parse { file } => {
            if let Err(rejection) = ResumeValidator::check(&file).await {
                println!("❌ {} [{}]", rejection.message, rejection.error_type.code());
                println!("   {}", rejection.suggestion);
                return Ok(());
            }

            let request = AnalysisRequest::new(file);
            match client
                .parse_resume(&request.file_path, &request.file_name)
                .await
            {
                Ok(parsed) => {
                    println!(
                        "✓ Extracted {} characters of text",
                        parsed.extracted_text.len()
                    );
                    println!();
                    println!("{}", parsed.extracted_text);
                }
                Err(err) => {
                    println!("❌ Parse failed: {}", err.user_message());
                }
            }

            Ok(())
        }

        ScanCommand::Health => {
            if client.health_check().await {
                println!("✓ Analysis service is reachable: {}", client.base_url());
            } else {
                println!(
                    "❌ Analysis service is not reachable: {}",
                    client.base_url()
                );
            }
            Ok(())
        }
    }
}
