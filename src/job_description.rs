// src/job_description.rs
//! Job-description sources: pasted text, a local file, or a posting URL

use anyhow::{Context, Result};
use scraper::{Html, Selector};
use std::path::Path;
use tracing::{info, warn};

/// Normalize pasted text. Whitespace-only input counts as no input.
pub fn normalize(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
}

/// Read job-description text from a local file.
pub async fn from_file(path: &Path) -> Result<Option<String>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read job description file: {}", path.display()))?;
    Ok(normalize(Some(&content)))
}

/// Fetches a job posting and pulls the description text out of it.
pub struct JobPostingFetcher {
    client: reqwest::Client,
}

impl JobPostingFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    pub async fn fetch(&self, url: &str) -> Result<Option<String>> {
        info!("Fetching job post: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to fetch job post")?;

        if !response.status().is_success() {
            anyhow::bail!("HTTP error: {}", response.status());
        }

        let html = response
            .text()
            .await
            .context("Failed to read response body")?;
        let document = Html::parse_document(&html);

        let text = extract_description(&document)
            .context("Failed to extract a job description from the page")?;

        info!("Extracted job description ({} characters)", text.len());
        Ok(normalize(Some(&text)))
    }
}

fn extract_description(document: &Html) -> Option<String> {
    // Known description containers first, LinkedIn's then generic ones.
    let description_selectors = [
        ".jobs-box__html-content",
        ".jobs-description__container",
        ".jobs-description-content__text",
        "[data-test-id='job-description']",
        ".job-description",
        "article",
        "main",
    ];

    for selector in description_selectors {
        let Ok(parsed) = Selector::parse(selector) else {
            continue;
        };
        if let Some(element) = document.select(&parsed).next() {
            let text = collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "));
            if text.len() > 100 {
                return Some(text);
            }
        }
    }

    warn!("No description container matched, falling back to page body");
    let body = Selector::parse("body").ok()?;
    document
        .select(&body)
        .next()
        .map(|element| collapse_whitespace(&element.text().collect::<Vec<_>>().join(" ")))
        .filter(|text| !text.is_empty())
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
