// src/report/banding.rs
//! Score banding rules shared by the badge, colors and summary line

/// Three-tier classification of an ATS score. Lower bounds are inclusive:
/// 80 and 60 belong to the higher tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Good,
    NeedsWork,
}

impl ScoreBand {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::NeedsWork => "Needs Work",
        }
    }

    /// Sentence shown under the score, one per tier.
    pub fn summary(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent! Your resume is well-optimized for ATS systems.",
            Self::Good => "Good progress, but there's room for improvement.",
            Self::NeedsWork => {
                "Your resume needs significant optimization for ATS compatibility."
            }
        }
    }
}

pub fn band(score: u8) -> ScoreBand {
    if score >= 80 {
        ScoreBand::Excellent
    } else if score >= 60 {
        ScoreBand::Good
    } else {
        ScoreBand::NeedsWork
    }
}

/// Numeric prefix of a score string like "82%". Out-of-range values clamp
/// into 0-100; negative or non-numeric scores read as 0 (Needs Work).
pub fn parse_score(raw: &str) -> u8 {
    let trimmed = raw.trim();
    if trimmed.starts_with('-') {
        return 0;
    }
    let digits: String = trimmed.chars().take_while(|c| c.is_ascii_digit()).collect();
    match digits.parse::<u64>() {
        Ok(value) => value.min(100) as u8,
        // Parse only fails on an empty prefix or an absurdly long one.
        Err(_) if digits.is_empty() => 0,
        Err(_) => 100,
    }
}

/// Display-only "content quality" metric: max(score - 5, 50).
pub fn content_quality(score: u8) -> u8 {
    (i16::from(score) - 5).max(50) as u8
}

/// Display-only "formatting" metric: min(score + 10, 85).
pub fn formatting_score(score: u8) -> u8 {
    (i16::from(score) + 10).min(85) as u8
}
