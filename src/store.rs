// src/store.rs
//! Draft-resume persistence interface. The backing API does not exist
//! yet; every operation reports `NotImplemented` until it does.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub email: String,
    pub exp: usize,
    pub iat: usize,
}

/// Identity handed to store calls explicitly. Nothing here reads tokens
/// from ambient process state.
#[derive(Debug, Clone)]
pub struct AuthSession {
    token: String,
    claims: SessionClaims,
}

impl AuthSession {
    /// Read the claims out of a bearer token. The signature is NOT
    /// checked here - only the server can do that. The client uses the
    /// claims for display and local expiry checks.
    pub fn from_token(token: &str) -> Result<Self> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;

        let data = decode::<SessionClaims>(token, &DecodingKey::from_secret(&[]), &validation)
            .context("Failed to decode session token")?;

        Ok(Self {
            token: token.to_string(),
            claims: data.claims,
        })
    }

    pub fn bearer_token(&self) -> &str {
        &self.token
    }

    pub fn user_id(&self) -> &str {
        &self.claims.sub
    }

    pub fn email(&self) -> &str {
        &self.claims.email
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        (self.claims.exp as i64) <= now.timestamp()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_in: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub id: String,
    pub degree: String,
    pub institution: String,
    pub location: String,
    pub graduation_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
}

/// One draft resume as the builder flow edits it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDraft {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub personal_info: PersonalInfo,
    pub summary: String,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<String>,
    pub is_draft: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum StoreError {
    /// The backing API has not been built. Every call currently ends
    /// here once the session checks out.
    NotImplemented { operation: &'static str },
    /// The supplied session token has expired.
    Unauthorized,
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotImplemented { operation } => {
                write!(f, "Resume store operation not implemented: {}", operation)
            }
            Self::Unauthorized => write!(f, "Session token has expired"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Persistence operations the resume builder will need once a backend
/// exists. Implementations must take identity from the passed session,
/// never from ambient state.
#[allow(async_fn_in_trait)]
pub trait ResumeStore {
    async fn save_resume(
        &self,
        session: &AuthSession,
        resume: &ResumeDraft,
    ) -> Result<ResumeDraft, StoreError>;

    async fn list_resumes(&self, session: &AuthSession) -> Result<Vec<ResumeDraft>, StoreError>;

    async fn get_resume(
        &self,
        session: &AuthSession,
        resume_id: &str,
    ) -> Result<ResumeDraft, StoreError>;

    async fn delete_resume(
        &self,
        session: &AuthSession,
        resume_id: &str,
    ) -> Result<(), StoreError>;
}

/// Client for the future resume API. It knows where it will talk to;
/// the calls themselves are not wired up yet.
pub struct RemoteResumeStore {
    base_url: String,
}

impl RemoteResumeStore {
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authorize(&self, session: &AuthSession) -> Result<(), StoreError> {
        if session.is_expired(Utc::now()) {
            return Err(StoreError::Unauthorized);
        }
        Ok(())
    }
}

impl ResumeStore for RemoteResumeStore {
    async fn save_resume(
        &self,
        session: &AuthSession,
        _resume: &ResumeDraft,
    ) -> Result<ResumeDraft, StoreError> {
        self.authorize(session)?;
        Err(StoreError::NotImplemented {
            operation: "save_resume",
        })
    }

    async fn list_resumes(&self, session: &AuthSession) -> Result<Vec<ResumeDraft>, StoreError> {
        self.authorize(session)?;
        Err(StoreError::NotImplemented {
            operation: "list_resumes",
        })
    }

    async fn get_resume(
        &self,
        session: &AuthSession,
        _resume_id: &str,
    ) -> Result<ResumeDraft, StoreError> {
        self.authorize(session)?;
        Err(StoreError::NotImplemented {
            operation: "get_resume",
        })
    }

    async fn delete_resume(
        &self,
        session: &AuthSession,
        _resume_id: &str,
    ) -> Result<(), StoreError> {
        self.authorize(session)?;
        Err(StoreError::NotImplemented {
            operation: "delete_resume",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn token(exp: usize) -> String {
        let claims = SessionClaims {
            sub: "user-42".to_string(),
            email: "jo@example.com".to_string(),
            exp,
            iat: 0,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap()
    }

    #[test]
    fn test_session_claims_decode_without_signature_check() {
        let session = AuthSession::from_token(&token(2_000_000_000)).unwrap();
        assert_eq!(session.user_id(), "user-42");
        assert_eq!(session.email(), "jo@example.com");
    }

    #[test]
    fn test_expiry_checked_against_injected_clock() {
        let session = AuthSession::from_token(&token(1_000)).unwrap();
        let before = Utc.timestamp_opt(999, 0).unwrap();
        let after = Utc.timestamp_opt(1_001, 0).unwrap();
        assert!(!session.is_expired(before));
        assert!(session.is_expired(after));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(AuthSession::from_token("not-a-jwt").is_err());
    }

    #[tokio::test]
    async fn test_store_operations_report_not_implemented() {
        let store = RemoteResumeStore::new("http://127.0.0.1:5002".to_string());
        let session = AuthSession::from_token(&token(4_000_000_000)).unwrap();
        assert_eq!(
            store.list_resumes(&session).await.unwrap_err(),
            StoreError::NotImplemented {
                operation: "list_resumes"
            }
        );
    }

    #[tokio::test]
    async fn test_expired_session_is_refused() {
        let store = RemoteResumeStore::new("http://127.0.0.1:5002".to_string());
        let session = AuthSession::from_token(&token(1)).unwrap();
        assert_eq!(
            store.get_resume(&session, "r1").await.unwrap_err(),
            StoreError::Unauthorized
        );
    }
}
