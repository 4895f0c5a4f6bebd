//! # Errors
//!
//! Fault values surfaced by remote collaborators.
//!
//! `ApimError` is the single error type that flows through every provider
//! seam and out of the orchestrator. The orchestrator never re-wraps it, so a
//! caller always sees the exact value the failing collaborator produced.

use serde::Deserialize;
use thiserror::Error;

/// Faults raised by resource clients and the compute app resolver
#[derive(Debug, Error)]
pub enum ApimError {
    /// The remote control plane reported that the resource does not exist
    #[error("resource not found: {resource}")]
    NotFound { resource: String },

    /// The remote control plane answered with a non-success status
    #[error("remote request failed with HTTP {status}{}: {message}", code_suffix(.code.as_deref()))]
    Remote {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// The request never produced a usable response
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// An access token could not be acquired
    #[error("failed to acquire access token: {0}")]
    Credential(String),

    /// A success response did not match the expected resource shape
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApimError {
    /// True for the not-found class of faults
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Build an error from a non-success ARM response.
    ///
    /// ARM reports failures as `{ "error": { "code": ..., "message": ... } }`.
    /// A 404 status, or an error code ending in `NotFound`, maps to
    /// [`ApimError::NotFound`].
    #[must_use]
    pub fn from_response(status: u16, resource: &str, body: &str) -> Self {
        let envelope = serde_json::from_str::<ArmErrorEnvelope>(body).ok();
        let code = envelope.as_ref().and_then(|e| e.error.code.clone());

        let code_says_missing = code
            .as_deref()
            .is_some_and(|c| c.ends_with("NotFound"));
        if status == 404 || code_says_missing {
            return Self::NotFound {
                resource: resource.to_string(),
            };
        }

        let message = envelope
            .and_then(|e| e.error.message)
            .unwrap_or_else(|| body.to_string());

        Self::Remote {
            status,
            code,
            message,
        }
    }
}

fn code_suffix(code: Option<&str>) -> String {
    code.map(|c| format!(" ({c})")).unwrap_or_default()
}

#[derive(Debug, Deserialize)]
struct ArmErrorEnvelope {
    error: ArmErrorBody,
}

#[derive(Debug, Deserialize)]
struct ArmErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}
