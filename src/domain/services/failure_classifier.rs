use crate::domain::DomainError;

/// Message fragments the hosted Gemini proxy produces when the selected key is
/// missing, revoked or points at a project without access.
const CREDENTIAL_MARKERS: [&str; 2] = [
    "Rpc failed due to xhr error",
    "Requested entity was not found.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The user should re-verify and reselect their API key.
    Credential,
    Generic,
}

pub struct FailureClassifier;

impl FailureClassifier {
    /// Structured credential errors win; everything else falls back to
    /// matching the message text.
    pub fn classify(error: &DomainError) -> FailureKind {
        if error.is_credential() {
            return FailureKind::Credential;
        }
        Self::classify_message(&error.to_string())
    }

    pub fn classify_message(message: &str) -> FailureKind {
        if CREDENTIAL_MARKERS.iter().any(|m| message.contains(m)) {
            FailureKind::Credential
        } else {
            FailureKind::Generic
        }
    }
}
