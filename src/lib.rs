pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    CredentialAccess, CredentialSelector, TopicGenerator, TopicSession, CREDENTIAL_MESSAGE,
    FALLBACK_MESSAGE, SELECTOR_FAILED_MESSAGE, SELECTOR_UNAVAILABLE_MESSAGE, VALIDATION_MESSAGE,
};

pub use cli::{Commands, OutputFormat};

pub use connector::{
    Container, ContainerConfig, CredentialStore, GeminiClient, MockTopicGenerator, Router,
    TerminalCredentialSelector, TerminalInput,
};

pub use domain::{
    ApiResponse, CompletionRequest, DomainError, FailureClassifier, FailureKind, PromptBuilder,
    RequestId, ResponseSchema, SessionPhase, ThesisTopic,
};
