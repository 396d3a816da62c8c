use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::application::{CredentialAccess, TopicGenerator};
use crate::domain::{
    ApiResponse, DomainError, FailureClassifier, FailureKind, RequestId, SessionPhase, ThesisTopic,
};

pub const VALIDATION_MESSAGE: &str = "لطفا حداقل یک کلیدواژه وارد کنید.";
pub const CREDENTIAL_MESSAGE: &str =
    "خطا در ارتباط با هوش مصنوعی. لطفاً کلید API خود را بررسی و مجدداً انتخاب کنید.";
pub const FALLBACK_MESSAGE: &str = "خطا در دریافت موضوعات. لطفاً دوباره تلاش کنید.";
pub const SELECTOR_UNAVAILABLE_MESSAGE: &str =
    "امکان انتخاب کلید API در این محیط وجود ندارد. لطفاً از طریق تنظیمات کلید را فراهم کنید.";
pub const SELECTOR_FAILED_MESSAGE: &str = "خطا در باز کردن پنجره انتخاب کلید API.";

/// Drives one user's keyword → topics lifecycle.
///
/// `submit` is the only path that touches `loading`, `error` and `topics`;
/// `reselect_credential` is the only path that hides the credential prompt.
/// Every accepted submission gets a fresh [`RequestId`]; a completion carrying
/// any other id is stale and is dropped without touching the state.
pub struct TopicSession {
    generator: Arc<dyn TopicGenerator>,
    credentials: CredentialAccess,
    phase: SessionPhase,
    keywords: String,
    topics: Option<Vec<ThesisTopic>>,
    loading: bool,
    error: Option<String>,
    credential_prompt_visible: bool,
    credential_valid: bool,
    in_flight: Option<RequestId>,
}

impl TopicSession {
    pub fn new(generator: Arc<dyn TopicGenerator>, credentials: CredentialAccess) -> Self {
        Self {
            generator,
            credentials,
            phase: SessionPhase::Idle,
            keywords: String::new(),
            topics: None,
            loading: false,
            error: None,
            credential_prompt_visible: false,
            // Assume the configured key works until a call proves otherwise.
            credential_valid: true,
            in_flight: None,
        }
    }

    pub fn set_keywords(&mut self, keywords: impl Into<String>) {
        self.keywords = keywords.into();
    }

    /// Validates the current keywords and, if they are usable, moves to
    /// `Submitting` and returns the id the eventual completion must carry.
    ///
    /// Any request still in flight is superseded.
    pub fn begin_submit(&mut self) -> Option<RequestId> {
        if self.keywords.trim().is_empty() {
            let rejection = DomainError::validation(VALIDATION_MESSAGE);
            debug!("Rejecting submission: {rejection}");
            self.error = Some(rejection.to_string());
            self.topics = None;
            self.loading = false;
            self.in_flight = None;
            self.phase = SessionPhase::Failure;
            return None;
        }

        if let Some(previous) = self.in_flight {
            warn!("Superseding in-flight request {previous}");
        }

        let id = RequestId::new();
        self.loading = true;
        self.error = None;
        self.topics = None;
        self.in_flight = Some(id);
        self.phase = SessionPhase::Submitting;
        debug!("Submitting request {id}");
        Some(id)
    }

    /// Applies the outcome of the request `id`. Returns `false` when the
    /// outcome was stale and ignored.
    pub fn complete(&mut self, id: RequestId, result: Result<ApiResponse, DomainError>) -> bool {
        if self.in_flight != Some(id) {
            debug!("Discarding stale response for request {id}");
            return false;
        }

        self.in_flight = None;
        self.loading = false;

        match result {
            Ok(response) => {
                info!("Received {} topics", response.len());
                self.topics = Some(response.into_topics());
                self.error = None;
                self.phase = SessionPhase::Success;
            }
            Err(e) => {
                warn!("Failed to fetch topics: {e}");
                match FailureClassifier::classify(&e) {
                    FailureKind::Credential => {
                        self.error = Some(CREDENTIAL_MESSAGE.to_string());
                        self.credential_valid = false;
                        self.credential_prompt_visible = true;
                        self.phase = SessionPhase::CredentialPromptShown;
                    }
                    FailureKind::Generic => {
                        let message = e.to_string();
                        self.error = Some(if message.is_empty() {
                            FALLBACK_MESSAGE.to_string()
                        } else {
                            message
                        });
                        self.phase = SessionPhase::Failure;
                    }
                }
            }
        }

        true
    }

    /// Sets the keywords, then issues exactly one generator call for them.
    pub async fn submit(&mut self, keywords: impl Into<String>) -> SessionPhase {
        self.set_keywords(keywords);

        let Some(id) = self.begin_submit() else {
            return self.phase;
        };

        let start_time = Instant::now();
        let generator = Arc::clone(&self.generator);
        let keywords = self.keywords.clone();
        let result = generator.generate(&keywords).await;
        debug!(
            "Request {id} finished in {:.2?} using {}",
            start_time.elapsed(),
            generator.model_name()
        );

        self.complete(id, result);
        self.phase
    }

    /// Asks the host to let the user pick a different key.
    ///
    /// On success the prompt is hidden and the session returns to `Idle`
    /// without resubmitting; otherwise the prompt stays up with an error.
    pub async fn reselect_credential(&mut self) -> SessionPhase {
        let selector = match &self.credentials {
            CredentialAccess::Available(selector) => Arc::clone(selector),
            CredentialAccess::Unavailable => {
                warn!("Credential selection is not available in this environment");
                self.error = Some(SELECTOR_UNAVAILABLE_MESSAGE.to_string());
                return self.phase;
            }
        };

        match selector.select().await {
            Ok(()) => {
                info!("API key reselected");
                self.credential_valid = true;
                self.credential_prompt_visible = false;
                self.error = None;
                self.phase = SessionPhase::Idle;
            }
            Err(e) => {
                warn!("Error opening API key selection: {e}");
                self.error = Some(SELECTOR_FAILED_MESSAGE.to_string());
            }
        }

        self.phase
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn keywords(&self) -> &str {
        &self.keywords
    }

    pub fn topics(&self) -> Option<&[ThesisTopic]> {
        self.topics.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn credential_prompt_visible(&self) -> bool {
        self.credential_prompt_visible
    }

    pub fn credential_valid(&self) -> bool {
        self.credential_valid
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    /// The submit control is enabled only when not loading and the keywords
    /// are non-blank.
    pub fn can_submit(&self) -> bool {
        !self.loading && !self.keywords.trim().is_empty()
    }
}
