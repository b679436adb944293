//! Main-screen state: the prompt being edited, the style defaults, the
//! in-flight guard and the last result, with the history store injected.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::{
    error::{ErrorEnvelope, LogoGenError, Result},
    history::HistoryStore,
    models::{GeneratedLogo, GenerationDefaults, GenerationRequest, HistoryEntry},
    onboarding::OnboardingOutcome,
    relay::LogoGenerator,
};

pub const ALREADY_RUNNING: &str = "A logo is already being generated";

/// What the screen shows below the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LastResult {
    Image(GeneratedLogo),
    Error(String),
}

#[derive(Debug, Default)]
struct Draft {
    prompt: String,
    defaults: GenerationDefaults,
    last: Option<LastResult>,
}

/// Clears the busy flag when dropped, so the submit control comes back
/// whether the call succeeded, failed or panicked.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct Studio {
    generator: Arc<dyn LogoGenerator>,
    history: HistoryStore,
    draft: Mutex<Draft>,
    busy: AtomicBool,
}

impl Studio {
    pub fn new(generator: Arc<dyn LogoGenerator>, history: HistoryStore) -> Self {
        Self {
            generator,
            history,
            draft: Mutex::new(Draft::default()),
            busy: AtomicBool::new(false),
        }
    }

    /// Seed style defaults from a finished onboarding flow. A skipped flow
    /// leaves the first option of every set.
    pub fn with_onboarding(self, outcome: &OnboardingOutcome) -> Self {
        self.set_defaults(outcome.defaults());
        self
    }

    fn draft(&self) -> MutexGuard<'_, Draft> {
        // The draft holds plain values, a poisoned lock is still usable.
        self.draft.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn set_prompt(&self, prompt: impl Into<String>) {
        self.draft().prompt = prompt.into();
    }

    pub fn prompt(&self) -> String {
        self.draft().prompt.clone()
    }

    pub fn set_defaults(&self, defaults: GenerationDefaults) {
        self.draft().defaults = defaults;
    }

    pub fn defaults(&self) -> GenerationDefaults {
        self.draft().defaults
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Whether the generate control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_busy() && !self.draft().prompt.trim().is_empty()
    }

    pub fn last_result(&self) -> Option<LastResult> {
        self.draft().last.clone()
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.history.load()
    }

    /// Run one generation from the current draft. Refused while another is
    /// in flight or the prompt is blank. On success the result is recorded
    /// in history; either way it replaces the previous result on screen.
    pub async fn submit(&self) -> Result<GeneratedLogo> {
        let request = {
            let mut draft = self.draft();
            if draft.prompt.trim().is_empty() {
                return Err(LogoGenError::Validation("Describe your logo first".into()));
            }
            if self
                .busy
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_err()
            {
                return Err(LogoGenError::Validation(ALREADY_RUNNING.into()));
            }
            draft.last = None;
            GenerationRequest::new(draft.prompt.clone()).with_defaults(&draft.defaults)
        };
        let _busy = BusyGuard(&self.busy);

        let result = self.generator.generate(request.clone()).await;

        let shown = match &result {
            Ok(logo) => {
                self.history.append(HistoryEntry::new(logo.url.clone(), &request));
                LastResult::Image(logo.clone())
            }
            Err(err) => LastResult::Error(ErrorEnvelope::from(err).message),
        };
        self.draft().last = Some(shown);
        result
    }
}
