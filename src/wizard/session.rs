use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::service::quote_service::QuoteService;
use crate::util::error::ServiceError;
use crate::wizard::engine::{QuoteWizard, StepInput, WizardError, WizardView};

/// A wizard as returned to its client.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    #[serde(flatten)]
    pub wizard: WizardView,
}

/// How long sessions live and how many are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionLimits {
    /// Unfinished sessions untouched for this long are dropped.
    pub idle_ttl: Duration,
    /// Submitted sessions are kept this long after their last access.
    pub submitted_ttl: Duration,
    /// Upper bound on live sessions; the least recently used one makes room.
    pub max_sessions: usize,
}

impl Default for SessionLimits {
    fn default() -> Self {
        SessionLimits {
            idle_ttl: Duration::from_secs(30 * 60),
            submitted_ttl: Duration::from_secs(5 * 60),
            max_sessions: 10_000,
        }
    }
}

struct SessionEntry {
    wizard: Arc<Mutex<QuoteWizard>>,
    touched: Instant,
    submitted: bool,
}

impl SessionEntry {
    fn expired(&self, now: Instant, limits: &SessionLimits) -> bool {
        let ttl = if self.submitted { limits.submitted_ttl } else { limits.idle_ttl };
        now.duration_since(self.touched) >= ttl
    }
}

/// In-process store of wizard sessions keyed by a random id.
///
/// Each session has its own lock. A submission's insert runs on a spawned
/// task that also records the outcome, so the submitting flag is cleared
/// even when the request that started it goes away.
#[derive(Default)]
pub struct WizardSessions {
    sessions: Mutex<HashMap<Uuid, SessionEntry>>,
    limits: SessionLimits,
}

impl WizardSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: SessionLimits) -> Self {
        WizardSessions { sessions: Mutex::default(), limits }
    }

    async fn get(&self, id: Uuid) -> Result<Arc<Mutex<QuoteWizard>>, WizardError> {
        let now = Instant::now();
        let mut sessions = self.sessions.lock().await;
        let entry = sessions.get_mut(&id).ok_or(WizardError::SessionNotFound(id))?;
        if entry.expired(now, &self.limits) {
            sessions.remove(&id);
            debug!(session_id = %id, "Expired wizard session dropped");
            return Err(WizardError::SessionNotFound(id));
        }
        entry.touched = now;
        Ok(entry.wizard.clone())
    }

    async fn mark_submitted(&self, id: Uuid) {
        if let Some(entry) = self.sessions.lock().await.get_mut(&id) {
            entry.submitted = true;
            entry.touched = Instant::now();
        }
    }

    pub async fn create(&self) -> SessionView {
        let id = Uuid::new_v4();
        let wizard = QuoteWizard::new();
        let view = SessionView { id, wizard: wizard.view() };
        let now = Instant::now();

        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|_, entry| !entry.expired(now, &self.limits));
        if sessions.len() < before {
            debug!(evicted = before - sessions.len(), "Expired wizard sessions dropped");
        }
        while !sessions.is_empty() && sessions.len() >= self.limits.max_sessions {
            let oldest = sessions.iter().min_by_key(|(_, entry)| entry.touched).map(|(id, _)| *id);
            if let Some(oldest) = oldest {
                sessions.remove(&oldest);
                warn!(session_id = %oldest, "Wizard session limit reached, dropping least recently used session");
            }
        }
        sessions.insert(id, SessionEntry { wizard: Arc::new(Mutex::new(wizard)), touched: now, submitted: false });
        drop(sessions);

        info!(session_id = %id, "Wizard session created");
        view
    }

    pub async fn view(&self, id: Uuid) -> Result<SessionView, WizardError> {
        let wizard = self.get(id).await?;
        let view = wizard.lock().await.view();
        Ok(SessionView { id, wizard: view })
    }

    pub async fn advance(&self, id: Uuid, input: StepInput) -> Result<SessionView, WizardError> {
        let wizard = self.get(id).await?;
        let mut wizard = wizard.lock().await;
        let step = wizard.advance(input)?;
        info!(session_id = %id, step = %step, "Wizard advanced");
        Ok(SessionView { id, wizard: wizard.view() })
    }

    pub async fn retreat(&self, id: Uuid) -> Result<SessionView, WizardError> {
        let wizard = self.get(id).await?;
        let mut wizard = wizard.lock().await;
        let step = wizard.retreat()?;
        info!(session_id = %id, step = %step, "Wizard moved back");
        Ok(SessionView { id, wizard: wizard.view() })
    }

    pub async fn submit(&self, id: Uuid, service: Arc<dyn QuoteService>) -> Result<SessionView, WizardError> {
        let wizard = self.get(id).await?;
        let quote = wizard.lock().await.begin_submission()?;

        let task_wizard = wizard.clone();
        let task = tokio::spawn(async move {
            let result = service.submit_quote(quote).await;
            task_wizard.lock().await.complete_submission(result)
        });
        let outcome = match task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(session_id = %id, "Wizard submission task failed: {}", e);
                let failure = ServiceError::Persistence("submission was interrupted".to_string());
                wizard.lock().await.complete_submission(Err(failure))
            }
        };

        match outcome {
            Ok(stored) => {
                info!(session_id = %id, quote_id = %stored.id, "Wizard submitted");
                self.mark_submitted(id).await;
            }
            Err(e) => {
                warn!(session_id = %id, "Wizard submission failed: {}", e);
                return Err(e);
            }
        }
        let view = wizard.lock().await.view();
        Ok(SessionView { id, wizard: view })
    }

    pub async fn discard(&self, id: Uuid) -> Result<(), WizardError> {
        self.sessions
            .lock()
            .await
            .remove(&id)
            .map(|_| info!(session_id = %id, "Wizard session discarded"))
            .ok_or(WizardError::SessionNotFound(id))
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::engine::WizardStep;

    #[tokio::test]
    async fn test_create_and_discard() {
        let sessions = WizardSessions::new();
        let view = sessions.create().await;
        assert_eq!(view.wizard.step, WizardStep::PersonalInfo);
        assert_eq!(sessions.len().await, 1);

        sessions.discard(view.id).await.unwrap();
        assert!(sessions.is_empty().await);
        assert_eq!(sessions.discard(view.id).await, Err(WizardError::SessionNotFound(view.id)));
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let sessions = WizardSessions::new();
        let id = Uuid::new_v4();
        assert!(matches!(sessions.view(id).await, Err(WizardError::SessionNotFound(missing)) if missing == id));
        assert!(sessions.retreat(id).await.is_err());
    }

    #[tokio::test]
    async fn test_idle_sessions_expire() {
        let sessions = WizardSessions::with_limits(SessionLimits { idle_ttl: Duration::ZERO, ..SessionLimits::default() });
        let first = sessions.create().await;
        assert!(matches!(sessions.view(first.id).await, Err(WizardError::SessionNotFound(_))));
        assert!(sessions.is_empty().await);

        sessions.create().await;
        sessions.create().await;
        assert_eq!(sessions.len().await, 1);
    }

    #[tokio::test]
    async fn test_session_cap_drops_least_recently_used() {
        let sessions = WizardSessions::with_limits(SessionLimits { max_sessions: 2, ..SessionLimits::default() });
        let first = sessions.create().await;
        tokio::time::sleep(Duration::from_millis(2)).await;
        let second = sessions.create().await;
        tokio::time::sleep(Duration::from_millis(2)).await;
        sessions.view(first.id).await.unwrap();

        let third = sessions.create().await;
        assert_eq!(sessions.len().await, 2);
        assert!(sessions.view(first.id).await.is_ok());
        assert!(sessions.view(second.id).await.is_err());
        assert!(sessions.view(third.id).await.is_ok());
    }
}
