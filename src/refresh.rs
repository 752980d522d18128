use crate::errors::FetchFailure;
use crate::provider::ResourceProvider;
use crate::session::{RefreshState, Session};
use chrono::{DateTime, Utc};
use std::{sync::Arc, time::Duration};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// First successful fetch for the session.
    Initialized,
    AlreadyInitialized,
    Refreshed,
    NotDue,
    /// Nothing to refresh yet.
    Unset,
    Failed(FetchFailure),
}

/// What a pass has to do, decided from the session before any fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshPlan {
    Initialize,
    Refresh,
    NotDue,
}

/// Keeps a session's background URL at most one interval old.
///
/// Failed fetches never clear a URL that was fetched successfully before.
pub struct RefreshController {
    provider: Arc<dyn ResourceProvider>,
    interval: Duration,
}

impl RefreshController {
    pub fn new(provider: Arc<dyn ResourceProvider>, interval: Duration) -> Self {
        Self { provider, interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub async fn ensure_initialized(
        &self,
        session: &mut Session,
        now: DateTime<Utc>,
    ) -> RefreshOutcome {
        if session.backdrop.is_some() {
            return RefreshOutcome::AlreadyInitialized;
        }

        let fetched = self.provider.fetch().await;
        self.apply(session, RefreshPlan::Initialize, fetched, now)
    }

    pub async fn maybe_refresh(
        &self,
        session: &mut Session,
        now: DateTime<Utc>,
    ) -> RefreshOutcome {
        match self.plan(session, now) {
            RefreshPlan::Initialize => RefreshOutcome::Unset,
            RefreshPlan::NotDue => RefreshOutcome::NotDue,
            RefreshPlan::Refresh => {
                let fetched = self.provider.fetch().await;
                self.apply(session, RefreshPlan::Refresh, fetched, now)
            }
        }
    }

    /// One refresh pass. The previous pass's warning is dropped first.
    pub async fn tick(
        &self,
        session: &mut Session,
        now: DateTime<Utc>,
    ) -> RefreshOutcome {
        session.warning = None;
        match self.ensure_initialized(session, now).await {
            RefreshOutcome::AlreadyInitialized => self.maybe_refresh(session, now).await,
            outcome => outcome,
        }
    }

    /// Same pass as [`tick`](Self::tick) on a shared session, with the lock
    /// released while the provider is being asked. Readers of the session
    /// only ever wait for the plan or apply step.
    pub async fn run_pass(&self, session: &Mutex<Session>, now: DateTime<Utc>) -> RefreshOutcome {
        let plan = {
            let mut guard = session.lock().await;
            let plan = self.plan(&guard, now);
            if plan == RefreshPlan::NotDue {
                guard.warning = None;
                return RefreshOutcome::NotDue;
            }
            plan
        };

        let fetched = self.provider.fetch().await;

        let mut guard = session.lock().await;
        self.apply(&mut guard, plan, fetched, now)
    }

    pub fn plan(&self, session: &Session, now: DateTime<Utc>) -> RefreshPlan {
        match session.backdrop.as_ref() {
            None => RefreshPlan::Initialize,
            Some(state) if self.is_due(state, now) => RefreshPlan::Refresh,
            Some(state) => {
                debug!(last_refresh_at = %state.last_refresh_at, "backdrop not due");
                RefreshPlan::NotDue
            }
        }
    }

    /// Records a fetch result. A failure leaves `backdrop` untouched.
    pub fn apply(
        &self,
        session: &mut Session,
        plan: RefreshPlan,
        fetched: Result<String, FetchFailure>,
        now: DateTime<Utc>,
    ) -> RefreshOutcome {
        let outcome = match plan {
            RefreshPlan::NotDue => return RefreshOutcome::NotDue,
            RefreshPlan::Initialize => RefreshOutcome::Initialized,
            RefreshPlan::Refresh => RefreshOutcome::Refreshed,
        };

        match fetched {
            Ok(url) => {
                info!(url = %url, ?outcome, "backdrop updated");
                session.backdrop = Some(RefreshState {
                    current_resource_url: url,
                    last_refresh_at: now,
                });
                session.warning = None;
                outcome
            }
            Err(err) => record_failure(session, err),
        }
    }

    /// A clock that went backwards never makes the state due.
    pub fn is_due(&self, state: &RefreshState, now: DateTime<Utc>) -> bool {
        match (now - state.last_refresh_at).to_std() {
            Ok(elapsed) => elapsed >= self.interval,
            Err(_) => false,
        }
    }
}

fn record_failure(session: &mut Session, err: FetchFailure) -> RefreshOutcome {
    warn!(error = %err, stale = session.backdrop.is_some(), "backdrop fetch failed");
    session.warning = Some(format!("Could not load a new background image: {err}"));
    RefreshOutcome::Failed(err)
}
