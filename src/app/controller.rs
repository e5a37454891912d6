//! Effect runner for the application state
//!
//! The [`Controller`] owns the [`AppState`] and executes the effects that
//! transitions return. Authentication and description requests run as tokio
//! tasks; their results come back over a channel and are applied as
//! ordinary actions. Closing the add-item modal aborts its request, and the
//! draft id check in the state machine drops any result that slipped
//! through before the abort.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};

use crate::app::state::{Action, AppState, DraftId, Effect};
use crate::auth::{AuthError, Authenticator};
use crate::generation::{DescriptionClient, FALLBACK_CONNECTION_ERROR};

/// Drives [`AppState`] and its async work
///
/// Must be used from within a tokio runtime.
pub struct Controller {
    state: AppState,
    authenticator: Arc<dyn Authenticator>,
    describer: DescriptionClient,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Action>,
    auth_task: Option<JoinHandle<()>>,
    generation_task: Option<(DraftId, JoinHandle<()>)>,
}

impl Controller {
    /// Create a controller around an initial state
    pub fn new(
        state: AppState,
        authenticator: Arc<dyn Authenticator>,
        describer: DescriptionClient,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state,
            authenticator,
            describer,
            tx,
            rx,
            auth_task: None,
            generation_task: None,
        }
    }

    /// Current state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Apply a user action and start whatever async work it requests
    pub fn dispatch(&mut self, action: Action) {
        match &action {
            Action::AuthFinished(_) => self.auth_task = None,
            Action::DescriptionGenerated { draft, .. } => {
                if self.generation_task.as_ref().map(|(id, _)| id) == Some(draft) {
                    self.generation_task = None;
                }
            }
            _ => {}
        }

        for effect in self.state.apply(action) {
            self.run(effect);
        }
    }

    /// Whether an authentication or description request is in flight
    pub fn has_pending(&self) -> bool {
        self.auth_task.is_some() || self.generation_task.is_some()
    }

    /// Wait for the next async result and apply it
    ///
    /// Returns `false` immediately when nothing is pending and no result is
    /// queued. A task that dies without reporting back (a panicking
    /// backend) is turned into a failed result, so this never waits on a
    /// task that is already gone.
    pub async fn next_completion(&mut self) -> bool {
        loop {
            if let Ok(action) = self.rx.try_recv() {
                self.dispatch(action);
                return true;
            }
            if !self.has_pending() {
                return false;
            }

            let wake = tokio::select! {
                biased;
                action = self.rx.recv() => Wake::Message(action),
                joined = join_slot(self.auth_task.as_mut()) => Wake::Auth(joined),
                joined = join_slot(self.generation_task.as_mut().map(|(_, h)| h)) => {
                    Wake::Generation(joined)
                }
            };

            match wake {
                Wake::Message(Some(action)) => {
                    self.dispatch(action);
                    return true;
                }
                Wake::Message(None) => return false,
                Wake::Auth(joined) => {
                    self.auth_task = None;
                    if let Some(reason) = failure_reason(joined) {
                        tracing::error!("Authentication task failed: {}", reason);
                        let _ = self
                            .tx
                            .send(Action::AuthFinished(Err(AuthError::Backend(reason))));
                    }
                }
                Wake::Generation(joined) => {
                    if let Some((draft, _)) = self.generation_task.take() {
                        if let Some(reason) = failure_reason(joined) {
                            tracing::error!(%draft, "Description task failed: {}", reason);
                            let _ = self.tx.send(Action::DescriptionGenerated {
                                draft,
                                text: FALLBACK_CONNECTION_ERROR.to_string(),
                            });
                        }
                    }
                }
            }
        }
    }

    /// Apply results until nothing is pending
    pub async fn settle(&mut self) {
        while self.next_completion().await {}
    }

    fn run(&mut self, effect: Effect) {
        match effect {
            Effect::Authenticate(request) => {
                let authenticator = Arc::clone(&self.authenticator);
                let tx = self.tx.clone();
                tracing::debug!(kind = request.kind(), "Starting authentication task");
                self.auth_task = Some(tokio::spawn(async move {
                    let outcome = authenticator.authenticate(request).await;
                    let _ = tx.send(Action::AuthFinished(outcome));
                }));
            }
            Effect::GenerateDescription {
                draft,
                name,
                category,
                keywords,
            } => {
                let describer = self.describer.clone();
                let tx = self.tx.clone();
                tracing::debug!(%draft, "Starting description task");
                let handle = tokio::spawn(async move {
                    let text = describer
                        .generate_description(&name, &category, &keywords)
                        .await;
                    let _ = tx.send(Action::DescriptionGenerated { draft, text });
                });
                self.generation_task = Some((draft, handle));
            }
            Effect::AbortGeneration => {
                if let Some((draft, handle)) = self.generation_task.take() {
                    tracing::debug!(%draft, "Aborting description task");
                    handle.abort();
                }
            }
        }
    }
}

enum Wake {
    Message(Option<Action>),
    Auth(Result<(), JoinError>),
    Generation(Result<(), JoinError>),
}

async fn join_slot(handle: Option<&mut JoinHandle<()>>) -> Result<(), JoinError> {
    match handle {
        Some(handle) => handle.await,
        None => std::future::pending().await,
    }
}

/// Why a finished task did not report back; `None` for normal exits and
/// deliberate aborts
fn failure_reason(joined: Result<(), JoinError>) -> Option<String> {
    match joined {
        Ok(()) => None,
        Err(e) if e.is_cancelled() => None,
        Err(e) => Some(e.to_string()),
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        if let Some(handle) = self.auth_task.take() {
            handle.abort();
        }
        if let Some((_, handle)) = self.generation_task.take() {
            handle.abort();
        }
    }
}
