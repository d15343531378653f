//! Single-threaded driver for the root view
//!
//! Executes the commands the view emits against a [`UsersApi`] and feeds the
//! results back in the order they resolve. Everything runs on the caller's
//! task: requests are futures held in a `FuturesUnordered`, never spawned, so
//! dropping them is the cancellation.

use crate::error::Result;
use crate::events::ViewEvent;
use crate::root::{Command, Effects, RootRender, RootView, ViewConfig};
use crate::tracker::RequestToken;
use futures_util::future::BoxFuture;
use futures_util::stream::{FuturesUnordered, StreamExt};
use roster_client::{ClientError, UsersApi};
use roster_core::types::{DraftField, User, UserCollection, UserId};
use std::sync::Arc;
use tracing::{debug, warn};

/// A request that finished, with what it returned
enum Completion {
    Read {
        token: RequestToken,
        result: std::result::Result<UserCollection, ClientError>,
    },
    Create {
        result: std::result::Result<Option<User>, ClientError>,
    },
}

/// Drives a [`RootView`] against a users API
///
/// # Example
///
/// ```ignore
/// use roster_client::{ClientConfig, UsersClient};
/// use roster_view::{ViewConfig, ViewRuntime};
/// use std::sync::Arc;
///
/// let client = Arc::new(UsersClient::new(ClientConfig::new("http://localhost:8000"))?);
/// let mut runtime = ViewRuntime::new(client, ViewConfig::default());
///
/// runtime.mount()?;
/// runtime.settle().await;
/// print!("{}", runtime.render());
/// ```
pub struct ViewRuntime<A: UsersApi + 'static> {
    api: Arc<A>,
    view: RootView,
    pending: FuturesUnordered<BoxFuture<'static, Completion>>,
}

impl<A: UsersApi + 'static> ViewRuntime<A> {
    pub fn new(api: Arc<A>, config: ViewConfig) -> Self {
        Self {
            api,
            view: RootView::new(config),
            pending: FuturesUnordered::new(),
        }
    }

    pub fn view(&self) -> &RootView {
        &self.view
    }

    pub fn render(&self) -> RootRender {
        self.view.render()
    }

    /// Number of requests issued and not yet resolved
    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    pub fn mount(&mut self) -> Result<Vec<ViewEvent>> {
        let effects = self.view.mount()?;
        Ok(self.dispatch(effects))
    }

    pub fn reload(&mut self) -> Result<Vec<ViewEvent>> {
        let effects = self.view.reload()?;
        Ok(self.dispatch(effects))
    }

    pub fn edit(&mut self, field: DraftField, value: impl Into<String>) -> Result<Vec<ViewEvent>> {
        let effects = self.view.edit(field, value)?;
        Ok(self.dispatch(effects))
    }

    pub fn submit(&mut self) -> Result<Vec<ViewEvent>> {
        let effects = self.view.submit()?;
        Ok(self.dispatch(effects))
    }

    pub fn reset_form(&mut self) -> Result<Vec<ViewEvent>> {
        let effects = self.view.reset_form()?;
        Ok(self.dispatch(effects))
    }

    pub fn toggle_row(&mut self, id: &UserId) -> Result<Vec<ViewEvent>> {
        let effects = self.view.toggle_row(id)?;
        Ok(self.dispatch(effects))
    }

    /// Tear the view down and drop every in-flight request
    pub fn teardown(&mut self) -> Vec<ViewEvent> {
        let dropped = self.pending.len();
        self.pending = FuturesUnordered::new();
        if dropped > 0 {
            debug!(dropped, "Cancelled in-flight requests");
        }
        self.view.teardown().events
    }

    /// Wait for the next request to resolve and apply it
    ///
    /// Returns `None` when nothing is in flight. Cancel-safe: dropping the
    /// returned future before it completes loses no result.
    pub async fn next_completion(&mut self) -> Option<Vec<ViewEvent>> {
        let completion = self.pending.next().await?;
        Some(self.apply(completion))
    }

    /// Apply completions until nothing is in flight
    pub async fn settle(&mut self) -> Vec<ViewEvent> {
        let mut events = Vec::new();
        while let Some(batch) = self.next_completion().await {
            events.extend(batch);
        }
        events
    }

    fn dispatch(&mut self, effects: Effects) -> Vec<ViewEvent> {
        for command in effects.commands {
            self.execute(command);
        }
        effects.events
    }

    fn execute(&mut self, command: Command) {
        let api = Arc::clone(&self.api);
        match command {
            Command::FetchUsers { token } => {
                self.pending.push(Box::pin(async move {
                    Completion::Read {
                        token,
                        result: api.list_users().await,
                    }
                }));
            }
            Command::CreateUser { user } => {
                self.pending.push(Box::pin(async move {
                    Completion::Create {
                        result: api.create_user(user).await,
                    }
                }));
            }
        }
    }

    fn apply(&mut self, completion: Completion) -> Vec<ViewEvent> {
        let outcome = match completion {
            Completion::Read { token, result } => self.view.on_read_resolved(token, result),
            Completion::Create { result } => self.view.on_create_resolved(result),
        };

        match outcome {
            Ok(effects) => self.dispatch(effects),
            Err(e) => {
                warn!(error = %e, "Dropping completion the view cannot accept");
                Vec::new()
            }
        }
    }
}
