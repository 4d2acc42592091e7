//! Resource page: the per-view state container tying one resource's list,
//! create form and dispatcher together.
//!
//! DESIGN
//! ======
//! A page owns its collection exclusively. Nothing is shared between pages,
//! so two screens for the same resource never mutate each other's state.
//! The page is also the place where operation outcomes become notices: the
//! dispatcher returns plain results and the page picks the localized text
//! from the resource's message table.
//!
//! ERROR HANDLING
//! ==============
//! Every failure ends the current operation and leaves the page as it was
//! before it started: form values stay, the collection is unchanged. Fetch
//! failures are only logged and leave the list unloaded.

use std::sync::Arc;

use crate::dispatch::{DispatchError, Dispatcher};
use crate::form::{CreateForm, SubmitBlocked, ValidationError};
use crate::http::Transport;
use crate::list::{Appended, ListView, LoadTicket};
use crate::notify::{Notice, Notifier};
use crate::record::Record;
use crate::resource::ResourceSpec;

#[cfg(test)]
#[path = "page_test.rs"]
mod tests;

/// What happens to the list after a successful create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreatePolicy {
    /// Append the returned record and never refetch.
    #[default]
    Append,
    /// Append, then refetch so backend-side defaults show up.
    AppendThenReload,
}

/// Result of [`ResourcePage::submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The backend created the record and the list received it.
    Created(Record),
    /// Validation stopped the submit before any network call.
    Invalid(ValidationError),
    /// The backend call failed; form and list are unchanged.
    Failed(DispatchError),
    /// A submit was already in flight.
    Busy,
}

pub struct ResourcePage {
    spec: ResourceSpec,
    dispatcher: Dispatcher,
    list: ListView,
    form: CreateForm,
    policy: CreatePolicy,
}

impl ResourcePage {
    #[must_use]
    pub fn new(spec: &ResourceSpec, transport: Arc<dyn Transport>, policy: CreatePolicy) -> Self {
        Self {
            dispatcher: Dispatcher::new(transport, spec.name, spec.path),
            list: ListView::new(spec.columns.clone()),
            form: CreateForm::new(spec.fields.clone()),
            spec: spec.clone(),
            policy,
        }
    }

    #[must_use]
    pub fn spec(&self) -> &ResourceSpec {
        &self.spec
    }

    #[must_use]
    pub fn list(&self) -> &ListView {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListView {
        &mut self.list
    }

    #[must_use]
    pub fn form(&self) -> &CreateForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut CreateForm {
        &mut self.form
    }

    /// Mount the page and run its one initial fetch. A second mount without
    /// an unmount in between does nothing.
    pub async fn mount(&mut self) {
        if let Some(ticket) = self.list.mount() {
            self.load(ticket).await;
        }
    }

    /// Refetch and replace the collection wholesale.
    pub async fn reload(&mut self) {
        if let Some(ticket) = self.list.reload() {
            self.load(ticket).await;
        }
    }

    pub fn unmount(&mut self) {
        self.list.unmount();
    }

    async fn load(&mut self, ticket: LoadTicket) {
        match self.dispatcher.fetch_all().await {
            Ok(records) => {
                self.list.complete_load(ticket, records);
            }
            Err(e) => log_failure(self.spec.name, "fetch", &e),
        }
    }

    /// Validate the form and create a record from it.
    ///
    /// Emits exactly one notice per call that gets past the busy check:
    /// a warning for validation failures, success or error otherwise.
    pub async fn submit(&mut self, notifier: &dyn Notifier) -> SubmitOutcome {
        let body = match self.form.begin_submit() {
            Ok(body) => body,
            Err(SubmitBlocked::Pending) => return SubmitOutcome::Busy,
            Err(SubmitBlocked::Invalid(e)) => {
                tracing::debug!(resource = self.spec.name, error = %e, "create blocked by validation");
                notifier.notify(Notice::warning(self.spec.messages.invalid));
                return SubmitOutcome::Invalid(e);
            }
        };

        match self.dispatcher.create(&body).await {
            Ok(record) => {
                self.form.finish_submit(true);
                if self.list.append(record.clone()) == Appended::Dropped {
                    tracing::debug!(resource = self.spec.name, "created record not kept, list is not mounted");
                }
                notifier.notify(Notice::success(self.spec.messages.created));
                if self.policy == CreatePolicy::AppendThenReload {
                    self.reload().await;
                }
                SubmitOutcome::Created(record)
            }
            Err(e) => {
                log_failure(self.spec.name, "create", &e);
                self.form.finish_submit(false);
                notifier.notify(Notice::error(self.spec.messages.create_failed));
                SubmitOutcome::Failed(e)
            }
        }
    }
}

fn log_failure(resource: &str, operation: &str, error: &DispatchError) {
    if error.is_decode() {
        tracing::error!(resource, operation, error = %error, "unexpected backend response");
    } else {
        tracing::warn!(resource, operation, error = %error, "backend call failed");
    }
}
