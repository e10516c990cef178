//! The contact list controller.
//!
//! [`ListView`] owns the contact collection for as long as the view lives.
//! The collection is only ever replaced by a full fetch; mutations go to the
//! remote store first and are followed by a reload.

mod derive;

pub use derive::{
    clamp_page, compare, derive, filter_sort, page_count, Derived, EmptyState, Filter, PageSize,
    SortOrder, ViewState,
};

use crate::api::ContactsApi;
use crate::error::RemoteError;
use crate::models::{Contact, ContactField};

pub struct ListView {
    api: Box<dyn ContactsApi>,
    contacts: Vec<Contact>,
    loading: bool,
    state: ViewState,
    resync_error: Option<RemoteError>,
}

impl ListView {
    pub fn new(api: Box<dyn ContactsApi>) -> Self {
        Self {
            api,
            contacts: Vec::new(),
            loading: true,
            state: ViewState::default(),
            resync_error: None,
        }
    }

    pub fn with_page_size(mut self, size: PageSize) -> Self {
        self.state.page_size = size;
        self
    }

    /// True until the first load has finished, whatever its outcome.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn api(&self) -> &dyn ContactsApi {
        self.api.as_ref()
    }

    pub fn find(&self, id: &str) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id.as_deref() == Some(id))
    }

    /// Replace the collection with the remote one.
    ///
    /// On failure the previous collection is kept and the error is logged
    /// before being returned.
    pub fn load(&mut self) -> Result<(), RemoteError> {
        let result = self.api.list();
        self.loading = false;

        match result {
            Ok(contacts) => {
                tracing::debug!(count = contacts.len(), "loaded contacts");
                self.contacts = contacts;
                self.clamp_page();
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch contacts");
                Err(e)
            }
        }
    }

    /// Same field flips direction; a new field sorts ascending.
    pub fn set_sort(&mut self, field: ContactField) {
        if self.state.sort_field == field {
            self.state.sort_order = self.state.sort_order.toggled();
        } else {
            self.state.sort_field = field;
            self.state.sort_order = SortOrder::Asc;
        }
    }

    pub fn sort_by(&mut self, field: ContactField, order: SortOrder) {
        self.state.sort_field = field;
        self.state.sort_order = order;
    }

    pub fn set_filter(&mut self, field: Option<ContactField>, query: impl Into<String>) {
        self.state.filter = Filter::new(field, query);
        self.state.page = 0;
    }

    pub fn clear_filter(&mut self) {
        self.set_filter(None, "");
    }

    pub fn set_page(&mut self, index: usize) {
        self.state.page = index;
    }

    pub fn set_page_size(&mut self, size: PageSize) {
        self.state.page_size = size;
        self.state.page = 0;
    }

    pub fn next_page(&mut self) {
        let derived = self.derive();
        if !derived.is_last_page() {
            self.state.page = derived.page + 1;
        }
    }

    pub fn prev_page(&mut self) {
        let page = self.derive().page;
        self.state.page = page.saturating_sub(1);
    }

    /// Rows to render for the current state.
    pub fn derive(&self) -> Derived<'_> {
        derive(&self.contacts, &self.state)
    }

    pub fn create(&mut self, draft: &Contact) -> Result<Contact, RemoteError> {
        let created = self.api.create(draft).map_err(|e| {
            tracing::warn!(error = %e, "failed to create contact");
            e
        })?;
        tracing::info!(id = created.id.as_deref().unwrap_or(""), "created contact");
        self.reload();
        Ok(created)
    }

    pub fn update(&mut self, id: &str, draft: &Contact) -> Result<Contact, RemoteError> {
        let updated = self.api.update(id, draft).map_err(|e| {
            tracing::warn!(error = %e, id, "failed to update contact");
            e
        })?;
        tracing::info!(id, "updated contact");
        self.reload();
        Ok(updated)
    }

    pub fn remove(&mut self, id: &str) -> Result<(), RemoteError> {
        self.api.delete(id).map_err(|e| {
            tracing::warn!(error = %e, id, "failed to delete contact");
            e
        })?;
        tracing::info!(id, "deleted contact");
        self.reload();
        Ok(())
    }

    /// Resync after a successful mutation. A failed fetch leaves the last
    /// good collection in place and is kept for [`Self::take_resync_error`].
    fn reload(&mut self) {
        self.resync_error = self.load().err();
    }

    /// The failed reload that followed the last successful mutation, if any.
    /// The collection is stale until the next successful load.
    pub fn take_resync_error(&mut self) -> Option<RemoteError> {
        self.resync_error.take()
    }

    fn clamp_page(&mut self) {
        let matched = filter_sort(&self.contacts, &self.state).len();
        self.state.page = clamp_page(self.state.page, matched, self.state.page_size);
    }
}
