//! In-process stand-in for the remote store, used by controller tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::ContactsApi;
use crate::error::RemoteError;
use crate::models::Contact;

#[derive(Default)]
struct Store {
    contacts: RefCell<Vec<Contact>>,
    next_id: Cell<u32>,
    failing: Cell<bool>,
    failing_lists: Cell<bool>,
    calls: RefCell<Vec<String>>,
}

/// Cloning shares the same store, so a test can keep a handle after giving
/// one to the controller.
#[derive(Clone, Default)]
pub(crate) struct InMemoryContacts {
    store: Rc<Store>,
}

impl InMemoryContacts {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_contacts(contacts: Vec<Contact>) -> Self {
        let api = Self::new();
        for contact in contacts {
            api.insert(contact);
        }
        api
    }

    /// Store a record, assigning an id when it has none.
    pub(crate) fn insert(&self, mut contact: Contact) -> Contact {
        if contact.id.is_none() {
            let id = self.store.next_id.get() + 1;
            self.store.next_id.set(id);
            contact.id = Some(id.to_string());
        }
        self.store.contacts.borrow_mut().push(contact.clone());
        contact
    }

    /// Make every following call fail until switched back.
    pub(crate) fn set_failing(&self, failing: bool) {
        self.store.failing.set(failing);
    }

    /// Make only `list` fail, so mutations succeed but cannot be reloaded.
    pub(crate) fn set_failing_lists(&self, failing: bool) {
        self.store.failing_lists.set(failing);
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.store.calls.borrow().clone()
    }

    pub(crate) fn stored(&self) -> Vec<Contact> {
        self.store.contacts.borrow().clone()
    }

    fn record(&self, method: reqwest::Method, path: String) -> Result<(), RemoteError> {
        self.store.calls.borrow_mut().push(format!("{} {}", method, path));
        if self.store.failing.get() {
            return Err(RemoteError::Status {
                method,
                url: path,
                status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
            });
        }
        Ok(())
    }

    fn not_found(method: reqwest::Method, id: &str) -> RemoteError {
        RemoteError::Status {
            method,
            url: format!("/contacts/{}", id),
            status: reqwest::StatusCode::NOT_FOUND,
        }
    }
}

impl ContactsApi for InMemoryContacts {
    fn list(&self) -> Result<Vec<Contact>, RemoteError> {
        self.record(reqwest::Method::GET, "/contacts".to_string())?;
        if self.store.failing_lists.get() {
            return Err(RemoteError::Status {
                method: reqwest::Method::GET,
                url: "/contacts".to_string(),
                status: reqwest::StatusCode::BAD_GATEWAY,
            });
        }
        Ok(self.stored())
    }

    fn create(&self, draft: &Contact) -> Result<Contact, RemoteError> {
        self.record(reqwest::Method::POST, "/contacts".to_string())?;
        Ok(self.insert(draft.without_id()))
    }

    fn update(&self, id: &str, draft: &Contact) -> Result<Contact, RemoteError> {
        self.record(reqwest::Method::PUT, format!("/contacts/{}", id))?;
        let mut contacts = self.store.contacts.borrow_mut();
        let slot = contacts
            .iter_mut()
            .find(|c| c.id.as_deref() == Some(id))
            .ok_or_else(|| Self::not_found(reqwest::Method::PUT, id))?;
        *slot = Contact {
            id: Some(id.to_string()),
            ..draft.clone()
        };
        Ok(slot.clone())
    }

    fn delete(&self, id: &str) -> Result<(), RemoteError> {
        self.record(reqwest::Method::DELETE, format!("/contacts/{}", id))?;
        let mut contacts = self.store.contacts.borrow_mut();
        let before = contacts.len();
        contacts.retain(|c| c.id.as_deref() != Some(id));
        if contacts.len() == before {
            return Err(Self::not_found(reqwest::Method::DELETE, id));
        }
        Ok(())
    }

    fn describe(&self) -> String {
        "memory://contacts".to_string()
    }
}
