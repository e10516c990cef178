//! Access to the remote contacts store.
//!
//! The list controller only talks to [`ContactsApi`]; the HTTP client is one
//! implementation of it.

mod remote;
#[cfg(test)]
pub(crate) mod memory;

pub use remote::RemoteContactsClient;

use crate::error::RemoteError;
use crate::models::Contact;

/// CRUD operations on the `/contacts` resource.
pub trait ContactsApi {
    /// Fetch every contact, each carrying its identifier.
    fn list(&self) -> Result<Vec<Contact>, RemoteError>;

    /// Persist a new contact. The returned record carries the assigned id.
    fn create(&self, draft: &Contact) -> Result<Contact, RemoteError>;

    /// Replace the contact stored under `id`.
    fn update(&self, id: &str, draft: &Contact) -> Result<Contact, RemoteError>;

    fn delete(&self, id: &str) -> Result<(), RemoteError>;

    /// Where requests go, for display purposes
    fn describe(&self) -> String;
}
