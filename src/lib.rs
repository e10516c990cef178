pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod models;
pub mod view;

pub use api::{ContactsApi, RemoteContactsClient};
pub use config::Config;
pub use models::{Contact, ContactField};
pub use view::ListView;
