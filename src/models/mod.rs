mod contact;

pub use contact::{Contact, ContactField};
