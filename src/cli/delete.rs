use anyhow::{anyhow, Result};

use crate::cli::form::warn_if_stale;
use crate::cli::ui::{confirm, status};
use crate::models::Contact;
use crate::view::ListView;

/// Execute the delete command
pub fn run_delete(view: &mut ListView, id: &str, force: bool) -> Result<()> {
    let id = id.trim();
    if id.is_empty() {
        return Err(anyhow!("Identifier cannot be empty."));
    }

    view.load()?;
    match view.find(id).cloned() {
        Some(contact) => {
            delete_with_confirm(view, &contact, force)?;
            warn_if_stale(view);
        }
        None => {
            println!("No contact found with ID: {}", id);
        }
    }
    Ok(())
}

/// Show a summary, confirm unless forced, then delete.
/// Returns true if the contact was deleted.
pub fn delete_with_confirm(view: &mut ListView, contact: &Contact, force: bool) -> Result<bool> {
    let id = contact
        .id
        .as_deref()
        .ok_or_else(|| anyhow!("Contact has not been saved."))?;

    print_contact_summary(contact);
    println!();

    if !force && !confirm("Are you sure you want to delete this contact?")? {
        return Ok(false);
    }

    view.remove(id)?;
    status("Deleted.");
    Ok(true)
}

fn print_contact_summary(contact: &Contact) {
    println!("{}", contact.display_name());
    if !contact.email.is_empty() {
        println!("  {}", contact.email);
    }
    if !contact.phone_number.is_empty() {
        println!("  {}", contact.phone_number);
    }
    match (contact.job_title.is_empty(), contact.company.is_empty()) {
        (false, false) => println!("  {} at {}", contact.job_title, contact.company),
        (true, false) => println!("  {}", contact.company),
        (false, true) => println!("  {}", contact.job_title),
        (true, true) => {}
    }
}
