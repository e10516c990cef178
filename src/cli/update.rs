use anyhow::{anyhow, Result};
use std::io::{self, IsTerminal};

use crate::cli::form::{apply_args, run_form, submit_form};
use crate::cli::ContactArgs;
use crate::form::ContactForm;
use crate::view::ListView;

/// Execute the edit command. With no field flags the form is run
/// interactively, pre-filled with the stored values.
pub fn run_update(view: &mut ListView, id: &str, args: ContactArgs) -> Result<()> {
    let id = id.trim();
    if id.is_empty() {
        return Err(anyhow!("Identifier cannot be empty."));
    }

    view.load()?;
    let Some(existing) = view.find(id).cloned() else {
        println!("No contact found with ID: {}", id);
        return Ok(());
    };

    if args.is_empty() {
        if !io::stdin().is_terminal() {
            return Err(anyhow!(
                "No changes given. Use -f, -l, -e, -p, -c or -t, or run in a terminal to edit interactively."
            ));
        }
        run_form(view, Some(&existing))?;
        return Ok(());
    }

    let mut form = ContactForm::new();
    form.open_edit(&existing)?;
    apply_args(&mut form, &args);
    let updated = submit_form(view, &mut form)?;

    println!("Updated: {}", updated.display_name());
    for (field, value) in args.values() {
        println!("  - {} -> {}", field.label().to_lowercase(), value.trim());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::memory::InMemoryContacts;
    use crate::models::Contact;

    fn setup() -> (ListView, InMemoryContacts) {
        let api = InMemoryContacts::with_contacts(vec![Contact {
            id: None,
            first_name: "John".to_string(),
            last_name: "Smith".to_string(),
            email: "john@example.com".to_string(),
            phone_number: "555-1234".to_string(),
            company: String::new(),
            job_title: String::new(),
        }]);
        (ListView::new(Box::new(api.clone())), api)
    }

    #[test]
    fn test_update_first_name() {
        let (mut view, api) = setup();
        let args = ContactArgs {
            first: Some("Johnny".to_string()),
            ..Default::default()
        };
        run_update(&mut view, "1", args).unwrap();

        let stored = &api.stored()[0];
        assert_eq!(stored.first_name, "Johnny");
        assert_eq!(stored.last_name, "Smith");
        assert_eq!(view.find("1").unwrap().first_name, "Johnny");
    }

    #[test]
    fn test_update_rejects_invalid_email() {
        let (mut view, api) = setup();
        let args = ContactArgs {
            email: Some("nope".to_string()),
            ..Default::default()
        };
        assert!(run_update(&mut view, "1", args).is_err());
        assert_eq!(api.stored()[0].email, "john@example.com");
        assert!(!api.calls().iter().any(|c| c.starts_with("PUT")));
    }

    #[test]
    fn test_update_clearing_required_field_fails() {
        let (mut view, _) = setup();
        let args = ContactArgs {
            phone: Some("   ".to_string()),
            ..Default::default()
        };
        let err = run_update(&mut view, "1", args).unwrap_err();
        assert!(err.to_string().contains("Phone number is required"));
    }

    #[test]
    fn test_update_unknown_id() {
        let (mut view, api) = setup();
        let args = ContactArgs {
            first: Some("Jane".to_string()),
            ..Default::default()
        };
        run_update(&mut view, "999", args).unwrap();
        assert_eq!(api.stored()[0].first_name, "John");
    }

    #[test]
    fn test_update_requires_identifier() {
        let (mut view, _) = setup();
        assert!(run_update(&mut view, " ", ContactArgs::default()).is_err());
    }
}
