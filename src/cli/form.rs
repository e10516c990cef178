//! Terminal driver for the contact form.
//!
//! Each field is prompted in turn and validated as soon as it is answered,
//! so a bad value is asked for again before moving on.

use anyhow::{anyhow, Result};

use crate::cli::ui::{confirm, error, prompt_field, status, warning, FormResult};
use crate::cli::ContactArgs;
use crate::error::RemoteError;
use crate::form::{ContactForm, FormMode, SubmitOutcome};
use crate::models::{Contact, ContactField};
use crate::view::ListView;

/// Send a validated draft to the store through the list controller.
pub fn submit_to_view(view: &mut ListView, mode: &FormMode, draft: &Contact) -> Result<Contact, RemoteError> {
    match mode {
        FormMode::Create => view.create(draft),
        FormMode::Edit(id) => view.update(id, draft),
    }
}

fn done_message(mode: &FormMode) -> &'static str {
    match mode {
        FormMode::Create => "Created.",
        FormMode::Edit(_) => "Saved.",
    }
}

/// Run the interactive form, creating when `existing` is `None`.
///
/// Returns true once the contact has been saved. Cancelling, or giving up
/// after a failed save, returns false.
pub fn run_form(view: &mut ListView, existing: Option<&Contact>) -> Result<bool> {
    let mut form = ContactForm::new();
    match existing {
        Some(contact) => form.open_edit(contact)?,
        None => form.open_create(),
    }
    let mode = form
        .mode()
        .cloned()
        .ok_or_else(|| anyhow!("form did not open"))?;

    println!("{}\n", mode.title());

    loop {
        if !prompt_fields(&mut form)? {
            form.cancel();
            status("Cancelled.");
            return Ok(false);
        }

        status(&format!("{}…", mode.submit_label()));
        match form.submit(|mode, draft| submit_to_view(view, mode, draft).map(|_| ())) {
            SubmitOutcome::Submitted => {
                status(done_message(&mode));
                return Ok(true);
            }
            SubmitOutcome::Invalid(errors) => {
                for err in errors {
                    warning(&err.to_string());
                }
            }
            SubmitOutcome::Failed(e) => {
                error(&format!("Could not save contact: {}", e));
                if !confirm("Try again?")? {
                    form.cancel();
                    return Ok(false);
                }
            }
            SubmitOutcome::NotOpen => return Ok(false),
        }
        println!();
    }
}

/// Prompt every field, re-asking while a field is invalid.
/// Returns false if the user cancelled.
fn prompt_fields(form: &mut ContactForm) -> Result<bool> {
    for field in ContactField::ALL {
        loop {
            let current = form
                .draft()
                .map(|d| d.get(field).to_string())
                .unwrap_or_default();

            let label = field_prompt(field);
            match prompt_field(&label, Some(current.as_str()))? {
                FormResult::Value(value) => {
                    form.set_field(field, value);
                    form.blur(field);
                }
                FormResult::Cancelled => return Ok(false),
            }

            match form.error(field) {
                Some(message) => warning(message),
                None => break,
            }
        }
    }
    Ok(true)
}

fn field_prompt(field: ContactField) -> String {
    let label = field.label().to_lowercase();
    if field.is_required() {
        label
    } else {
        format!("{} (optional)", label)
    }
}

/// Copy command-line values into an open form, validating each one.
pub fn apply_args(form: &mut ContactForm, args: &ContactArgs) {
    for (field, value) in args.values() {
        form.set_field(field, value.trim());
        form.blur(field);
    }
}

/// Submit without prompting. Validation problems become one error listing
/// every invalid field.
pub fn submit_form(view: &mut ListView, form: &mut ContactForm) -> Result<Contact> {
    let mut saved = None;
    let outcome = form.submit(|mode, draft| {
        saved = Some(submit_to_view(view, mode, draft)?);
        Ok::<(), RemoteError>(())
    });

    match outcome {
        SubmitOutcome::Submitted => {
            warn_if_stale(view);
            saved.ok_or_else(|| anyhow!("nothing was submitted"))
        }
        SubmitOutcome::Invalid(errors) => {
            let lines: Vec<String> = errors.iter().map(|e| format!("  {}", e)).collect();
            Err(anyhow!("Invalid contact:\n{}", lines.join("\n")))
        }
        SubmitOutcome::Failed(e) => Err(e.into()),
        SubmitOutcome::NotOpen => Err(anyhow!("no contact form is open")),
    }
}

/// Warn when a saved change could not be followed by a fresh fetch.
pub fn warn_if_stale(view: &mut ListView) {
    if let Some(e) = view.take_resync_error() {
        warning(&format!("saved, but the contact list could not be refreshed: {}", e));
    }
}
