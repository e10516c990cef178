//! Contact form state machine.
//!
//! A form is either closed or open on a draft. Validation errors live here
//! and never reach the list controller: a draft only leaves the form through
//! the submit callback, and only once every required field is valid.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{FormError, ValidationError};
use crate::models::{Contact, ContactField};

/// What a submitted draft will become.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    /// Edit of the persisted record with this id
    Edit(String),
}

impl FormMode {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Create => "Add New Contact",
            Self::Edit(_) => "Edit Contact",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            Self::Create => "Add Contact",
            Self::Edit(_) => "Save Changes",
        }
    }
}

/// Result of [`ContactForm::submit`].
#[derive(Debug)]
pub enum SubmitOutcome<E> {
    /// Callback succeeded; the form is closed again.
    Submitted,
    /// Required fields are invalid; the callback was not called.
    Invalid(Vec<ValidationError>),
    /// Callback failed; the form stays open with the draft intact.
    Failed(E),
    /// Nothing to submit.
    NotOpen,
}

#[derive(Debug, Clone)]
struct OpenForm {
    mode: FormMode,
    draft: Contact,
    touched: BTreeSet<ContactField>,
    errors: BTreeMap<ContactField, String>,
}

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    open: Option<OpenForm>,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open on an empty draft. Reopening discards any current draft.
    pub fn open_create(&mut self) {
        self.open = Some(OpenForm {
            mode: FormMode::Create,
            draft: Contact::new(),
            touched: BTreeSet::new(),
            errors: BTreeMap::new(),
        });
    }

    /// Open on a copy of a persisted record.
    pub fn open_edit(&mut self, contact: &Contact) -> Result<(), FormError> {
        let id = contact.id.clone().ok_or(FormError::Unsaved)?;
        self.open = Some(OpenForm {
            mode: FormMode::Edit(id),
            draft: contact.clone(),
            touched: BTreeSet::new(),
            errors: BTreeMap::new(),
        });
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn mode(&self) -> Option<&FormMode> {
        self.open.as_ref().map(|f| &f.mode)
    }

    pub fn draft(&self) -> Option<&Contact> {
        self.open.as_ref().map(|f| &f.draft)
    }

    /// Update a draft field. A touched field is revalidated immediately so a
    /// fixed value clears its error.
    pub fn set_field(&mut self, field: ContactField, value: impl Into<String>) {
        if let Some(form) = self.open.as_mut() {
            form.draft.set(field, value);
            if form.touched.contains(&field) {
                form.revalidate(field);
            }
        }
    }

    /// The field lost focus: mark it touched and validate it.
    pub fn blur(&mut self, field: ContactField) {
        if let Some(form) = self.open.as_mut() {
            form.touched.insert(field);
            form.revalidate(field);
        }
    }

    /// Visible error for a field. Untouched fields show none.
    pub fn error(&self, field: ContactField) -> Option<&str> {
        self.open
            .as_ref()
            .and_then(|f| f.errors.get(&field))
            .map(String::as_str)
    }

    pub fn errors(&self) -> Vec<ValidationError> {
        self.open
            .as_ref()
            .map(|f| {
                f.errors
                    .iter()
                    .map(|(field, message)| ValidationError::new(*field, message.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Validate the whole draft and, if valid, hand it to `on_submit`.
    ///
    /// On success the form closes and the draft is dropped. On failure of the
    /// callback the form stays open so the user can retry.
    pub fn submit<E, F>(&mut self, on_submit: F) -> SubmitOutcome<E>
    where
        F: FnOnce(&FormMode, &Contact) -> Result<(), E>,
    {
        let Some(form) = self.open.as_mut() else {
            return SubmitOutcome::NotOpen;
        };

        form.touched.extend(ContactField::ALL);
        if let Err(errors) = validate(&form.draft) {
            form.errors = errors
                .iter()
                .map(|e| (e.field, e.message.clone()))
                .collect();
            return SubmitOutcome::Invalid(errors);
        }
        form.errors.clear();

        match on_submit(&form.mode, &form.draft) {
            Ok(()) => {
                self.open = None;
                SubmitOutcome::Submitted
            }
            Err(e) => SubmitOutcome::Failed(e),
        }
    }

    /// Close without submitting.
    pub fn cancel(&mut self) {
        self.open = None;
    }
}

impl OpenForm {
    fn revalidate(&mut self, field: ContactField) {
        match validate_field(field, self.draft.get(field)) {
            Some(err) => {
                self.errors.insert(field, err.message);
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }
}

/// Check one field value. `None` means valid.
pub fn validate_field(field: ContactField, value: &str) -> Option<ValidationError> {
    let blank = value.trim().is_empty();
    let message = match field {
        ContactField::FirstName if blank => "First name is required",
        ContactField::LastName if blank => "Last name is required",
        ContactField::Email if blank => "Email is required",
        ContactField::Email if !is_valid_email(value) => "Invalid email",
        ContactField::PhoneNumber if blank => "Phone number is required",
        _ => return None,
    };
    Some(ValidationError::new(field, message))
}

/// Every problem with a draft, in field order.
pub fn validate(draft: &Contact) -> Result<(), Vec<ValidationError>> {
    let errors: Vec<ValidationError> = ContactField::ALL
        .into_iter()
        .filter_map(|field| validate_field(field, draft.get(field)))
        .collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Simplified address syntax: `local@domain.tld`, no whitespace, one `@`.
pub fn is_valid_email(email: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"))
        .is_match(email)
}
