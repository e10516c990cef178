use serde::{Deserialize, Serialize};
use std::fmt;

/// One person's contact details as stored by the remote API.
///
/// `id` is assigned by the store and absent until the record is first
/// persisted. Optional text fields decode to empty strings when missing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub job_title: String,
}

impl Contact {
    pub fn new() -> Self {
        Self::default()
    }

    /// A record without an identifier has never been persisted.
    pub fn is_saved(&self) -> bool {
        self.id.is_some()
    }

    /// Copy of this record with the identifier stripped, as sent on create.
    pub fn without_id(&self) -> Self {
        Self {
            id: None,
            ..self.clone()
        }
    }

    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::FirstName => &self.first_name,
            ContactField::LastName => &self.last_name,
            ContactField::Email => &self.email,
            ContactField::PhoneNumber => &self.phone_number,
            ContactField::Company => &self.company,
            ContactField::JobTitle => &self.job_title,
        }
    }

    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        let slot = match field {
            ContactField::FirstName => &mut self.first_name,
            ContactField::LastName => &mut self.last_name,
            ContactField::Email => &mut self.email,
            ContactField::PhoneNumber => &mut self.phone_number,
            ContactField::Company => &mut self.company,
            ContactField::JobTitle => &mut self.job_title,
        };
        *slot = value.into();
    }

    /// "First Last", falling back to whichever part is present.
    pub fn display_name(&self) -> String {
        let first = self.first_name.trim();
        let last = self.last_name.trim();
        match (first.is_empty(), last.is_empty()) {
            (false, false) => format!("{} {}", first, last),
            (false, true) => first.to_string(),
            (true, false) => last.to_string(),
            (true, true) => "(unnamed)".to_string(),
        }
    }

    /// Comparable fields only; the identifier is ignored.
    pub fn same_details(&self, other: &Contact) -> bool {
        ContactField::ALL
            .iter()
            .all(|&f| self.get(f) == other.get(f))
    }
}

/// The editable, sortable and filterable fields of a [`Contact`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum ContactField {
    #[default]
    FirstName,
    LastName,
    Email,
    PhoneNumber,
    Company,
    JobTitle,
}

impl ContactField {
    /// Column order of the list and prompt order of the form.
    pub const ALL: [ContactField; 6] = [
        ContactField::FirstName,
        ContactField::LastName,
        ContactField::Email,
        ContactField::PhoneNumber,
        ContactField::Company,
        ContactField::JobTitle,
    ];

    /// Column heading
    pub fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Email => "Email",
            Self::PhoneNumber => "Phone",
            Self::Company => "Company",
            Self::JobTitle => "Job Title",
        }
    }

    /// JSON key on the wire
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::PhoneNumber => "phoneNumber",
            Self::Company => "company",
            Self::JobTitle => "jobTitle",
        }
    }

    pub fn is_required(self) -> bool {
        matches!(
            self,
            Self::FirstName | Self::LastName | Self::Email | Self::PhoneNumber
        )
    }

    /// Accepts wire keys, snake_case keys and short aliases, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "firstname" | "first_name" | "first" => Some(Self::FirstName),
            "lastname" | "last_name" | "last" => Some(Self::LastName),
            "email" => Some(Self::Email),
            "phonenumber" | "phone_number" | "phone" => Some(Self::PhoneNumber),
            "company" => Some(Self::Company),
            "jobtitle" | "job_title" | "title" => Some(Self::JobTitle),
            _ => None,
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
