use clap::{Args, Parser, Subcommand};

use crate::models::ContactField;

pub mod add;
pub mod delete;
pub mod form;
pub mod list;
pub mod ui;
pub mod update;

pub use add::run_add;
pub use delete::run_delete;
pub use form::run_form;
pub use list::{run_browse, run_list};
pub use update::run_update;

#[derive(Parser)]
#[command(name = "contactview")]
#[command(about = "Manage contacts stored behind a remote contacts API")]
#[command(version)]
pub struct Cli {
    /// Base URL of the contacts API (overrides CONTACTS_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List contacts with sorting, filtering and pagination
    List(ListArgs),
    /// Add a new contact
    Add(ContactArgs),
    /// Edit an existing contact
    #[command(alias = "update")]
    Edit(EditArgs),
    /// Delete a contact
    Delete(DeleteArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Page number, starting at 1
    #[arg(short, long, default_value = "1")]
    pub page: usize,
    /// Rows per page: 5, 10 or 25
    #[arg(short, long)]
    pub limit: Option<usize>,
    /// Column to sort by (firstName, lastName, email, phone, company, title)
    #[arg(short, long)]
    pub sort: Option<String>,
    #[arg(short, long, default_value = "asc")]
    pub order: String,
    /// Restrict the query to one column; searches every column if omitted
    #[arg(short, long)]
    pub field: Option<String>,
    /// Case-insensitive text to look for
    #[arg(short, long)]
    pub query: Option<String>,
    /// Print every matching contact instead of one page
    #[arg(short, long)]
    pub all: bool,
}

impl Default for ListArgs {
    fn default() -> Self {
        Self {
            page: 1,
            limit: None,
            sort: None,
            order: "asc".to_string(),
            field: None,
            query: None,
            all: false,
        }
    }
}

/// Field values given on the command line. Any omitted field is left as is.
#[derive(Args, Debug, Clone, Default)]
pub struct ContactArgs {
    #[arg(short, long)]
    pub first: Option<String>,
    #[arg(short, long)]
    pub last: Option<String>,
    #[arg(short, long)]
    pub email: Option<String>,
    #[arg(short, long)]
    pub phone: Option<String>,
    #[arg(short, long)]
    pub company: Option<String>,
    /// Job title
    #[arg(short, long)]
    pub title: Option<String>,
}

impl ContactArgs {
    pub fn is_empty(&self) -> bool {
        self.values().is_empty()
    }

    /// Provided values paired with the field they set, in form order.
    pub fn values(&self) -> Vec<(ContactField, &str)> {
        [
            (ContactField::FirstName, &self.first),
            (ContactField::LastName, &self.last),
            (ContactField::Email, &self.email),
            (ContactField::PhoneNumber, &self.phone),
            (ContactField::Company, &self.company),
            (ContactField::JobTitle, &self.title),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
        .collect()
    }
}

#[derive(Args, Debug, Clone)]
pub struct EditArgs {
    /// Contact id
    pub id: String,
    #[command(flatten)]
    pub fields: ContactArgs,
}

#[derive(Args, Debug, Clone)]
pub struct DeleteArgs {
    /// Contact id
    pub id: String,
    /// Skip the confirmation prompt
    #[arg(long)]
    pub force: bool,
}
