use anyhow::{anyhow, Result};
use std::io::{self, IsTerminal};

use crate::cli::form::{apply_args, run_form, submit_form};
use crate::cli::ContactArgs;
use crate::form::ContactForm;
use crate::view::ListView;

/// Execute the add command. With no field flags the form is run
/// interactively.
pub fn run_add(view: &mut ListView, args: ContactArgs) -> Result<()> {
    if args.is_empty() {
        if !io::stdin().is_terminal() {
            return Err(anyhow!(
                "No contact details given. Use -f, -l, -e and -p, or run in a terminal to be prompted."
            ));
        }
        run_form(view, None)?;
        return Ok(());
    }

    let mut form = ContactForm::new();
    form.open_create();
    apply_args(&mut form, &args);

    let created = submit_form(view, &mut form)?;
    println!("\nCreated: {}", created.display_name());
    if let Some(id) = created.id.as_deref() {
        println!("  id {}", id);
    }
    Ok(())
}
