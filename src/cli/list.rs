use anyhow::{anyhow, Result};
use crossterm::{
    event::KeyCode,
    style::{Attribute, SetAttribute},
    ExecutableCommand,
};
use std::io::{self, IsTerminal};

use crate::cli::delete::delete_with_confirm;
use crate::cli::form::run_form;
use crate::cli::ui::{
    clear_screen, read_key, select, term_size, text_input, truncate, warning, StatusBar,
};
use crate::cli::ListArgs;
use crate::models::{Contact, ContactField};
use crate::view::{Derived, EmptyState, ListView, PageSize, SortOrder, ViewState};

/// Apply command-line list options to the view state.
fn apply_list_args(view: &mut ListView, args: &ListArgs) -> Result<()> {
    let sort_field = match args.sort.as_deref() {
        Some(raw) => ContactField::parse(raw).unwrap_or_else(|| {
            warning(&format!("unknown sort column \"{}\", sorting by first name", raw));
            ContactField::FirstName
        }),
        None => ContactField::FirstName,
    };
    let sort_order = SortOrder::parse(&args.order)
        .ok_or_else(|| anyhow!("Order must be asc or desc, got \"{}\".", args.order))?;
    view.sort_by(sort_field, sort_order);

    let field = match args.field.as_deref() {
        Some(raw) => Some(
            ContactField::parse(raw).ok_or_else(|| anyhow!("Unknown field \"{}\".", raw))?,
        ),
        None => None,
    };
    view.set_filter(field, args.query.clone().unwrap_or_default());

    if let Some(rows) = args.limit {
        let size = PageSize::from_rows(rows)
            .ok_or_else(|| anyhow!("Limit must be 5, 10 or 25, got {}.", rows))?;
        view.set_page_size(size);
    }

    // Pages are 1-based on the command line
    view.set_page(args.page.saturating_sub(1));
    Ok(())
}

/// Execute the list command
pub fn run_list(view: &mut ListView, args: ListArgs) -> Result<()> {
    apply_list_args(view, &args)?;
    view.load()?;

    let derived = view.derive();
    if let Some(empty) = derived.empty {
        println!("{}.", empty.message());
        return Ok(());
    }

    let layout = ColumnLayout::for_width(term_size().0);
    print_table_header(&layout, view.state());

    if args.all {
        let rows = crate::view::filter_sort(view.contacts(), view.state());
        for row in &rows {
            print_contact_row(&layout, row, false);
        }
        println!("\n{} contacts", rows.len());
    } else {
        for row in &derived.rows {
            print_contact_row(&layout, row, false);
        }
        let state = view.state();
        println!(
            "\n{}  page {}/{}  sorted by {} {}",
            derived.range_label(),
            derived.page + 1,
            derived.page_count,
            state.sort_field.label().to_lowercase(),
            state.sort_order.as_str()
        );
    }

    Ok(())
}

/// Interactive list. Falls back to a plain listing when not on a terminal.
pub fn run_browse(view: &mut ListView) -> Result<()> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        return run_list(view, ListArgs { all: true, ..Default::default() });
    }

    clear_screen()?;
    let mut notice = initial_load(view);

    let mut cursor: usize = 0;

    loop {
        clear_screen()?;

        let (selected, row_count) = {
            let derived = view.derive();
            cursor = cursor.min(derived.rows.len().saturating_sub(1));
            render_page(view, &derived, cursor);
            (derived.rows.get(cursor).cloned().cloned(), derived.rows.len())
        };

        if let Some(msg) = notice.take() {
            println!("\n{}", msg);
        }

        let code = read_key()?;
        match code {
            KeyCode::Down | KeyCode::Char('j') => {
                if cursor + 1 < row_count {
                    cursor += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                cursor = cursor.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::PageDown | KeyCode::Char('l') => {
                view.next_page();
                cursor = 0;
            }
            KeyCode::Left | KeyCode::PageUp | KeyCode::Char('h') => {
                view.prev_page();
                cursor = 0;
            }
            KeyCode::Char(c @ '1'..='6') => {
                let index = c as usize - '1' as usize;
                view.set_sort(ContactField::ALL[index]);
            }
            KeyCode::Char('/') => {
                prompt_filter(view)?;
                cursor = 0;
            }
            KeyCode::Char('n') => {
                let next = view.state().page_size.next();
                view.set_page_size(next);
                cursor = 0;
            }
            KeyCode::Char('a') => {
                clear_screen()?;
                run_form(view, None)?;
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(contact) = selected {
                    clear_screen()?;
                    run_form(view, Some(&contact))?;
                }
            }
            KeyCode::Char('d') => {
                if let Some(contact) = selected {
                    println!();
                    if let Err(e) = delete_with_confirm(view, &contact, false) {
                        notice = Some(format!("Could not delete contact: {}", e));
                    }
                }
            }
            KeyCode::Char('r') => {
                if let Err(e) = view.load() {
                    notice = Some(format!("Could not load contacts: {}", e));
                }
            }
            KeyCode::Esc | KeyCode::Char('q') => break,
            _ => {}
        }

        if let Some(e) = view.take_resync_error() {
            notice = Some(format!("The list could not be refreshed: {}", e));
        }
    }

    clear_screen()?;
    Ok(())
}

/// Fetch the collection if it has never been loaded.
/// Returns the failure notice to show, if any.
fn initial_load(view: &mut ListView) -> Option<String> {
    if !view.is_loading() {
        return None;
    }
    println!("Loading…");
    view.load()
        .err()
        .map(|e| format!("Could not load contacts: {}", e))
}

fn render_page(view: &ListView, derived: &Derived<'_>, cursor: usize) {
    let state = view.state();
    let filter = &state.filter;

    match (filter.is_active(), filter.field) {
        (true, Some(field)) => println!("Contacts  {} contains \"{}\"", field.label(), filter.query),
        (true, None) => println!("Contacts  \"{}\"", filter.query),
        (false, _) => println!("Contacts"),
    }
    println!("{}\n", view.api().describe());

    match derived.empty {
        Some(EmptyState::NoContacts) => println!("No contacts yet. Press [a] to add one."),
        Some(EmptyState::NoResults) => println!("No results. Press [/] to change the filter."),
        None => {
            let layout = ColumnLayout::for_width(term_size().0);
            print_table_header(&layout, state);
            for (i, row) in derived.rows.iter().enumerate() {
                print_contact_row(&layout, row, i == cursor);
            }
        }
    }

    println!(
        "\n{}  rows per page: {}",
        derived.range_label(),
        derived.page_size.rows()
    );

    let bar = StatusBar::new()
        .counter(derived.page + 1, derived.page_count.max(1))
        .action("↑↓", "")
        .action("←→", " page")
        .action("1-6", " sort")
        .action("/", " filter")
        .action("n", " rows")
        .action("a", "dd")
        .action("e", "dit")
        .action("d", "elete")
        .action("r", "eload")
        .action("q", "uit");
    println!("{}", bar.render());
}

/// Ask for a filter column and query. Escape keeps the current filter.
fn prompt_filter(view: &mut ListView) -> Result<()> {
    let mut options = vec!["Any field".to_string()];
    options.extend(ContactField::ALL.iter().map(|f| f.label().to_string()));

    println!();
    let Some(choice) = select("filter by:", &options)? else {
        return Ok(());
    };
    let field = choice.checked_sub(1).map(|i| ContactField::ALL[i]);

    let current = view.state().filter.query.clone();
    if let Some(query) = text_input("search: ", Some(current.as_str()))? {
        view.set_filter(field, query.trim());
    }
    Ok(())
}

/// Column widths for the current terminal width
struct ColumnLayout {
    columns: Vec<(ContactField, usize)>,
}

impl ColumnLayout {
    fn for_width(width: usize) -> Self {
        let columns = if width >= 110 {
            vec![
                (ContactField::FirstName, 14),
                (ContactField::LastName, 14),
                (ContactField::Email, 28),
                (ContactField::PhoneNumber, 16),
                (ContactField::Company, 16),
                (ContactField::JobTitle, 16),
            ]
        } else {
            // Compact display drops the optional columns
            let email = width.saturating_sub(12 + 12 + 14 + 6).clamp(12, 28);
            vec![
                (ContactField::FirstName, 12),
                (ContactField::LastName, 12),
                (ContactField::Email, email),
                (ContactField::PhoneNumber, 14),
            ]
        };
        Self { columns }
    }
}

fn header_cell(field: ContactField, state: &ViewState) -> String {
    let label = field.label().to_uppercase();
    if state.sort_field == field {
        format!("{} {}", label, state.sort_order.arrow())
    } else {
        label
    }
}

fn format_row(layout: &ColumnLayout, cell: impl Fn(ContactField) -> String) -> String {
    layout
        .columns
        .iter()
        .map(|&(field, width)| format!("{:<width$}", truncate(&cell(field), width), width = width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn print_table_header(layout: &ColumnLayout, state: &ViewState) {
    println!("{}", format_row(layout, |field| header_cell(field, state)));
}

fn print_contact_row(layout: &ColumnLayout, contact: &Contact, selected: bool) {
    let line = format_row(layout, |field| contact.get(field).to_string());

    if selected {
        let mut stdout = io::stdout();
        let _ = stdout.execute(SetAttribute(Attribute::Reverse));
        print!("{}", line);
        let _ = stdout.execute(SetAttribute(Attribute::Reset));
        println!();
    } else {
        println!("{}", line);
    }
}
