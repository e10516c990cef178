//! The pure filter → sort → paginate pipeline behind the contact list.

use std::cmp::Ordering;

use crate::models::{Contact, ContactField};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Header indicator for the active sort column
    pub fn arrow(&self) -> &'static str {
        match self {
            Self::Asc => "↑",
            Self::Desc => "↓",
        }
    }
}

/// Rows per page. Only these choices are offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    #[default]
    Five,
    Ten,
    TwentyFive,
}

impl PageSize {
    pub const ALL: [PageSize; 3] = [PageSize::Five, PageSize::Ten, PageSize::TwentyFive];

    pub fn rows(self) -> usize {
        match self {
            Self::Five => 5,
            Self::Ten => 10,
            Self::TwentyFive => 25,
        }
    }

    pub fn from_rows(rows: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.rows() == rows)
    }

    pub fn parse(s: &str) -> Option<Self> {
        s.trim().parse::<usize>().ok().and_then(Self::from_rows)
    }

    /// Next choice, wrapping back to the smallest.
    pub fn next(self) -> Self {
        match self {
            Self::Five => Self::Ten,
            Self::Ten => Self::TwentyFive,
            Self::TwentyFive => Self::Five,
        }
    }
}

/// Case-insensitive substring filter. `field: None` searches every field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Filter {
    pub field: Option<ContactField>,
    pub query: String,
}

impl Filter {
    pub fn new(field: Option<ContactField>, query: impl Into<String>) -> Self {
        Self {
            field,
            query: query.into(),
        }
    }

    /// An empty query keeps every record.
    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
    }

    pub fn matches(&self, contact: &Contact) -> bool {
        if !self.is_active() {
            return true;
        }
        let needle = self.query.to_lowercase();
        let hit = |field: ContactField| contact.get(field).to_lowercase().contains(&needle);
        match self.field {
            Some(field) => hit(field),
            None => ContactField::ALL.into_iter().any(hit),
        }
    }
}

/// Everything the pipeline reads besides the collection itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    pub sort_field: ContactField,
    pub sort_order: SortOrder,
    pub filter: Filter,
    pub page: usize,
    pub page_size: PageSize,
}

/// Why a derived page has no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// The collection itself is empty and nothing is filtered.
    NoContacts,
    /// Records exist (or a filter is active) but none match.
    NoResults,
}

impl EmptyState {
    pub fn message(&self) -> &'static str {
        match self {
            Self::NoContacts => "No contacts yet",
            Self::NoResults => "No results",
        }
    }
}

/// Rows to render plus the pagination facts needed to draw them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derived<'a> {
    pub rows: Vec<&'a Contact>,
    /// Effective page index, clamped into the available range.
    pub page: usize,
    pub page_count: usize,
    /// Records left after filtering, across all pages.
    pub matched: usize,
    pub page_size: PageSize,
    pub empty: Option<EmptyState>,
}

impl Derived<'_> {
    /// Position of the first row within the filtered set.
    pub fn offset(&self) -> usize {
        self.page * self.page_size.rows()
    }

    /// e.g. `6–10 of 12`, or `0–0 of 0` when nothing matched.
    pub fn range_label(&self) -> String {
        if self.matched == 0 {
            return "0–0 of 0".to_string();
        }
        let from = self.offset() + 1;
        let to = (self.offset() + self.page_size.rows()).min(self.matched);
        format!("{}–{} of {}", from, to, self.matched)
    }

    pub fn is_last_page(&self) -> bool {
        self.page + 1 >= self.page_count
    }
}

/// Three-way comparison of one field. Equal values stay equal.
pub fn compare(a: &Contact, b: &Contact, field: ContactField) -> Ordering {
    a.get(field).cmp(b.get(field))
}

pub fn page_count(matched: usize, size: PageSize) -> usize {
    matched.div_ceil(size.rows())
}

/// Last valid page index for `matched` rows, or 0 when there are none.
pub fn clamp_page(page: usize, matched: usize, size: PageSize) -> usize {
    match page_count(matched, size) {
        0 => 0,
        count => page.min(count - 1),
    }
}

/// Filter then stable-sort, without pagination.
pub fn filter_sort<'a>(contacts: &'a [Contact], state: &ViewState) -> Vec<&'a Contact> {
    let mut rows: Vec<&Contact> = contacts
        .iter()
        .filter(|c| state.filter.matches(c))
        .collect();

    let field = state.sort_field;
    match state.sort_order {
        SortOrder::Asc => rows.sort_by(|a, b| compare(a, b, field)),
        SortOrder::Desc => rows.sort_by(|a, b| compare(a, b, field).reverse()),
    }
    rows
}

pub fn derive<'a>(contacts: &'a [Contact], state: &ViewState) -> Derived<'a> {
    let sorted = filter_sort(contacts, state);
    let matched = sorted.len();
    let size = state.page_size;
    let page = clamp_page(state.page, matched, size);

    let rows: Vec<&Contact> = sorted
        .into_iter()
        .skip(page * size.rows())
        .take(size.rows())
        .collect();

    let empty = if matched > 0 {
        None
    } else if contacts.is_empty() && !state.filter.is_active() {
        Some(EmptyState::NoContacts)
    } else {
        Some(EmptyState::NoResults)
    };

    Derived {
        rows,
        page,
        page_count: page_count(matched, size),
        matched,
        page_size: size,
        empty,
    }
}
