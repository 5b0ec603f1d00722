//! # Pagination
//!
//! Pure page arithmetic for record tables. Every screen holds a [`Pager`] with
//! the chosen [`PageSize`] and the 1-based current page; the visible slice and
//! navigation state are derived on demand through [`Pager::view`], never stored.
//!
//! Page numbers are 1-based. A list with no items has zero pages, in which case
//! both navigation directions are disabled.

use crate::error::{DeskError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Range, RangeInclusive};
use std::str::FromStr;

/// The page sizes a user may choose from, in display order.
pub const PAGE_SIZE_OPTIONS: [usize; 2] = [5, 10];

/// A page size that is one of [`PAGE_SIZE_OPTIONS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageSize(usize);

impl PageSize {
    pub fn new(size: usize) -> Result<Self> {
        if PAGE_SIZE_OPTIONS.contains(&size) {
            Ok(Self(size))
        } else {
            Err(DeskError::Api(format!(
                "Invalid page size {}: choose one of {}",
                size,
                options_list()
            )))
        }
    }

    /// Closest allowed size; ties go to the smaller option.
    pub fn nearest(size: usize) -> Self {
        let mut best = PAGE_SIZE_OPTIONS[0];
        for option in PAGE_SIZE_OPTIONS {
            if option.abs_diff(size) < best.abs_diff(size) {
                best = option;
            }
        }
        Self(best)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(PAGE_SIZE_OPTIONS[0])
    }
}

impl TryFrom<usize> for PageSize {
    type Error = DeskError;

    fn try_from(value: usize) -> Result<Self> {
        Self::new(value)
    }
}

impl FromStr for PageSize {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self> {
        let size = s
            .trim()
            .parse::<usize>()
            .map_err(|_| DeskError::Api(format!("Invalid page size: {}", s)))?;
        Self::new(size)
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> usize {
        size.0
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn options_list() -> String {
    PAGE_SIZE_OPTIONS
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Number of pages needed to show `total_items`. Zero items means zero pages.
pub fn page_count(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

/// Index range of `current_page` within a list of `total_items`.
///
/// Pages past the end (and page 0) yield an empty range.
pub fn visible_range(total_items: usize, page_size: usize, current_page: usize) -> Range<usize> {
    if current_page == 0 || current_page > page_count(total_items, page_size) {
        return 0..0;
    }
    let start = (current_page - 1) * page_size;
    let end = (start + page_size).min(total_items);
    start..end
}

pub fn visible_slice<T>(items: &[T], page_size: usize, current_page: usize) -> &[T] {
    &items[visible_range(items.len(), page_size, current_page)]
}

/// Derived state for rendering one page of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub page_count: usize,
    pub current_page: usize,
    pub page_size: usize,
    pub visible: Range<usize>,
    pub previous_disabled: bool,
    pub next_disabled: bool,
}

impl PageView {
    /// Page numbers to show in the navigation bar.
    pub fn page_numbers(&self) -> RangeInclusive<usize> {
        1..=self.page_count
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }
}

/// Page size and current page for a single table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page_size: PageSize,
    current_page: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}

impl Pager {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            page_size,
            current_page: 1,
        }
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Switching sizes always lands back on the first page.
    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.current_page = 1;
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Moves to `page`, clamped into `[1, max(1, page_count)]`.
    pub fn go_to(&mut self, page: usize, total_items: usize) {
        let last = self.page_count(total_items).max(1);
        self.current_page = page.clamp(1, last);
    }

    pub fn next(&mut self, total_items: usize) {
        self.go_to(self.current_page + 1, total_items);
    }

    pub fn previous(&mut self, total_items: usize) {
        self.go_to(self.current_page.saturating_sub(1), total_items);
    }

    pub fn page_count(&self, total_items: usize) -> usize {
        page_count(total_items, self.page_size.get())
    }

    pub fn view(&self, total_items: usize) -> PageView {
        let page_count = self.page_count(total_items);
        PageView {
            page_count,
            current_page: self.current_page,
            page_size: self.page_size.get(),
            visible: visible_range(total_items, self.page_size.get(), self.current_page),
            previous_disabled: self.current_page == 1,
            next_disabled: page_count == 0 || self.current_page == page_count,
        }
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        visible_slice(items, self.page_size.get(), self.current_page)
    }
}
