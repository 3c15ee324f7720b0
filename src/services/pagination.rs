//! Client-side pagination
//!
//! The current page is always clamped to `[1, total_pages]`, where an empty
//! list still has one (empty) page.

use std::fmt;
use std::str::FromStr;

/// Page sizes offered for locally paginated tables
pub const PAGE_SIZES: [usize; 3] = [5, 10, 20];

/// Page sizes offered for server-paginated account transactions
pub const SERVER_PAGE_SIZES: [usize; 3] = [10, 20, 50];

/// A page size from a fixed menu of choices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize {
    value: usize,
    choices: &'static [usize],
}

impl PageSize {
    /// A local page size; anything off the menu becomes 10
    pub fn local(value: usize) -> Self {
        Self::pick(value, &PAGE_SIZES)
    }

    /// A server page size; anything off the menu becomes 10
    pub fn server(value: usize) -> Self {
        Self::pick(value, &SERVER_PAGE_SIZES)
    }

    fn pick(value: usize, choices: &'static [usize]) -> Self {
        let value = if choices.contains(&value) { value } else { 10 };
        Self { value, choices }
    }

    pub fn get(&self) -> usize {
        self.value
    }

    /// The next size on the menu, wrapping around
    pub fn cycle(self) -> Self {
        let index = self
            .choices
            .iter()
            .position(|&c| c == self.value)
            .unwrap_or(0);
        Self {
            value: self.choices[(index + 1) % self.choices.len()],
            choices: self.choices,
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::local(10)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: usize = s
            .trim()
            .parse()
            .map_err(|_| format!("Invalid page size: {}", s))?;
        if PAGE_SIZES.contains(&value) {
            Ok(Self::local(value))
        } else {
            Err(format!("Page size must be one of 5, 10 or 20 (got {})", value))
        }
    }
}

/// Number of pages for `total` rows; never less than one
pub fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total.div_ceil(page_size).max(1)
}

/// Paging state for one table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page: usize,
    size: PageSize,
    total: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}

impl Paginator {
    pub fn new(size: PageSize) -> Self {
        Self {
            page: 1,
            size,
            total: 0,
        }
    }

    /// Current page, 1-based
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> PageSize {
        self.size
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total, self.size.get())
    }

    /// Record a new row count and clamp the page into range
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.clamp();
    }

    /// Change the page size; always returns to page 1
    pub fn set_page_size(&mut self, size: PageSize) {
        self.size = size;
        self.page = 1;
    }

    /// Jump to a page, clamped into range
    pub fn go_to(&mut self, page: usize) {
        self.page = page;
        self.clamp();
    }

    pub fn next_page(&mut self) {
        self.go_to(self.page + 1);
    }

    pub fn prev_page(&mut self) {
        self.go_to(self.page.saturating_sub(1));
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    fn clamp(&mut self) {
        self.page = self.page.clamp(1, self.total_pages());
    }

    /// Index range of the current page within `0..total`
    pub fn range(&self) -> std::ops::Range<usize> {
        let start = ((self.page - 1) * self.size.get()).min(self.total);
        let end = (start + self.size.get()).min(self.total);
        start..end
    }

    /// Slice the current page out of `rows`, updating the total first
    pub fn page_slice<'r, T>(&mut self, rows: &'r [T]) -> &'r [T] {
        self.set_total(rows.len());
        &rows[self.range()]
    }

    /// "Page 2 of 3"
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(23, 5), 5);
    }

    #[test]
    fn test_clamp_when_rows_shrink() {
        let mut pager = Paginator::new(PageSize::local(10));
        pager.set_total(23);
        pager.go_to(3);
        assert_eq!(pager.page(), 3);

        pager.set_total(15);
        assert_eq!(pager.page(), 2);

        pager.set_total(0);
        assert_eq!(pager.page(), 1);
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut pager = Paginator::default();
        pager.set_total(50);
        pager.go_to(4);
        pager.set_page_size(PageSize::local(20));
        assert_eq!(pager.page(), 1);
        assert_eq!(pager.total_pages(), 3);
    }

    #[test]
    fn test_page_slice() {
        let rows: Vec<u32> = (1..=23).collect();
        let mut pager = Paginator::new(PageSize::local(10));
        pager.set_total(rows.len());
        pager.go_to(3);
        assert_eq!(pager.page_slice(&rows), &[21, 22, 23]);

        pager.next_page();
        assert_eq!(pager.page(), 3);
        pager.prev_page();
        pager.prev_page();
        pager.prev_page();
        assert_eq!(pager.page(), 1);
        assert_eq!(pager.page_slice(&rows).len(), 10);
    }

    #[test]
    fn test_page_size_menu() {
        assert_eq!(PageSize::local(7).get(), 10);
        assert_eq!(PageSize::local(20).cycle().get(), 5);
        assert_eq!(PageSize::server(50).cycle().get(), 10);
        assert_eq!(PageSize::server(20).get(), 20);
        assert!("7".parse::<PageSize>().is_err());
        assert_eq!("5".parse::<PageSize>().unwrap().get(), 5);
    }

    #[test]
    fn test_label() {
        let mut pager = Paginator::default();
        pager.set_total(25);
        pager.next_page();
        assert_eq!(pager.label(), "Page 2 of 3");
    }
}
