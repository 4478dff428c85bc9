//! Pagination math for the product listing.
//!
//! The listing is windowed in fixed pages of [`PAGE_SIZE`] items. Out-of-range
//! page numbers are clamped rather than rejected: page 0 behaves as page 1,
//! and anything past the last page behaves as the last page. `prev_page` and
//! `next_page` clamp at the boundaries too: there is no past-the-end
//! sentinel and no wrap-around.

/// Number of products per listing page.
pub const PAGE_SIZE: u64 = 12;

/// Pagination metadata returned alongside a listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u64,
    pub prev_page: u64,
    pub next_page: u64,
    pub total_pages: u64,
}

impl PageWindow {
    /// Compute the window for a requested page given the total row count.
    ///
    /// `total` must be greater than zero; the caller handles the empty case
    /// (an empty catalog is a not-found condition, not an empty page 1).
    pub fn for_page(requested: u64, total: u64) -> Self {
        let total_pages = total_pages(total);
        let page = clamp_page(requested, total_pages);

        let prev_page = if page == 1 { 1 } else { page - 1 };
        let next_page = if page == total_pages { page } else { page + 1 };

        Self {
            page,
            prev_page,
            next_page,
            total_pages,
        }
    }

    /// Row offset of this page's first item.
    pub fn offset(&self) -> u64 {
        PAGE_SIZE * (self.page - 1)
    }
}

/// Number of pages needed to hold `total` rows: `ceil(total / PAGE_SIZE)`.
pub fn total_pages(total: u64) -> u64 {
    total.div_ceil(PAGE_SIZE)
}

/// Clamp a requested page number into `1..=total_pages`.
pub fn clamp_page(requested: u64, total_pages: u64) -> u64 {
    if requested == 0 {
        1
    } else if requested > total_pages {
        total_pages
    } else {
        requested
    }
}
