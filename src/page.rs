use std::num::NonZeroUsize;

/// One page of a longer listing
#[derive(Debug, PartialEq, Eq)]
pub struct Page<'a, T> {
    items: &'a [T],
    number: usize,
    total_pages: usize,
}

impl<'a, T> Page<'a, T> {
    /// The items on this page
    pub fn items(&self) -> &'a [T] {
        self.items
    }

    /// The 1-based page number
    pub fn number(&self) -> usize {
        self.number
    }

    /// The number of pages, at least one even for an empty listing
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }
}

/// Slices out the 1-based `page` of `items`
///
/// Pages outside of `1..=total_pages` are empty.
pub fn paginate<T>(items: &[T], page: usize, page_size: NonZeroUsize) -> Page<'_, T> {
    let page_size = page_size.get();
    let total_pages = ((items.len() + page_size - 1) / page_size).max(1);

    let start = page.saturating_sub(1).saturating_mul(page_size);
    let items: &[T] = match page {
        0 => &[],
        _ => items.get(start..).map_or(&[][..], |rest| &rest[..rest.len().min(page_size)]),
    };

    Page {
        items,
        number: page,
        total_pages,
    }
}
