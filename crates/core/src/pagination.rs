//! Page windows over already filtered collections.

use serde::Serialize;

/// Default number of rows per table page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Largest page size the tables offer.
pub const MAX_PAGE_SIZE: usize = 100;

/// Clamp a requested page size into `1..=MAX_PAGE_SIZE`, defaulting when absent.
pub fn clamp_page_size(size: Option<usize>) -> usize {
    size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}

/// One page of a collection plus the totals the pager shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Zero-based page index actually returned (clamped to the last page).
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// Slice `items` into the requested zero-based page.
///
/// A page past the end returns the last page; an empty collection returns
/// one empty page.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: Option<usize>) -> Page<T> {
    let page_size = clamp_page_size(page_size);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size).max(1);
    let page = page.min(total_pages - 1);
    let start = page * page_size;
    let end = (start + page_size).min(total_items);

    Page {
        items: items[start.min(total_items)..end].to_vec(),
        page,
        page_size,
        total_items,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_and_last_page() {
        let items: Vec<u32> = (1..=25).collect();
        let first = paginate(&items, 0, Some(10));
        assert_eq!(first.items, (1..=10).collect::<Vec<_>>());
        assert_eq!(first.total_pages, 3);

        let last = paginate(&items, 2, Some(10));
        assert_eq!(last.items, (21..=25).collect::<Vec<_>>());
    }

    #[test]
    fn page_past_end_clamps_to_last() {
        let items: Vec<u32> = (1..=5).collect();
        let page = paginate(&items, 7, Some(2));
        assert_eq!(page.page, 2);
        assert_eq!(page.items, vec![5]);
    }

    #[test]
    fn empty_collection_has_one_empty_page() {
        let page = paginate::<u32>(&[], 3, None);
        assert!(page.items.is_empty());
        assert_eq!(page.page, 0);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn page_size_clamped() {
        assert_eq!(clamp_page_size(Some(0)), 1);
        assert_eq!(clamp_page_size(Some(1000)), MAX_PAGE_SIZE);
        assert_eq!(clamp_page_size(None), DEFAULT_PAGE_SIZE);
    }
}
