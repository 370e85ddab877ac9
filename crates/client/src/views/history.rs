//! History search and pagination.

use crate::models::HistoryEntry;

/// Entries whose query text or endpoint contains `term`, ignoring case.
/// A blank term keeps everything.
pub fn filter_history<'a>(entries: &'a [HistoryEntry], term: &str) -> Vec<&'a HistoryEntry> {
    let term = term.trim().to_lowercase();
    entries
        .iter()
        .filter(|entry| {
            term.is_empty()
                || entry.user_query.to_lowercase().contains(&term)
                || entry.endpoint().to_lowercase().contains(&term)
        })
        .collect()
}

/// One page of a list. Pages are 1-based.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<'a, T> Page<'a, T> {
    /// Slice out page `page` (1-based) of `items`.
    ///
    /// `total_pages` is `ceil(len / per_page)`. Pages outside `1..=total_pages`
    /// yield an empty slice. A `per_page` of zero is treated as one.
    pub fn of(items: &'a [T], page: usize, per_page: usize) -> Self {
        let per_page = per_page.max(1);
        let total_items = items.len();
        let total_pages = total_items.div_ceil(per_page);
        let slice = if page == 0 || page > total_pages {
            &items[0..0]
        } else {
            let start = (page - 1) * per_page;
            let end = (start + per_page).min(total_items);
            &items[start..end]
        };
        Self {
            items: slice,
            page,
            per_page,
            total_items,
            total_pages,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// `Showing x to y of z` label; empty pages report `0 to 0`.
    pub fn range_label(&self) -> String {
        if self.items.is_empty() {
            return format!("Showing 0 to 0 of {} entries", self.total_items);
        }
        let start = (self.page - 1) * self.per_page + 1;
        let end = start + self.items.len() - 1;
        format!("Showing {} to {} of {} entries", start, end, self.total_items)
    }
}
