//! The list-management pipeline: filter, sort, paginate.
//!
//! Every list surface in the service (admin tables, vocabulary, content
//! catalogues) derives its visible slice the same way: load the full
//! collection, filter it, optionally sort it, then cut one page out of it.
//! The derivation is pure; pagination state lives with the caller and is
//! never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Default number of items per page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Upper bound for client-supplied page sizes.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Sentinel value for categorical filters meaning "do not filter".
pub const FILTER_ALL: &str = "all";

/// One visible page of a derived list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total_items: usize,
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Maps the visible items while keeping the pagination envelope.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

/// Number of pages needed for `total_items` at `page_size` items per page.
///
/// An empty collection still has one (empty) page, so displays read
/// "page 1 of 1" rather than "1 of 0".
pub fn total_pages(total_items: usize, page_size: u32) -> u32 {
    let page_size = page_size.max(1) as usize;
    (total_items.div_ceil(page_size) as u32).max(1)
}

/// Case-insensitive substring match of `query` against one or more text
/// fields. An empty or whitespace-only query matches everything.
pub fn matches_search(query: &str, fields: &[&str]) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields.iter().any(|f| f.to_lowercase().contains(&needle))
}

/// Categorical filter match. `None` and the `"all"` sentinel match every
/// value; anything else must equal the item's field exactly.
pub fn matches_filter(selected: Option<&str>, value: &str) -> bool {
    match selected {
        None => true,
        Some(s) if s == FILTER_ALL || s.is_empty() => true,
        Some(s) => s == value,
    }
}

/// Sort orders shared by the list surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Newest,
    Oldest,
    Alphabetical,
}

impl SortOrder {
    /// Builds a comparator from a timestamp accessor and a label accessor.
    ///
    /// Alphabetical compares labels case-insensitively. All orders are used
    /// with a stable sort, so items comparing equal keep their input order.
    pub fn comparator<T, FT, FL>(self, timestamp: FT, label: FL) -> impl FnMut(&T, &T) -> Ordering
    where
        FT: Fn(&T) -> DateTime<Utc>,
        FL: Fn(&T) -> String,
    {
        move |a, b| match self {
            SortOrder::Newest => timestamp(b).cmp(&timestamp(a)),
            SortOrder::Oldest => timestamp(a).cmp(&timestamp(b)),
            SortOrder::Alphabetical => label(a).to_lowercase().cmp(&label(b).to_lowercase()),
        }
    }
}

/// The pipeline itself. Consumes the loaded collection and derives one page.
///
/// ```
/// use shared::listing::Listing;
///
/// let page = Listing::new(vec!["alpha", "beta", "gamma"])
///     .filter(|s| s.contains('a'))
///     .sort_by(|a, b| a.cmp(b))
///     .page(1, 2);
/// assert_eq!(page.items, vec!["alpha", "beta"]);
/// assert_eq!(page.total_pages, 2);
/// ```
#[derive(Debug)]
pub struct Listing<T> {
    items: Vec<T>,
}

impl<T> Listing<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    /// Keeps only items matching the predicate.
    pub fn filter<P>(mut self, mut predicate: P) -> Self
    where
        P: FnMut(&T) -> bool,
    {
        self.items.retain(|item| predicate(item));
        self
    }

    /// Stable sort; items comparing equal keep their input order.
    pub fn sort_by<C>(mut self, comparator: C) -> Self
    where
        C: FnMut(&T, &T) -> Ordering,
    {
        self.items.sort_by(comparator);
        self
    }

    /// Cuts one page out of the (filtered, sorted) collection.
    ///
    /// `page` is clamped into `[1, total_pages]`, so the visible slice is
    /// only empty when the collection itself is. `items.len()` never exceeds
    /// `page_size`.
    pub fn page(self, page: u32, page_size: u32) -> Page<T> {
        let page_size = page_size.max(1);
        let total_items = self.items.len();
        let total = total_pages(total_items, page_size);
        let page = page.clamp(1, total);
        let start = ((page - 1) * page_size) as usize;

        let items: Vec<T> = self
            .items
            .into_iter()
            .skip(start)
            .take(page_size as usize)
            .collect();

        Page {
            items,
            page,
            page_size,
            total_items,
            total_pages: total,
        }
    }
}

/// Reusable pagination state for a list surface.
///
/// Mutating the search query, any categorical filter, or the page size
/// resets the current page to 1. Forgetting that reset is how a list ends
/// up rendering an out-of-range empty page. Explicit page navigation clamps
/// at both boundaries instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState {
    search: String,
    filters: BTreeMap<String, String>,
    sort: Option<SortOrder>,
    page: u32,
    page_size: u32,
}

impl ListState {
    pub fn new(page_size: u32) -> Self {
        Self {
            search: String::new(),
            filters: BTreeMap::new(),
            sort: None,
            page: 1,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn filter(&self, field: &str) -> Option<&str> {
        self.filters.get(field).map(String::as_str)
    }

    pub fn sort(&self) -> Option<SortOrder> {
        self.sort
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Replaces the search query and resets to the first page.
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
        self.page = 1;
    }

    /// Sets a categorical filter and resets to the first page. Selecting the
    /// `"all"` sentinel (or an empty value) clears the filter for that field.
    pub fn set_filter(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        if value == FILTER_ALL || value.is_empty() {
            self.filters.remove(&field.into());
        } else {
            self.filters.insert(field.into(), value);
        }
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: Option<SortOrder>) {
        self.sort = sort;
    }

    /// Changes the page size and resets to the first page.
    pub fn set_page_size(&mut self, page_size: u32) {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self.page = 1;
    }

    /// Jumps to a page, clamped into `[1, total_pages]`.
    pub fn set_page(&mut self, page: u32, total_pages: u32) {
        self.page = page.clamp(1, total_pages.max(1));
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self, total_pages: u32) -> bool {
        self.page < total_pages
    }

    /// Advances one page if not already on the last one.
    pub fn next_page(&mut self, total_pages: u32) {
        if self.has_next(total_pages) {
            self.page += 1;
        }
    }

    /// Goes back one page if not already on the first one.
    pub fn prev_page(&mut self) {
        if self.has_prev() {
            self.page -= 1;
        }
    }
}

impl Default for ListState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn items(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn test_total_pages_exact_division() {
        assert_eq!(total_pages(20, 10), 2);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(21, 10), 3);
        assert_eq!(total_pages(1, 10), 1);
    }

    #[test]
    fn test_total_pages_empty_collection_is_one_page() {
        // "1 of 1", never "1 of 0"
        assert_eq!(total_pages(0, 10), 1);
    }

    #[test]
    fn test_total_pages_zero_page_size_treated_as_one() {
        assert_eq!(total_pages(5, 0), 5);
    }

    #[test]
    fn test_page_slice_bounds() {
        for n in 0..40 {
            for page in 1..6 {
                let result = Listing::new(items(n)).page(page, 10);
                assert!(result.items.len() <= 10);
                assert_eq!(result.total_pages, total_pages(n, 10));
                // Clamping means the slice is only empty for an empty input.
                assert_eq!(result.items.is_empty(), n == 0);
            }
        }
    }

    #[test]
    fn test_page_clamps_out_of_range() {
        let result = Listing::new(items(25)).page(99, 10);
        assert_eq!(result.page, 3);
        assert_eq!(result.items, vec![20, 21, 22, 23, 24]);

        let result = Listing::new(items(25)).page(0, 10);
        assert_eq!(result.page, 1);
    }

    #[test]
    fn test_last_page_is_partial() {
        let result = Listing::new(items(25)).page(3, 10);
        assert_eq!(result.items.len(), 5);
        assert_eq!(result.total_items, 25);
    }

    #[test]
    fn test_filter_then_paginate() {
        let result = Listing::new(items(100)).filter(|i| i % 2 == 0).page(2, 10);
        assert_eq!(result.total_items, 50);
        assert_eq!(result.total_pages, 5);
        assert_eq!(result.items[0], 20);
    }

    #[test]
    fn test_matches_search_case_insensitive() {
        assert!(matches_search("ANN", &["Hannah", "x@example.com"]));
        assert!(matches_search("example.COM", &["Hannah", "x@example.com"]));
        assert!(!matches_search("bob", &["Hannah", "x@example.com"]));
    }

    #[test]
    fn test_matches_search_empty_query_matches_all() {
        assert!(matches_search("", &["anything"]));
        assert!(matches_search("   ", &["anything"]));
    }

    #[test]
    fn test_matches_filter_all_sentinel() {
        assert!(matches_filter(None, "a1"));
        assert!(matches_filter(Some("all"), "a1"));
        assert!(matches_filter(Some(""), "a1"));
        assert!(matches_filter(Some("a1"), "a1"));
        assert!(!matches_filter(Some("b2"), "a1"));
    }

    #[test]
    fn test_sort_order_newest_oldest() {
        let base = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let rows = vec![
            ("a", base),
            ("b", base + chrono::Duration::days(2)),
            ("c", base + chrono::Duration::days(1)),
        ];

        let newest = Listing::new(rows.clone())
            .sort_by(SortOrder::Newest.comparator(|r: &(&str, DateTime<Utc>)| r.1, |r| r.0.to_string()))
            .page(1, 10);
        assert_eq!(
            newest.items.iter().map(|r| r.0).collect::<Vec<_>>(),
            vec!["b", "c", "a"]
        );

        let oldest = Listing::new(rows)
            .sort_by(SortOrder::Oldest.comparator(|r: &(&str, DateTime<Utc>)| r.1, |r| r.0.to_string()))
            .page(1, 10);
        assert_eq!(
            oldest.items.iter().map(|r| r.0).collect::<Vec<_>>(),
            vec!["a", "c", "b"]
        );
    }

    #[test]
    fn test_sort_equal_timestamps_keep_insertion_order() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let rows = vec![("first", ts), ("second", ts), ("third", ts)];

        let page = Listing::new(rows)
            .sort_by(SortOrder::Newest.comparator(|r: &(&str, DateTime<Utc>)| r.1, |r| r.0.to_string()))
            .page(1, 10);

        assert_eq!(
            page.items.iter().map(|r| r.0).collect::<Vec<_>>(),
            vec!["first", "second", "third"]
        );
    }

    #[test]
    fn test_sort_alphabetical_ignores_case() {
        let ts = Utc::now();
        let rows = vec![("banana", ts), ("Apple", ts), ("cherry", ts)];

        let page = Listing::new(rows)
            .sort_by(SortOrder::Alphabetical.comparator(|r: &(&str, DateTime<Utc>)| r.1, |r| r.0.to_string()))
            .page(1, 10);

        assert_eq!(
            page.items.iter().map(|r| r.0).collect::<Vec<_>>(),
            vec!["Apple", "banana", "cherry"]
        );
    }

    #[test]
    fn test_list_state_search_resets_page() {
        let mut state = ListState::new(10);
        state.set_page(3, 5);
        assert_eq!(state.page(), 3);

        state.set_search("query");
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn test_list_state_filter_resets_page() {
        let mut state = ListState::new(10);
        state.set_page(4, 5);

        state.set_filter("level", "b2");
        assert_eq!(state.page(), 1);
        assert_eq!(state.filter("level"), Some("b2"));
    }

    #[test]
    fn test_list_state_filter_all_clears() {
        let mut state = ListState::new(10);
        state.set_filter("level", "b2");
        state.set_filter("level", "all");
        assert_eq!(state.filter("level"), None);
    }

    #[test]
    fn test_list_state_page_size_resets_page() {
        let mut state = ListState::new(10);
        state.set_page(2, 5);

        state.set_page_size(25);
        assert_eq!(state.page(), 1);
        assert_eq!(state.page_size(), 25);
    }

    #[test]
    fn test_list_state_page_size_clamped() {
        let mut state = ListState::new(10);
        state.set_page_size(0);
        assert_eq!(state.page_size(), 1);
        state.set_page_size(10_000);
        assert_eq!(state.page_size(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_list_state_navigation_clamps_at_boundaries() {
        let mut state = ListState::new(10);
        assert!(!state.has_prev());
        state.prev_page();
        assert_eq!(state.page(), 1);

        state.set_page(3, 3);
        assert!(!state.has_next(3));
        state.next_page(3);
        assert_eq!(state.page(), 3);

        state.prev_page();
        assert_eq!(state.page(), 2);
        assert!(state.has_prev());
        assert!(state.has_next(3));
    }

    #[test]
    fn test_list_state_set_page_clamps() {
        let mut state = ListState::new(10);
        state.set_page(42, 3);
        assert_eq!(state.page(), 3);
        state.set_page(0, 3);
        assert_eq!(state.page(), 1);
        // Empty collections behave as a single page.
        state.set_page(5, 0);
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn test_sort_order_deserializes_from_snake_case() {
        let order: SortOrder = serde_json::from_str("\"newest\"").unwrap();
        assert_eq!(order, SortOrder::Newest);
        let order: SortOrder = serde_json::from_str("\"alphabetical\"").unwrap();
        assert_eq!(order, SortOrder::Alphabetical);
    }
}
