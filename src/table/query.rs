//! Filter, sort and paginate pipeline shared by every data table.

use serde::Serialize;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// A row that can be searched by free text and narrowed by facets
pub trait Searchable {
    /// Fields the search term is matched against
    fn search_fields(&self) -> Vec<Cow<'_, str>>;

    /// Value of a categorical facet, or None if the row has no such facet
    fn facet(&self, name: &str) -> Option<Cow<'_, str>>;
}

/// Case-insensitive substring test; an empty needle always matches
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Page size and page-button window
#[derive(Clone, Copy, Debug)]
pub struct Paging {
    pub page_size: usize,
    pub window: usize,
}

impl Default for Paging {
    fn default() -> Self {
        Self {
            page_size: 10,
            window: 5,
        }
    }
}

/// Filter inputs of one table instance
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableState {
    term: String,
    facets: BTreeMap<String, String>,
    page: usize,
}

impl TableState {
    pub fn new() -> Self {
        Self {
            term: String::new(),
            facets: BTreeMap::new(),
            page: 1,
        }
    }

    /// State as rebuilt from a request: term and facets applied first, then
    /// the requested page. Blank facet values are dropped.
    pub fn with(term: &str, facets: BTreeMap<String, String>, page: usize) -> Self {
        let mut state = Self::new();
        state.commit_term(term);
        for (name, value) in &facets {
            state.set_facet(name, Some(value));
        }
        state.set_page(page);
        state
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn facets(&self) -> &BTreeMap<String, String> {
        &self.facets
    }

    /// Apply a committed search term; always returns to page 1
    pub fn commit_term(&mut self, term: &str) {
        self.term = term.trim().to_string();
        self.page = 1;
    }

    /// Set or clear a facet; always returns to page 1
    pub fn set_facet(&mut self, name: &str, value: Option<&str>) {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(v) => {
                self.facets.insert(name.to_string(), v.to_string());
            }
            None => {
                self.facets.remove(name);
            }
        }
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn has_filters(&self) -> bool {
        !self.term.is_empty() || !self.facets.is_empty()
    }

    pub fn matches<T: Searchable>(&self, row: &T) -> bool {
        let text_ok = self.term.is_empty()
            || row
                .search_fields()
                .iter()
                .any(|field| contains_ci(field, &self.term));

        text_ok
            && self.facets.iter().all(|(name, wanted)| {
                row.facet(name)
                    .map(|value| value.to_lowercase() == wanted.to_lowercase())
                    .unwrap_or(true)
            })
    }
}

/// Why a page has no rows
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyState {
    /// The source collection itself is empty
    NoData,
    /// Rows exist but none pass the active filters
    NoMatches,
}

/// One page of a filtered, sorted table
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page actually shown
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub filtered_count: usize,
    /// 1-based index of the first row shown, 0 when nothing is shown
    pub range_start: usize,
    /// 1-based index of the last row shown, never above `filtered_count`
    pub range_end: usize,
    /// Page numbers to offer as buttons
    pub page_window: Vec<usize>,
    /// "Mostrando 11-20 de 34"
    pub range_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_state: Option<EmptyState>,
}

/// Number of pages for `count` rows
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1))
}

/// A requested page outside `1..=total` falls back to page 1
pub fn clamp_page(requested: usize, total: usize) -> usize {
    if requested == 0 || requested > total {
        1
    } else {
        requested
    }
}

/// At most `window` consecutive page numbers, centered on `current` when
/// possible and clamped to `1..=total`
pub fn page_window(current: usize, total: usize, window: usize) -> Vec<usize> {
    if total == 0 || window == 0 {
        return Vec::new();
    }
    let window = window.min(total);
    let half = window / 2;
    let mut start = current.saturating_sub(half).max(1);
    if start + window - 1 > total {
        start = total + 1 - window;
    }
    (start..start + window).collect()
}

/// Filter `rows` with `state`, sort stably with `order` if given, and cut
/// out the requested page.
pub fn run_query<T, F>(rows: &[T], state: &TableState, order: Option<F>, paging: Paging) -> Page<T>
where
    T: Searchable + Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let mut filtered: Vec<T> = if state.has_filters() {
        rows.iter().filter(|row| state.matches(*row)).cloned().collect()
    } else {
        rows.to_vec()
    };
    if let Some(order) = order {
        // sort_by is stable
        filtered.sort_by(order);
    }

    let page_size = paging.page_size.max(1);
    let filtered_count = filtered.len();
    let pages = total_pages(filtered_count, page_size);
    let page = clamp_page(state.page(), pages);

    let skip = (page - 1) * page_size;
    let items: Vec<T> = filtered.into_iter().skip(skip).take(page_size).collect();

    let (range_start, range_end) = if items.is_empty() {
        (0, 0)
    } else {
        (skip + 1, (page * page_size).min(filtered_count))
    };

    let empty_state = if filtered_count > 0 {
        None
    } else if rows.is_empty() {
        Some(EmptyState::NoData)
    } else {
        Some(EmptyState::NoMatches)
    };

    Page {
        items,
        page,
        total_pages: pages,
        total_items: rows.len(),
        filtered_count,
        range_start,
        range_end,
        page_window: page_window(page, pages, paging.window),
        range_label: format!("Mostrando {}-{} de {}", range_start, range_end, filtered_count),
        empty_state,
    }
}
