//! Filter + sort + paginate over any collection.
//!
//! Every grid on the site (blog, portfolio, careers, FAQ) is the same
//! computation: keep the items whose filter field equals the active tab,
//! order them by the chosen comparator, optionally cut a page. A
//! [`ViewSpec`] parameterizes it per surface (which field, which sorts);
//! [`CollectionView`] owns the only mutable state, a [`FilterState`].
//!
//! ```text
//! (items, FilterState { active_filter, sort_key }, ViewSpec)
//!     → filter   "All" passes everything, else filter_field(item) == active_filter
//!     → sort     comparators[sort_key], unknown keys use the default comparator
//!     → page     optional fixed-size slice
//! ```
//!
//! Sorting is stable: items that compare equal keep their collection order,
//! so a re-render never reshuffles ties.

use serde::Serialize;
use std::cmp::Ordering;
use tracing::debug;

/// The filter value that passes every item.
pub const ALL: &str = "All";

/// Total order over two items of the same type.
pub type Comparator<T> = fn(&T, &T) -> Ordering;

/// Per-surface parameters: what to filter on and how to sort.
pub struct ViewSpec<T> {
    /// The value compared against the active filter.
    pub filter_field: fn(&T) -> &str,
    /// Named comparators, looked up by sort key.
    pub comparators: Vec<(&'static str, Comparator<T>)>,
    /// Used for unknown sort keys; conventionally newest first.
    pub default_comparator: Comparator<T>,
    /// Items per page for [`CollectionView::page`]. `None` means one page.
    pub page_size: Option<usize>,
}

impl<T> ViewSpec<T> {
    pub fn new(filter_field: fn(&T) -> &str, default_comparator: Comparator<T>) -> Self {
        Self {
            filter_field,
            comparators: Vec::new(),
            default_comparator,
            page_size: None,
        }
    }

    /// Register a named comparator.
    pub fn sort(mut self, key: &'static str, cmp: Comparator<T>) -> Self {
        self.comparators.push((key, cmp));
        self
    }

    pub fn paged(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn comparator(&self, sort_key: &str) -> Comparator<T> {
        self.comparators
            .iter()
            .find(|(key, _)| *key == sort_key)
            .map(|(_, cmp)| *cmp)
            .unwrap_or(self.default_comparator)
    }

    pub fn sort_keys(&self) -> Vec<&'static str> {
        self.comparators.iter().map(|(key, _)| *key).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub active_filter: String,
    pub sort_key: String,
}

impl FilterState {
    pub fn new(sort_key: &str) -> Self {
        Self {
            active_filter: ALL.to_string(),
            sort_key: sort_key.to_string(),
        }
    }
}

/// The ordered, filtered subset of `items`. Never mutates `items`.
pub fn compute_visible<'a, T>(items: &'a [T], state: &FilterState, spec: &ViewSpec<T>) -> Vec<&'a T> {
    let mut visible: Vec<&T> = if state.active_filter == ALL {
        items.iter().collect()
    } else {
        items
            .iter()
            .filter(|item| (spec.filter_field)(item) == state.active_filter)
            .collect()
    };

    let cmp = spec.comparator(&state.sort_key);
    // `sort_by` is stable.
    visible.sort_by(|a, b| cmp(a, b));
    visible
}

/// `"All"` followed by each distinct filter value in first-seen order.
pub fn filter_options<T>(items: &[T], spec: &ViewSpec<T>) -> Vec<String> {
    let mut options = vec![ALL.to_string()];
    for item in items {
        let value = (spec.filter_field)(item);
        if !options.iter().any(|o| o == value) {
            options.push(value.to_string());
        }
    }
    options
}

/// One page of a visible list.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSlice<'a, T> {
    pub items: Vec<&'a T>,
    /// Zero-based page actually returned (requests past the end are clamped).
    pub page: usize,
    /// Always at least 1, even for an empty list.
    pub page_count: usize,
    /// Visible items across all pages.
    pub total: usize,
}

/// Slice page `page` out of an already computed visible list.
pub fn paginate<'a, T>(visible: Vec<&'a T>, page_size: Option<usize>, page: usize) -> PageSlice<'a, T> {
    let total = visible.len();
    let size = page_size.filter(|&n| n > 0).unwrap_or(total.max(1));
    let page_count = total.div_ceil(size).max(1);
    let page = page.min(page_count - 1);

    let items = visible.into_iter().skip(page * size).take(size).collect();
    PageSlice {
        items,
        page,
        page_count,
        total,
    }
}

/// A surface's filter/sort state plus the [`ViewSpec`] that interprets it.
pub struct CollectionView<T> {
    spec: ViewSpec<T>,
    state: FilterState,
}

impl<T> CollectionView<T> {
    pub fn new(spec: ViewSpec<T>, default_sort: &str) -> Self {
        Self {
            spec,
            state: FilterState::new(default_sort),
        }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn spec(&self) -> &ViewSpec<T> {
        &self.spec
    }

    /// Returns whether the state changed. Setting the current value is a no-op.
    pub fn set_filter(&mut self, filter: &str) -> bool {
        if self.state.active_filter == filter {
            return false;
        }
        debug!(from = %self.state.active_filter, to = filter, "filter changed");
        self.state.active_filter = filter.to_string();
        true
    }

    /// Returns whether the state changed. Setting the current value is a no-op.
    pub fn set_sort(&mut self, sort_key: &str) -> bool {
        if self.state.sort_key == sort_key {
            return false;
        }
        self.state.sort_key = sort_key.to_string();
        true
    }

    /// `"{active_filter}-{sort_key}"`: changes exactly when the ordering
    /// criterion changes, so renderers can replay entrance animations on it.
    pub fn transition_key(&self) -> String {
        format!("{}-{}", self.state.active_filter, self.state.sort_key)
    }

    pub fn filter_options(&self, items: &[T]) -> Vec<String> {
        filter_options(items, &self.spec)
    }

    /// Fall back to `"All"` when the active filter no longer occurs in
    /// `items`. Returns whether it had to.
    pub fn reconcile(&mut self, items: &[T]) -> bool {
        if self.state.active_filter == ALL {
            return false;
        }
        let present = items
            .iter()
            .any(|item| (self.spec.filter_field)(item) == self.state.active_filter);
        if present {
            return false;
        }
        debug!(filter = %self.state.active_filter, "active filter vanished, resetting");
        self.state.active_filter = ALL.to_string();
        true
    }

    /// Reconcile against `items`, then compute the visible list.
    pub fn visible<'a>(&mut self, items: &'a [T]) -> Vec<&'a T> {
        self.reconcile(items);
        compute_visible(items, &self.state, &self.spec)
    }

    /// Visible items cut to page `page` of the view's page size.
    pub fn page<'a>(&mut self, items: &'a [T], page: usize) -> PageSlice<'a, T> {
        let visible = self.visible(items);
        paginate(visible, self.spec.page_size, page)
    }
}
