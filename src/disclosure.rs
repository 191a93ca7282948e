//! Single-open accordion state.
//!
//! At most one row is open. Opening a row implicitly closes the previous one;
//! toggling the open row closes it.
//!
//! [`AccordionList`] pairs the state with a [`CollectionView`] for FAQ-style
//! lists that can be filtered. The open index refers to a position in the
//! currently visible list, so a filter change collapses the list (when
//! `reset_on_filter` is set) rather than leaving an unrelated row open.

use crate::collection::{CollectionView, ViewSpec};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisclosureState {
    pub open_index: Option<usize>,
}

impl DisclosureState {
    pub fn is_open(&self, index: usize) -> bool {
        self.open_index == Some(index)
    }

    pub fn toggle(&mut self, index: usize) {
        *self = toggle(index, *self);
    }

    pub fn close(&mut self) {
        self.open_index = None;
    }
}

/// Open `index`, or close it if it is already the open one.
pub fn toggle(index: usize, state: DisclosureState) -> DisclosureState {
    if state.open_index == Some(index) {
        DisclosureState { open_index: None }
    } else {
        DisclosureState {
            open_index: Some(index),
        }
    }
}

/// A filterable list whose rows expand one at a time.
pub struct AccordionList<T> {
    view: CollectionView<T>,
    disclosure: DisclosureState,
    reset_on_filter: bool,
}

impl<T> AccordionList<T> {
    pub fn new(spec: ViewSpec<T>, default_sort: &str, reset_on_filter: bool) -> Self {
        Self {
            view: CollectionView::new(spec, default_sort),
            disclosure: DisclosureState::default(),
            reset_on_filter,
        }
    }

    pub fn view(&self) -> &CollectionView<T> {
        &self.view
    }

    pub fn disclosure(&self) -> DisclosureState {
        self.disclosure
    }

    /// Change the category. Collapses the open row when the filter actually
    /// changed and `reset_on_filter` is set.
    pub fn set_filter(&mut self, filter: &str) -> bool {
        let changed = self.view.set_filter(filter);
        if changed && self.reset_on_filter {
            self.disclosure.close();
        }
        changed
    }

    /// Reconcile the filter against `items`. A filter that vanished falls
    /// back to "All", which counts as a filter change.
    fn visible<'a>(&mut self, items: &'a [T]) -> Vec<&'a T> {
        if self.view.reconcile(items) && self.reset_on_filter {
            self.disclosure.close();
        }
        self.view.visible(items)
    }

    /// Toggle row `index` of the visible list. Indices past the end of the
    /// visible list are ignored.
    pub fn toggle(&mut self, index: usize, items: &[T]) {
        if index < self.visible(items).len() {
            self.disclosure.toggle(index);
        }
    }

    /// The visible rows paired with whether each is open.
    pub fn rows<'a>(&mut self, items: &'a [T]) -> Vec<(&'a T, bool)> {
        let visible = self.visible(items);
        let state = self.disclosure;
        visible
            .into_iter()
            .enumerate()
            .map(|(i, item)| (item, state.is_open(i)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faq_toggle_scenario() {
        let s = DisclosureState::default();
        assert_eq!(s.open_index, None);

        let s = toggle(2, s);
        assert_eq!(s.open_index, Some(2));

        let s = toggle(2, s);
        assert_eq!(s.open_index, None);

        let s = toggle(2, s);
        let s = toggle(0, s);
        assert_eq!(s.open_index, Some(0));
    }

    #[test]
    fn double_toggle_restores_original() {
        for start in [None, Some(0), Some(3)] {
            let original = DisclosureState { open_index: start };
            for i in 0..5 {
                let once = toggle(i, original);
                let twice = toggle(i, once);
                if start == Some(i) {
                    assert_eq!(once.open_index, None);
                    assert_eq!(twice, original);
                } else {
                    assert_eq!(twice.open_index, None);
                }
            }
        }
    }

    #[test]
    fn at_most_one_open_after_any_sequence() {
        let mut s = DisclosureState::default();
        for i in [1, 4, 4, 2, 0, 0, 3, 1, 1, 2] {
            s.toggle(i);
            let open = (0..5).filter(|&k| s.is_open(k)).count();
            assert!(open <= 1);
        }
    }

    #[derive(Debug, PartialEq)]
    struct Row {
        topic: &'static str,
        q: &'static str,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { topic: "Billing", q: "a" },
            Row { topic: "Support", q: "b" },
            Row { topic: "Billing", q: "c" },
        ]
    }

    fn spec() -> ViewSpec<Row> {
        ViewSpec::new(|r: &Row| r.topic, |_, _| std::cmp::Ordering::Equal)
    }

    #[test]
    fn filter_change_collapses_when_configured() {
        let items = rows();
        let mut list = AccordionList::new(spec(), "default", true);
        list.toggle(2, &items);
        assert_eq!(list.disclosure().open_index, Some(2));

        list.set_filter("Billing");
        assert_eq!(list.disclosure().open_index, None);
    }

    #[test]
    fn filter_change_keeps_index_when_not_configured() {
        let items = rows();
        let mut list = AccordionList::new(spec(), "default", false);
        list.toggle(1, &items);
        list.set_filter("Billing");
        assert_eq!(list.disclosure().open_index, Some(1));

        let open: Vec<&str> = list
            .rows(&items)
            .into_iter()
            .filter(|(_, open)| *open)
            .map(|(row, _)| row.q)
            .collect();
        assert_eq!(open, vec!["c"]);
    }

    #[test]
    fn same_filter_does_not_collapse() {
        let items = rows();
        let mut list = AccordionList::new(spec(), "default", true);
        list.set_filter("Billing");
        list.toggle(0, &items);
        assert!(!list.set_filter("Billing"));
        assert_eq!(list.disclosure().open_index, Some(0));
    }

    #[test]
    fn toggle_past_visible_end_is_ignored() {
        let items = rows();
        let mut list = AccordionList::new(spec(), "default", true);
        list.set_filter("Support");
        list.toggle(1, &items);
        assert_eq!(list.disclosure().open_index, None);
    }

    #[test]
    fn vanished_filter_collapses_open_row() {
        let items = rows();
        let mut list = AccordionList::new(spec(), "default", true);
        list.set_filter("Billing");
        list.toggle(1, &items);
        assert_eq!(list.disclosure().open_index, Some(1));

        let support_only = vec![Row { topic: "Support", q: "b" }];
        let visible = list.rows(&support_only);
        assert_eq!(list.view().state().active_filter, "All");
        assert_eq!(list.disclosure().open_index, None);
        assert!(visible.iter().all(|(_, open)| !open));
    }

    #[test]
    fn vanished_filter_keeps_row_when_not_configured() {
        let items = rows();
        let mut list = AccordionList::new(spec(), "default", false);
        list.set_filter("Billing");
        list.toggle(0, &items);

        let support_only = vec![Row { topic: "Support", q: "b" }];
        list.rows(&support_only);
        assert_eq!(list.disclosure().open_index, Some(0));
    }
}
