//! Item list filters.
//!
//! Filters decide per item whether it joins the list; the list builder applies
//! all configured filters the same way and only ever appends.

use crate::media::MediaItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDecision {
    Include,
    Exclude,
}

/// Configured filter variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemFilter {
    /// Accepts everything.
    NoOp,
    /// Accepts items published at or after `cutoff` (unix seconds).
    /// Items without a publication time are accepted.
    PublishedSince { cutoff: i64 },
}

impl ItemFilter {
    pub fn apply(&self, item: &MediaItem) -> FilterDecision {
        match self {
            ItemFilter::NoOp => FilterDecision::Include,
            ItemFilter::PublishedSince { cutoff } => match item.published_at {
                Some(ts) if ts < *cutoff => FilterDecision::Exclude,
                _ => FilterDecision::Include,
            },
        }
    }
}

/// Append-only item list guarded by a set of filters.
#[derive(Debug, Clone, Default)]
pub struct ItemList {
    filters: Vec<ItemFilter>,
    items: Vec<MediaItem>,
}

impl ItemList {
    pub fn new(filters: Vec<ItemFilter>) -> Self {
        Self {
            filters,
            items: Vec::new(),
        }
    }

    /// Appends `item` when every filter includes it. Returns whether it was added.
    pub fn push(&mut self, item: MediaItem) -> bool {
        let include = self
            .filters
            .iter()
            .all(|f| f.apply(&item) == FilterDecision::Include);
        if include {
            self.items.push(item);
        }
        include
    }

    pub fn extend(&mut self, items: impl IntoIterator<Item = MediaItem>) {
        for item in items {
            self.push(item);
        }
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<MediaItem> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dated(title: &str, ts: Option<i64>) -> MediaItem {
        let mut item = MediaItem::new(title, format!("https://cdn.example.de/{title}.mp4"));
        item.published_at = ts;
        item
    }

    #[test]
    fn noop_appends_everything_in_order() {
        let mut list = ItemList::new(vec![ItemFilter::NoOp]);
        list.push(dated("a", Some(1)));
        list.push(dated("b", None));
        list.push(dated("a", Some(1)));
        let titles: Vec<_> = list.items().iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["a", "b", "a"]);
    }

    #[test]
    fn published_since_excludes_older_items() {
        let f = ItemFilter::PublishedSince { cutoff: 100 };
        assert_eq!(f.apply(&dated("old", Some(99))), FilterDecision::Exclude);
        assert_eq!(f.apply(&dated("edge", Some(100))), FilterDecision::Include);
        assert_eq!(f.apply(&dated("undated", None)), FilterDecision::Include);
    }

    #[test]
    fn list_applies_all_filters_and_keeps_items_unchanged() {
        let mut list = ItemList::new(vec![
            ItemFilter::NoOp,
            ItemFilter::PublishedSince { cutoff: 50 },
        ]);
        let original = dated("new", Some(60));
        assert!(list.push(original.clone()));
        assert!(!list.push(dated("old", Some(10))));
        assert_eq!(list.len(), 1);
        assert_eq!(list.items()[0], original);
    }

    #[test]
    fn empty_filter_set_accepts_all() {
        let mut list = ItemList::default();
        list.extend([dated("x", Some(0)), dated("y", Some(1))]);
        assert_eq!(list.into_items().len(), 2);
    }
}
