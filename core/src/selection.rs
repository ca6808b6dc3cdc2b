//! User-selected filter ids and the restaurant subset they describe.
//!
//! Selection composes with AND: a restaurant passes only when every
//! selected id appears in its `filter_ids`. Ids that match no known
//! filter simply never match.

use std::collections::HashSet;

use crate::types::Restaurant;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    selected: HashSet<String>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `filter_id` if absent, remove it if present. Returns whether the
    /// id is selected afterwards.
    pub fn toggle(&mut self, filter_id: &str) -> bool {
        if self.selected.remove(filter_id) {
            false
        } else {
            self.selected.insert(filter_id.to_string());
            true
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn is_selected(&self, filter_id: &str) -> bool {
        self.selected.contains(filter_id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }

    /// Selection ⊆ restaurant filter ids.
    pub fn matches(&self, restaurant: &Restaurant) -> bool {
        self.selected.iter().all(|id| restaurant.has_filter(id))
    }

    /// Restaurants passing the selection, original order preserved. An
    /// empty selection passes everything.
    pub fn apply<'a>(&self, restaurants: &'a [Restaurant]) -> Vec<&'a Restaurant> {
        if self.is_empty() {
            return restaurants.iter().collect();
        }
        restaurants.iter().filter(|r| self.matches(r)).collect()
    }
}

impl<S: Into<String>> FromIterator<S> for FilterSelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            selected: iter.into_iter().map(Into::into).collect(),
        }
    }
}
