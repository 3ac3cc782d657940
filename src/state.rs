use std::path::PathBuf;
use std::sync::Arc;

use crate::data::filter::filtered_indices;
use crate::data::loader::TableCache;
use crate::data::model::{BookTable, FilterCriteria, PriceCategory};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded inventory (None until a file loads). Shared with the cache.
    pub table: Option<Arc<BookTable>>,

    /// Path the current table was loaded from.
    pub source_path: Option<PathBuf>,

    /// Current sidebar constraints.
    pub criteria: FilterCriteria,

    /// Full price span of the table, bounds for the range sliders.
    pub price_span: (f64, f64),

    /// Indices of records passing the current criteria (cached).
    pub visible_indices: Vec<usize>,

    /// Memoized loader, keyed by source content.
    pub cache: TableCache,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            table: None,
            source_path: None,
            criteria: FilterCriteria {
                price_min: 0.0,
                price_max: 0.0,
                categories: PriceCategory::ALL.into_iter().collect(),
                ratings: (1..=5).collect(),
            },
            price_span: (0.0, 0.0),
            visible_indices: Vec::new(),
            cache: TableCache::new(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Load (or re-load) a CSV through the cache and ingest the result.
    pub fn load_source(&mut self, path: PathBuf) {
        match self.cache.load(&path) {
            Ok(table) => {
                log::info!("loaded {} records from {}", table.len(), path.display());
                self.source_path = Some(path);
                self.set_table(table);
            }
            Err(e) => {
                log::error!("failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a newly loaded table, reset criteria to select-everything.
    pub fn set_table(&mut self, table: Arc<BookTable>) {
        self.criteria = FilterCriteria::select_all(&table);
        self.price_span = table.price_bounds().unwrap_or((0.0, 0.0));
        self.visible_indices = (0..table.len()).collect();
        self.table = Some(table);
        self.status_message = None;
    }

    /// Recompute `visible_indices` after a criteria change.
    pub fn refilter(&mut self) {
        if let Some(table) = &self.table {
            self.visible_indices = filtered_indices(table, &self.criteria);
        }
    }

    /// Restore all three criteria to "select everything".
    pub fn reset_filters(&mut self) {
        if let Some(table) = &self.table {
            self.criteria = FilterCriteria::select_all(table);
        }
        self.refilter();
    }

    /// Toggle one price category in the filter.
    pub fn toggle_category(&mut self, category: PriceCategory) {
        if !self.criteria.categories.remove(&category) {
            self.criteria.categories.insert(category);
        }
        self.refilter();
    }

    /// Toggle one rating score in the filter.
    pub fn toggle_rating(&mut self, rating: u8) {
        if !self.criteria.ratings.remove(&rating) {
            self.criteria.ratings.insert(rating);
        }
        self.refilter();
    }

    /// Clamp and apply a new price range from the sliders.
    pub fn set_price_range(&mut self, min: f64, max: f64) {
        let (lo, hi) = self.price_span;
        self.criteria.price_min = min.clamp(lo, hi);
        self.criteria.price_max = max.clamp(self.criteria.price_min, hi);
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    fn state_with_table() -> AppState {
        let table = BookTable::new(vec![
            record("cheap", 10.0, PriceCategory::Low, 5),
            record("middle", 50.0, PriceCategory::Medium, 3),
            record("dear", 200.0, PriceCategory::High, 4),
        ]);
        let mut state = AppState::default();
        state.set_table(Arc::new(table));
        state
    }

    #[test]
    fn set_table_selects_everything() {
        let state = state_with_table();
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
        assert_eq!(state.price_span, (10.0, 200.0));
    }

    #[test]
    fn toggles_narrow_and_restore() {
        let mut state = state_with_table();
        state.toggle_category(PriceCategory::High);
        assert_eq!(state.visible_indices, vec![0, 1]);
        state.toggle_rating(3);
        assert_eq!(state.visible_indices, vec![0]);

        state.reset_filters();
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
    }

    #[test]
    fn price_range_is_clamped_to_the_table_span() {
        let mut state = state_with_table();
        state.set_price_range(-100.0, 60.0);
        assert_eq!(state.criteria.price_min, 10.0);
        assert_eq!(state.criteria.price_max, 60.0);
        assert_eq!(state.visible_indices, vec![0, 1]);

        // max below min collapses to a single point at min
        state.set_price_range(50.0, 20.0);
        assert_eq!(state.criteria.price_min, 50.0);
        assert_eq!(state.criteria.price_max, 50.0);
        assert_eq!(state.visible_indices, vec![1]);
    }
}
