use super::model::{BookRecord, BookTable, FilterCriteria};

// ---------------------------------------------------------------------------
// Filter engine: criteria → ordered row indices
// ---------------------------------------------------------------------------

/// Whether a single record satisfies every constraint. The three predicates
/// are conjunctive and the price bounds are inclusive on both ends.
fn matches(record: &BookRecord, criteria: &FilterCriteria) -> bool {
    record.price >= criteria.price_min
        && record.price <= criteria.price_max
        && criteria.categories.contains(&record.price_category)
        && criteria.ratings.contains(&record.rating_score)
}

/// Return indices of records that pass the current criteria, in table order.
///
/// Pure full-table scan, recomputed from scratch on every criteria change.
/// An empty category or rating selection yields an empty view (nothing
/// selected shows nothing, it is not "no constraint").
pub fn filtered_indices(table: &BookTable, criteria: &FilterCriteria) -> Vec<usize> {
    table
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| matches(r, criteria))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::data::model::tests::record;
    use crate::data::model::PriceCategory;

    fn scenario_table() -> BookTable {
        BookTable::new(vec![
            record("cheap", 10.0, PriceCategory::Low, 5),
            record("middle", 50.0, PriceCategory::Medium, 3),
            record("dear", 200.0, PriceCategory::High, 4),
        ])
    }

    #[test]
    fn price_range_excludes_outside_and_keeps_table_order() {
        let table = scenario_table();
        let mut criteria = FilterCriteria::select_all(&table);
        criteria.price_min = 0.0;
        criteria.price_max = 100.0;
        assert_eq!(filtered_indices(&table, &criteria), vec![0, 1]);
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let table = scenario_table();
        let mut criteria = FilterCriteria::select_all(&table);
        criteria.price_min = 10.0;
        criteria.price_max = 50.0;
        assert_eq!(filtered_indices(&table, &criteria), vec![0, 1]);

        criteria.price_min = 50.0;
        criteria.price_max = 50.0;
        assert_eq!(filtered_indices(&table, &criteria), vec![1]);
    }

    #[test]
    fn empty_category_selection_hides_everything() {
        let table = scenario_table();
        let mut criteria = FilterCriteria::select_all(&table);
        criteria.categories = BTreeSet::new();
        assert!(filtered_indices(&table, &criteria).is_empty());
    }

    #[test]
    fn empty_rating_selection_hides_everything() {
        let table = scenario_table();
        let mut criteria = FilterCriteria::select_all(&table);
        criteria.ratings = BTreeSet::new();
        assert!(filtered_indices(&table, &criteria).is_empty());
    }

    #[test]
    fn predicates_are_conjunctive() {
        let table = scenario_table();
        let mut criteria = FilterCriteria::select_all(&table);
        // Price admits all three, categories admit only High, ratings only 4:
        // the intersection is the single High/4 record.
        criteria.categories = [PriceCategory::High].into_iter().collect();
        criteria.ratings = [4].into_iter().collect();
        assert_eq!(filtered_indices(&table, &criteria), vec![2]);

        // Narrow the price range and the intersection empties out.
        criteria.price_max = 100.0;
        assert!(filtered_indices(&table, &criteria).is_empty());
    }

    #[test]
    fn filtering_is_pure_and_idempotent() {
        let table = scenario_table();
        let criteria = FilterCriteria::select_all(&table);
        let first = filtered_indices(&table, &criteria);
        let second = filtered_indices(&table, &criteria);
        assert_eq!(first, second);
        assert!(first.iter().all(|&i| i < table.len()));
    }
}
