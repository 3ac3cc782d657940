use std::collections::BTreeMap;

use super::model::{BookTable, PriceCategory};

// ---------------------------------------------------------------------------
// Read-only reductions over a filtered view
// ---------------------------------------------------------------------------

/// The KPI strip values. Every field is 0 on an empty view; mean-based
/// metrics never divide by zero and never produce NaN.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    pub count: usize,
    pub mean_price: f64,
    pub max_price: f64,
    pub mean_title_length: f64,
}

/// Compute the KPI summary over the visible rows.
pub fn summary(table: &BookTable, indices: &[usize]) -> Summary {
    if indices.is_empty() {
        return Summary::default();
    }
    let n = indices.len() as f64;
    let mut price_sum = 0.0;
    let mut max_price = f64::NEG_INFINITY;
    let mut length_sum = 0.0;
    for &i in indices {
        let r = &table.records[i];
        price_sum += r.price;
        max_price = max_price.max(r.price);
        length_sum += f64::from(r.title_length);
    }
    Summary {
        count: indices.len(),
        mean_price: price_sum / n,
        max_price,
        mean_title_length: length_sum / n,
    }
}

/// Visible record count per price category. Categories with zero visible
/// records are omitted.
pub fn category_counts(table: &BookTable, indices: &[usize]) -> BTreeMap<PriceCategory, usize> {
    let mut counts = BTreeMap::new();
    for &i in indices {
        *counts.entry(table.records[i].price_category).or_insert(0) += 1;
    }
    counts
}

/// Visible record count per rating score.
pub fn rating_counts(table: &BookTable, indices: &[usize]) -> BTreeMap<u8, usize> {
    let mut counts = BTreeMap::new();
    for &i in indices {
        *counts.entry(table.records[i].rating_score).or_insert(0) += 1;
    }
    counts
}

/// Visible prices grouped by category, for the box plot.
pub fn prices_by_category(
    table: &BookTable,
    indices: &[usize],
) -> BTreeMap<PriceCategory, Vec<f64>> {
    let mut groups: BTreeMap<PriceCategory, Vec<f64>> = BTreeMap::new();
    for &i in indices {
        let r = &table.records[i];
        groups.entry(r.price_category).or_default().push(r.price);
    }
    groups
}

/// Indices of the `n` most expensive visible records, descending by price.
/// Ties keep table order, so the result is deterministic.
pub fn top_by_price(table: &BookTable, indices: &[usize], n: usize) -> Vec<usize> {
    let mut sorted: Vec<usize> = indices.to_vec();
    sorted.sort_by(|&a, &b| {
        table.records[b]
            .price
            .total_cmp(&table.records[a].price)
            .then(a.cmp(&b))
    });
    sorted.truncate(n);
    sorted
}

/// Least-squares fit of price against title length over the visible rows.
/// Returns `(slope, intercept)`, or `None` when there are fewer than two
/// points or the title lengths are all identical (no x-variance to fit).
pub fn linear_trend(table: &BookTable, indices: &[usize]) -> Option<(f64, f64)> {
    if indices.len() < 2 {
        return None;
    }
    let n = indices.len() as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    for &i in indices {
        let r = &table.records[i];
        sum_x += f64::from(r.title_length);
        sum_y += r.price;
    }
    let mean_x = sum_x / n;
    let mean_y = sum_y / n;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for &i in indices {
        let r = &table.records[i];
        let dx = f64::from(r.title_length) - mean_x;
        sxx += dx * dx;
        sxy += dx * (r.price - mean_y);
    }
    if sxx.abs() < f64::EPSILON {
        return None;
    }
    let slope = sxy / sxx;
    Some((slope, mean_y - slope * mean_x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;
    use crate::data::model::BookRecord;

    fn table() -> BookTable {
        BookTable::new(vec![
            record("aa", 10.0, PriceCategory::Low, 5),     // title_length 2
            record("bbbb", 50.0, PriceCategory::Medium, 3), // title_length 4
            record("cccccc", 200.0, PriceCategory::High, 4), // title_length 6
        ])
    }

    #[test]
    fn summary_over_all_rows() {
        let t = table();
        let s = summary(&t, &[0, 1, 2]);
        assert_eq!(s.count, 3);
        assert!((s.mean_price - 86.666_666).abs() < 1e-4);
        assert_eq!(s.max_price, 200.0);
        assert_eq!(s.mean_title_length, 4.0);
    }

    #[test]
    fn summary_over_empty_view_is_all_zeros() {
        let t = table();
        assert_eq!(summary(&t, &[]), Summary::default());
    }

    #[test]
    fn counts_group_by_category_and_rating() {
        let t = table();
        let cats = category_counts(&t, &[0, 1, 2]);
        assert_eq!(cats[&PriceCategory::Low], 1);
        assert_eq!(cats[&PriceCategory::High], 1);

        let ratings = rating_counts(&t, &[0, 2]);
        assert_eq!(ratings.get(&5), Some(&1));
        assert_eq!(ratings.get(&4), Some(&1));
        assert_eq!(ratings.get(&3), None);
    }

    #[test]
    fn top_by_price_is_descending_and_tie_stable() {
        let mut records: Vec<BookRecord> = table().records;
        records.push(record("dd", 50.0, PriceCategory::Low, 5)); // ties with index 1
        let t = BookTable::new(records);
        assert_eq!(top_by_price(&t, &[0, 1, 2, 3], 3), vec![2, 1, 3]);
        assert_eq!(top_by_price(&t, &[], 10), Vec::<usize>::new());
    }

    #[test]
    fn linear_trend_recovers_a_perfect_line() {
        // price = 10 * title_length + 1
        let t = BookTable::new(vec![
            record("aa", 21.0, PriceCategory::Low, 5),
            record("bbbb", 41.0, PriceCategory::Low, 5),
            record("cccccc", 61.0, PriceCategory::Low, 5),
        ]);
        let (slope, intercept) = linear_trend(&t, &[0, 1, 2]).expect("fit");
        assert!((slope - 10.0).abs() < 1e-9);
        assert!((intercept - 1.0).abs() < 1e-9);
    }

    #[test]
    fn linear_trend_degenerate_inputs_yield_none() {
        let t = table();
        assert_eq!(linear_trend(&t, &[0]), None);
        // Identical title lengths: no x-variance.
        let flat = BookTable::new(vec![
            record("aa", 10.0, PriceCategory::Low, 5),
            record("bb", 90.0, PriceCategory::Low, 5),
        ]);
        assert_eq!(linear_trend(&flat, &[0, 1]), None);
    }
}
