use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PriceCategory – coarse price bucket assigned upstream
// ---------------------------------------------------------------------------

/// Price bucket assigned to each record by the upstream classification step.
/// Ordered Low < Medium < High so it can live in `BTreeSet` and sort sanely
/// on chart axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriceCategory {
    Low,
    Medium,
    High,
}

impl PriceCategory {
    /// All buckets in display order.
    pub const ALL: [PriceCategory; 3] = [
        PriceCategory::Low,
        PriceCategory::Medium,
        PriceCategory::High,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceCategory::Low => "Low",
            PriceCategory::Medium => "Medium",
            PriceCategory::High => "High",
        }
    }
}

impl fmt::Display for PriceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(PriceCategory::Low),
            "Medium" => Ok(PriceCategory::Medium),
            "High" => Ok(PriceCategory::High),
            other => Err(format!("unknown price category '{other}'")),
        }
    }
}

// ---------------------------------------------------------------------------
// BookRecord – one row of the inventory
// ---------------------------------------------------------------------------

/// A single book (one row of the source CSV), with the derived rating score
/// already populated by the loader.
#[derive(Debug, Clone, PartialEq)]
pub struct BookRecord {
    pub title: String,
    pub price: f64,
    /// Character count of the title, as supplied by the source.
    pub title_length: u32,
    pub price_category: PriceCategory,
    /// Raw star-indicator flags from the source dataset.
    pub rating_four: bool,
    pub rating_three: bool,
    pub rating_two: bool,
    pub rating_one: bool,
    /// Derived 1–5 score, see [`crate::data::loader::derive_rating`].
    pub rating_score: u8,
}

// ---------------------------------------------------------------------------
// BookTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full inventory in source-file order. Immutable after load; the UI only
/// ever narrows it through index lists.
#[derive(Debug, Clone, PartialEq)]
pub struct BookTable {
    pub records: Vec<BookRecord>,
}

impl BookTable {
    pub fn new(records: Vec<BookRecord>) -> Self {
        BookTable { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// (min, max) price over the whole table, or `None` when empty.
    pub fn price_bounds(&self) -> Option<(f64, f64)> {
        let mut it = self.records.iter().map(|r| r.price);
        let first = it.next()?;
        let (min, max) = it.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some((min, max))
    }
}

// ---------------------------------------------------------------------------
// FilterCriteria – the user's current constraints
// ---------------------------------------------------------------------------

/// The three sidebar constraints. All are conjunctive: a record is visible
/// only if it satisfies the price range, the category set, and the rating
/// set. An empty set hides everything (nothing selected), it does not mean
/// "no constraint".
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    /// Inclusive lower price bound.
    pub price_min: f64,
    /// Inclusive upper price bound.
    pub price_max: f64,
    pub categories: BTreeSet<PriceCategory>,
    /// Selected rating scores, each in 1..=5.
    pub ratings: BTreeSet<u8>,
}

impl FilterCriteria {
    /// Criteria that match every record of `table`: the full price span, all
    /// three categories, and every score 1..=5. This is the state the Reset
    /// button restores.
    pub fn select_all(table: &BookTable) -> Self {
        let (price_min, price_max) = table.price_bounds().unwrap_or((0.0, 0.0));
        FilterCriteria {
            price_min,
            price_max,
            categories: PriceCategory::ALL.into_iter().collect(),
            ratings: (1..=5).collect(),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(title: &str, price: f64, cat: PriceCategory, score: u8) -> BookRecord {
        BookRecord {
            title: title.to_string(),
            price,
            title_length: title.len() as u32,
            price_category: cat,
            rating_four: false,
            rating_three: false,
            rating_two: false,
            rating_one: false,
            rating_score: score,
        }
    }

    #[test]
    fn category_round_trips_through_str() {
        for cat in PriceCategory::ALL {
            assert_eq!(cat.as_str().parse::<PriceCategory>(), Ok(cat));
        }
        assert!("low".parse::<PriceCategory>().is_err());
    }

    #[test]
    fn price_bounds_span_the_table() {
        let table = BookTable::new(vec![
            record("a", 12.5, PriceCategory::Low, 5),
            record("b", 3.0, PriceCategory::Low, 5),
            record("c", 99.9, PriceCategory::High, 4),
        ]);
        assert_eq!(table.price_bounds(), Some((3.0, 99.9)));
        assert_eq!(BookTable::new(vec![]).price_bounds(), None);
    }

    #[test]
    fn select_all_covers_every_record() {
        let table = BookTable::new(vec![
            record("a", 10.0, PriceCategory::Low, 5),
            record("b", 200.0, PriceCategory::High, 1),
        ]);
        let c = FilterCriteria::select_all(&table);
        assert_eq!(c.price_min, 10.0);
        assert_eq!(c.price_max, 200.0);
        assert_eq!(c.categories.len(), 3);
        assert_eq!(c.ratings, (1..=5).collect());
    }
}
