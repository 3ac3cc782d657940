use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::model::{BookRecord, BookTable, PriceCategory};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Loader failures. Both variants are fatal to the session: the dashboard
/// shows the message and renders no charts. Ambiguous rating indicators are
/// deliberately *not* an error, see [`derive_rating`].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read '{path}': {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("source is missing required column '{missing}'")]
    Schema { missing: String },

    #[error("CSV row {line}: {message}")]
    Parse { line: usize, message: String },
}

// ---------------------------------------------------------------------------
// CSV row schema
// ---------------------------------------------------------------------------

/// Columns every source file must carry. `rating_score` is intentionally not
/// in this list: it is derived on first load and only read back verbatim when
/// re-loading an exported report.
const REQUIRED_COLUMNS: [&str; 8] = [
    "title",
    "price",
    "title_length",
    "price_category",
    "rating_four",
    "rating_three",
    "rating_two",
    "rating_one",
];

/// One CSV row as it appears on disk. Shared with the export path so the
/// written report deserializes back through the same schema.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CsvRow {
    pub title: String,
    pub price: f64,
    pub title_length: u32,
    pub price_category: PriceCategory,
    #[serde(deserialize_with = "flexible_bool")]
    pub rating_four: bool,
    #[serde(deserialize_with = "flexible_bool")]
    pub rating_three: bool,
    #[serde(deserialize_with = "flexible_bool")]
    pub rating_two: bool,
    #[serde(deserialize_with = "flexible_bool")]
    pub rating_one: bool,
    /// Present only in exported reports; taken verbatim when it is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_score: Option<u8>,
}

/// Pandas-flavoured bool cells: exports write `True`/`False`, hand-edited
/// files tend to use `true`/`1`.
fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" | "" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "expected a boolean, got '{other}'"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Rating derivation
// ---------------------------------------------------------------------------

/// Derive the 1–5 score from the four indicator flags.
///
/// The precedence (4, 1, 3, 2, fallback 5) is the published behaviour of the
/// original dashboard and must stay exactly as-is: the rating-distribution
/// numbers depend on which branch wins when indicators contradict each
/// other. A record with every flag false scores 5 by assumption, not because
/// a five-star indicator exists.
pub fn derive_rating(four: bool, one: bool, three: bool, two: bool) -> u8 {
    if four {
        4
    } else if one {
        1
    } else if three {
        3
    } else if two {
        2
    } else {
        5
    }
}

impl CsvRow {
    fn into_record(self) -> BookRecord {
        let rating_score = self.rating_score.unwrap_or_else(|| {
            derive_rating(
                self.rating_four,
                self.rating_one,
                self.rating_three,
                self.rating_two,
            )
        });
        BookRecord {
            title: self.title,
            price: self.price,
            title_length: self.title_length,
            price_category: self.price_category,
            rating_four: self.rating_four,
            rating_three: self.rating_three,
            rating_two: self.rating_two,
            rating_one: self.rating_one,
            rating_score,
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the inventory from a CSV file on disk.
pub fn load_csv(path: &Path) -> Result<BookTable, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    parse_csv(file)
}

/// Parse the inventory from any CSV reader. Rows keep source order; a single
/// malformed row fails the whole load (no partial tables).
pub fn parse_csv<R: Read>(reader: R) -> Result<BookTable, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .map_err(|e| LoadError::Parse {
            line: 1,
            message: e.to_string(),
        })?
        .iter()
        .map(|h| h.to_string())
        .collect();

    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(LoadError::Schema {
                missing: required.to_string(),
            });
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in csv_reader.deserialize::<CsvRow>().enumerate() {
        // +2: one for the header row, one because rows are 1-based on disk.
        let row = result.map_err(|e| LoadError::Parse {
            line: row_no + 2,
            message: e.to_string(),
        })?;
        records.push(row.into_record());
    }

    Ok(BookTable::new(records))
}

// ---------------------------------------------------------------------------
// TableCache – memoized loading keyed by source content
// ---------------------------------------------------------------------------

/// Memoizes [`load_csv`] per path. A hit requires the file's byte content to
/// fingerprint identically to the cached entry, so editing the source in
/// place invalidates naturally. Tables are handed out as `Arc`: they are
/// immutable post-load and safe to share without locking.
#[derive(Debug, Default)]
pub struct TableCache {
    entries: HashMap<PathBuf, CacheEntry>,
}

#[derive(Debug)]
struct CacheEntry {
    fingerprint: u64,
    table: Arc<BookTable>,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `path`, reusing the cached table when the file content is
    /// unchanged since the last load.
    pub fn load(&mut self, path: &Path) -> Result<Arc<BookTable>, LoadError> {
        let bytes = std::fs::read(path).map_err(|source| LoadError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        let fingerprint = fingerprint_bytes(&bytes);

        if let Some(entry) = self.entries.get(path) {
            if entry.fingerprint == fingerprint {
                log::debug!("cache hit for {}", path.display());
                return Ok(Arc::clone(&entry.table));
            }
        }

        let table = Arc::new(parse_csv(bytes.as_slice())?);
        self.entries.insert(
            path.to_path_buf(),
            CacheEntry {
                fingerprint,
                table: Arc::clone(&table),
            },
        );
        Ok(table)
    }

    /// Drop the cached entry for one path.
    pub fn invalidate(&mut self, path: &Path) {
        self.entries.remove(path);
    }

    /// Drop every cached entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn fingerprint_bytes(bytes: &[u8]) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    bytes.hash(&mut hasher);
    hasher.finish()
}
