use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::loader::CsvRow;
use super::model::BookTable;

// ---------------------------------------------------------------------------
// CSV report export
// ---------------------------------------------------------------------------

/// Default filename for the drill-through download.
pub const REPORT_FILE_NAME: &str = "final_filtered_report.csv";

/// Write the visible rows as a UTF-8, comma-delimited CSV with a header row
/// and no index column. The derived `rating_score` is included, so an export
/// re-loaded through the loader reproduces the same scores verbatim.
pub fn write_csv<W: Write>(table: &BookTable, indices: &[usize], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for &i in indices {
        let r = &table.records[i];
        csv_writer
            .serialize(CsvRow {
                title: r.title.clone(),
                price: r.price,
                title_length: r.title_length,
                price_category: r.price_category,
                rating_four: r.rating_four,
                rating_three: r.rating_three,
                rating_two: r.rating_two,
                rating_one: r.rating_one,
                rating_score: Some(r.rating_score),
            })
            .with_context(|| format!("serializing row {i}"))?;
    }
    csv_writer.flush().context("flushing CSV report")?;
    Ok(())
}

/// Write the report to a file path.
pub fn write_csv_file(table: &BookTable, indices: &[usize], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating '{}'", path.display()))?;
    write_csv(table, indices, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_csv;
    use crate::data::model::{BookRecord, PriceCategory};

    fn sample_table() -> BookTable {
        BookTable::new(vec![
            BookRecord {
                title: "Dune".to_string(),
                price: 10.0,
                title_length: 4,
                price_category: PriceCategory::Low,
                rating_four: false,
                rating_three: false,
                rating_two: false,
                rating_one: false,
                rating_score: 5,
            },
            BookRecord {
                title: "Emma, annotated".to_string(),
                price: 50.5,
                title_length: 15,
                price_category: PriceCategory::Medium,
                rating_four: false,
                rating_three: true,
                rating_two: false,
                rating_one: false,
                rating_score: 3,
            },
        ])
    }

    #[test]
    fn export_has_header_and_quotes_commas() {
        let table = sample_table();
        let mut buf = Vec::new();
        write_csv(&table, &[0, 1], &mut buf).expect("export");
        let text = String::from_utf8(buf).expect("utf-8");
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some(
                "title,price,title_length,price_category,\
                 rating_four,rating_three,rating_two,rating_one,rating_score"
            )
        );
        assert!(text.contains("\"Emma, annotated\""));
    }

    #[test]
    fn export_then_reload_round_trips() {
        let table = sample_table();
        let mut buf = Vec::new();
        write_csv(&table, &[0, 1], &mut buf).expect("export");

        let reloaded = parse_csv(buf.as_slice()).expect("reload");
        assert_eq!(reloaded, table);
    }

    #[test]
    fn export_respects_the_filtered_subset() {
        let table = sample_table();
        let mut buf = Vec::new();
        write_csv(&table, &[1], &mut buf).expect("export");

        let reloaded = parse_csv(buf.as_slice()).expect("reload");
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.records[0], table.records[1]);
    }
}
