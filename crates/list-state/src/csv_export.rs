//! CSV Export
//!
//! Pure transform of the rows currently on screen. Every field is quoted and
//! embedded quotes are doubled.

use csv::{QuoteStyle, WriterBuilder};

use crate::error::ListError;

/// Rows that know how to flatten themselves into CSV cells
pub trait CsvRow {
    fn headers() -> Vec<&'static str>;
    fn cells(&self) -> Vec<String>;
}

pub fn export_csv<T: CsvRow>(rows: &[T]) -> Result<String, ListError> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(vec![]);

    let encode_err = |e: csv::Error| ListError::decode(format!("csv: {}", e));
    wtr.write_record(T::headers()).map_err(encode_err)?;
    for row in rows {
        wtr.write_record(row.cells()).map_err(encode_err)?;
    }

    let data = wtr.into_inner().map_err(|e| ListError::decode(format!("csv: {}", e)))?;
    String::from_utf8(data).map_err(|e| ListError::decode(e.to_string()))
}

/// `activity-log-2024-01-31.csv`
pub fn export_filename(prefix: &str, date: chrono::NaiveDate) -> String {
    format!("{}-{}.csv", prefix, date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Activity {
        id: u32,
        kind: &'static str,
        title: &'static str,
        created_at: &'static str,
    }

    impl CsvRow for Activity {
        fn headers() -> Vec<&'static str> {
            vec!["id", "type", "title", "created_at"]
        }

        fn cells(&self) -> Vec<String> {
            vec![self.id.to_string(), self.kind.into(), self.title.into(), self.created_at.into()]
        }
    }

    #[test]
    fn test_embedded_quotes_doubled() {
        let rows = vec![Activity {
            id: 1,
            kind: "article_created",
            title: r#"A "Quoted" Title"#,
            created_at: "2024-01-01",
        }];
        let csv = export_csv(&rows).unwrap();
        let mut lines = csv.lines();

        assert_eq!(lines.next(), Some(r#""id","type","title","created_at""#));
        let line = lines.next().unwrap();
        assert!(line.contains(r#""A ""Quoted"" Title""#));
        assert_eq!(line, r#""1","article_created","A ""Quoted"" Title","2024-01-01""#);
    }

    #[test]
    fn test_empty_export_has_header_only() {
        let csv = export_csv::<Activity>(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn test_filename() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(export_filename("activity-log", date), "activity-log-2024-01-31.csv");
    }
}
