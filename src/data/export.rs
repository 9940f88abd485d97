use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use super::aggregate::{AggregateSeries, SeriesPoint};

/// Write a series as CSV: a `year` column followed by one column per category.
pub fn write_series_csv<P>(path: &Path, series: &AggregateSeries<P>) -> Result<()>
where
    P: SeriesPoint + Serialize,
{
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating '{}'", path.display()))?;

    for point in series.iter() {
        writer
            .serialize(point)
            .with_context(|| format!("writing year {}", point.year()))?;
    }
    writer.flush().context("flushing CSV")?;

    log::info!("Exported {} rows to {}", series.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::{aggregate_by_level, aggregate_by_term};
    use crate::data::filter::LanguageSelection;
    use crate::data::model::{EnrollmentRecord, Level, Term, YearRange};

    fn records() -> Vec<EnrollmentRecord> {
        vec![EnrollmentRecord {
            year: Some(2003),
            term: Some(Term::Winter),
            level: Some(Level::Intermediate),
            language: Some("Vietnamese".into()),
            enrollment: Some(1200),
        }]
    }

    #[test]
    fn term_series_has_named_columns() {
        let range = YearRange::new(2002, 2004).unwrap();
        let series = aggregate_by_term(&records(), &LanguageSelection::All, range);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("by_term.csv");

        write_series_csv(&path, &series).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "year,Fall,Winter\n2002,0,0\n2003,0,1200\n2004,0,0\n");
    }

    #[test]
    fn level_series_has_one_row_per_year() {
        let series = aggregate_by_level(&records(), &LanguageSelection::All, YearRange::default());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("by_level.csv");

        write_series_csv(&path, &series).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("year,Beginner,Intermediate,Advanced"));
        assert_eq!(lines.clone().count(), 23);
        assert!(text.contains("2003,0,1200,0\n"));
    }

    #[test]
    fn unwritable_path_reports_context() {
        let series = aggregate_by_term(&[], &LanguageSelection::All, YearRange::default());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        let err = write_series_csv(&path, &series).unwrap_err();
        assert!(format!("{err:#}").contains("creating"));
    }
}
