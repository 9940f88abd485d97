use std::collections::BTreeSet;
use std::fmt;
use std::ops::RangeInclusive;

use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// Term / Level – the two enumerated grouping keys
// ---------------------------------------------------------------------------

/// Academic term a record was reported for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    Fall,
    Winter,
    /// Anything else found in the source (e.g. "Spring"). Never aggregated.
    Other(String),
}

impl Term {
    /// Exact, case-sensitive match; `" Fall"` is not Fall.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Fall" => Term::Fall,
            "Winter" => Term::Winter,
            other => Term::Other(other.to_string()),
        }
    }
}

/// Proficiency tier. Beginner/Intermediate/Advanced map to 100/200/300-400
/// course numbering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
    Other(String),
}

impl Level {
    /// Exact, case-sensitive match.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Beginner" => Level::Beginner,
            "Intermediate" => Level::Intermediate,
            "Advanced" => Level::Advanced,
            other => Level::Other(other.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// EnrollmentRecord – one row of the source data
// ---------------------------------------------------------------------------

/// A single row of historical enrollment data.
///
/// Every field is optional: the source is trusted but not complete, and a
/// record missing a field simply drops out of whichever grouping needs it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrollmentRecord {
    /// Normalized year (the source mixes numbers and numeric strings).
    pub year: Option<i32>,
    pub term: Option<Term>,
    pub level: Option<Level>,
    pub language: Option<String>,
    /// Student count; never negative.
    pub enrollment: Option<u64>,
}

/// Normalize a year given as text (`"2010"`, `" 2010 "`, `"2010.0"`).
pub fn parse_year(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    if let Ok(y) = raw.parse::<i32>() {
        return Some(y);
    }
    raw.parse::<f64>().ok().and_then(year_from_f64)
}

/// Accept a floating-point year only when it is integral.
pub fn year_from_f64(v: f64) -> Option<i32> {
    if v.is_finite() && v.fract() == 0.0 && v >= i32::MIN as f64 && v <= i32::MAX as f64 {
        Some(v as i32)
    } else {
        None
    }
}

/// Normalize an enrollment count given as text.
pub fn parse_enrollment(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<u64>() {
        return Some(n);
    }
    raw.parse::<f64>().ok().and_then(enrollment_from_f64)
}

/// Accept a floating-point count only when it is integral and non-negative.
pub fn enrollment_from_f64(v: f64) -> Option<u64> {
    if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 {
        Some(v as u64)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// YearRange – the fixed inclusive x-axis
// ---------------------------------------------------------------------------

/// Inclusive range of years every series covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    min: i32,
    max: i32,
}

impl YearRange {
    pub const DEFAULT_MIN: i32 = 2002;
    pub const DEFAULT_MAX: i32 = 2024;
    /// Widest span accepted; every series holds one point per year.
    pub const MAX_YEARS: u32 = 500;

    pub fn new(min: i32, max: i32) -> Result<Self, DashboardError> {
        if min > max {
            return Err(DashboardError::InvalidYearRange { min, max });
        }
        if max.abs_diff(min) >= Self::MAX_YEARS {
            return Err(DashboardError::YearRangeTooWide {
                min,
                max,
                limit: Self::MAX_YEARS,
            });
        }
        Ok(YearRange { min, max })
    }

    pub fn last(&self) -> i32 {
        self.max
    }

    /// Every year in the range, ascending.
    pub fn years(&self) -> RangeInclusive<i32> {
        self.min..=self.max
    }

    /// Number of years (and so of points per series).
    pub fn year_count(&self) -> usize {
        self.max.abs_diff(self.min) as usize + 1
    }
}

impl Default for YearRange {
    fn default() -> Self {
        YearRange {
            min: Self::DEFAULT_MIN,
            max: Self::DEFAULT_MAX,
        }
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}–{}", self.min, self.max)
    }
}

// ---------------------------------------------------------------------------
// EnrollmentDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset plus a few pre-computed indices for the UI.
#[derive(Debug, Clone, Default)]
pub struct EnrollmentDataset {
    /// All records, in source order. Never mutated after construction.
    pub records: Vec<EnrollmentRecord>,
    /// Distinct language names found in the data.
    pub languages: BTreeSet<String>,
    /// Span of years actually present (may exceed the displayed range).
    pub observed_years: Option<(i32, i32)>,
}

impl EnrollmentDataset {
    /// Build indices from the loaded records.
    pub fn from_records(records: Vec<EnrollmentRecord>) -> Self {
        let languages = records
            .iter()
            .filter_map(|r| r.language.clone())
            .collect();

        let observed_years = records
            .iter()
            .filter_map(|r| r.year)
            .fold(None, |span, y| match span {
                None => Some((y, y)),
                Some((lo, hi)) => Some((i32::min(lo, y), i32::max(hi, y))),
            });

        EnrollmentDataset {
            records,
            languages,
            observed_years,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn years_normalize_from_text_and_floats() {
        assert_eq!(parse_year("2010"), Some(2010));
        assert_eq!(parse_year(" 2010 "), Some(2010));
        assert_eq!(parse_year("2010.0"), Some(2010));
        assert_eq!(parse_year("2010.5"), None);
        assert_eq!(parse_year("twenty-ten"), None);
    }

    #[test]
    fn enrollment_rejects_negative_and_fractional_counts() {
        assert_eq!(parse_enrollment("42"), Some(42));
        assert_eq!(parse_enrollment("42.0"), Some(42));
        assert_eq!(parse_enrollment("-3"), None);
        assert_eq!(parse_enrollment("1.5"), None);
        assert_eq!(enrollment_from_f64(f64::NAN), None);
    }

    #[test]
    fn unknown_terms_and_levels_are_kept_as_other() {
        assert_eq!(Term::parse("Winter"), Term::Winter);
        assert_eq!(Term::parse("Spring"), Term::Other("Spring".into()));
        assert_eq!(Level::parse("Advanced"), Level::Advanced);
        assert_eq!(Level::parse(" Advanced"), Level::Other(" Advanced".into()));
        assert_eq!(Term::parse("fall"), Term::Other("fall".into()));
        assert_eq!(Level::parse("Graduate"), Level::Other("Graduate".into()));
    }

    #[test]
    fn year_range_rejects_inverted_bounds() {
        assert_eq!(
            YearRange::new(2024, 2002),
            Err(DashboardError::InvalidYearRange { min: 2024, max: 2002 })
        );
        assert!(matches!(
            YearRange::new(i32::MIN, i32::MAX),
            Err(DashboardError::YearRangeTooWide { .. })
        ));
        assert_eq!(YearRange::new(1600, 2099).unwrap().year_count(), 500);
        assert!(YearRange::new(1600, 2100).is_err());
        let single = YearRange::new(2010, 2010).unwrap();
        assert_eq!(single.year_count(), 1);
        assert_eq!(YearRange::default().year_count(), 23);
    }

    #[test]
    fn dataset_indexes_languages_and_year_span() {
        let ds = EnrollmentDataset::from_records(vec![
            EnrollmentRecord {
                year: Some(2005),
                language: Some("Thai".into()),
                ..Default::default()
            },
            EnrollmentRecord {
                year: Some(2019),
                language: Some("Chinese".into()),
                ..Default::default()
            },
            EnrollmentRecord::default(),
        ]);
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.observed_years, Some((2005, 2019)));
        assert_eq!(
            ds.languages.iter().cloned().collect::<Vec<_>>(),
            vec!["Chinese".to_string(), "Thai".to_string()]
        );
    }
}
