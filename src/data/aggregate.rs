use std::collections::BTreeMap;

use serde::Serialize;

use super::filter::LanguageSelection;
use super::model::{EnrollmentRecord, Level, Term, YearRange};

// ---------------------------------------------------------------------------
// Series points
// ---------------------------------------------------------------------------

/// A point of a year-indexed series with a fixed set of named categories.
///
/// Charts, tables and CSV export only talk to this trait, so they work for
/// either aggregate view.
pub trait SeriesPoint {
    /// Category names, in legend / column order.
    const CATEGORIES: &'static [&'static str];

    fn year(&self) -> i32;

    /// Value of the category at `index` into [`Self::CATEGORIES`].
    fn value(&self, index: usize) -> u64;
}

/// Enrollment per year split by term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TermPoint {
    pub year: i32,
    #[serde(rename = "Fall")]
    pub fall: u64,
    #[serde(rename = "Winter")]
    pub winter: u64,
}

impl SeriesPoint for TermPoint {
    const CATEGORIES: &'static [&'static str] = &["Fall", "Winter"];

    fn year(&self) -> i32 {
        self.year
    }

    fn value(&self, index: usize) -> u64 {
        match index {
            0 => self.fall,
            1 => self.winter,
            _ => 0,
        }
    }
}

/// Enrollment per year split by course level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelPoint {
    pub year: i32,
    #[serde(rename = "Beginner")]
    pub beginner: u64,
    #[serde(rename = "Intermediate")]
    pub intermediate: u64,
    #[serde(rename = "Advanced")]
    pub advanced: u64,
}

impl SeriesPoint for LevelPoint {
    const CATEGORIES: &'static [&'static str] = &["Beginner", "Intermediate", "Advanced"];

    fn year(&self) -> i32 {
        self.year
    }

    fn value(&self, index: usize) -> u64 {
        match index {
            0 => self.beginner,
            1 => self.intermediate,
            2 => self.advanced,
            _ => 0,
        }
    }
}

// ---------------------------------------------------------------------------
// AggregateSeries – ordered, gap-free sequence of points
// ---------------------------------------------------------------------------

/// One point per year of a [`YearRange`], ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateSeries<P> {
    points: Vec<P>,
}

impl<P> Default for AggregateSeries<P> {
    fn default() -> Self {
        Self { points: Vec::new() }
    }
}

impl<P: SeriesPoint> AggregateSeries<P> {
    pub fn points(&self) -> &[P] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, P> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point for a given year, if it lies in the range.
    pub fn get(&self, year: i32) -> Option<&P> {
        let first = self.points.first()?.year();
        let idx = usize::try_from(year.checked_sub(first)?).ok()?;
        self.points.get(idx)
    }

    /// Sum of one category across every year, saturating like the buckets.
    pub fn total(&self, index: usize) -> u64 {
        self.points
            .iter()
            .fold(0u64, |acc, p| acc.saturating_add(p.value(index)))
    }

    /// Largest single value of any category (used for axis bounds).
    pub fn peak(&self) -> u64 {
        self.points
            .iter()
            .flat_map(|p| (0..P::CATEGORIES.len()).map(move |i| p.value(i)))
            .max()
            .unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Fold matching records into per-year accumulators of `N` buckets.
///
/// The map is seeded with zeros for every year in `range`, so years without
/// data still yield a point. Records are skipped when they fail the language
/// filter, lack a year or an enrollment, fall outside the range, or when
/// `bucket` returns `None` for them.
fn fold_by_year<const N: usize>(
    records: &[EnrollmentRecord],
    selection: &LanguageSelection,
    range: YearRange,
    bucket: impl Fn(&EnrollmentRecord) -> Option<usize>,
) -> BTreeMap<i32, [u64; N]> {
    let mut totals: BTreeMap<i32, [u64; N]> = range.years().map(|y| (y, [0; N])).collect();

    for record in records.iter().filter(|r| selection.matches(r)) {
        let (Some(year), Some(enrollment)) = (record.year, record.enrollment) else {
            continue;
        };
        let Some(slot) = bucket(record) else {
            continue;
        };
        if let Some(acc) = totals.get_mut(&year) {
            acc[slot] = acc[slot].saturating_add(enrollment);
        }
    }

    totals
}

/// Fall / Winter enrollment per year for the selected language.
pub fn aggregate_by_term(
    records: &[EnrollmentRecord],
    selection: &LanguageSelection,
    range: YearRange,
) -> AggregateSeries<TermPoint> {
    let totals = fold_by_year::<2>(records, selection, range, |r| match r.term.as_ref()? {
        Term::Fall => Some(0),
        Term::Winter => Some(1),
        Term::Other(_) => None,
    });

    let mut points = Vec::with_capacity(range.year_count());
    points.extend(
        totals
            .into_iter()
            .map(|(year, [fall, winter])| TermPoint { year, fall, winter }),
    );
    AggregateSeries { points }
}

/// Beginner / Intermediate / Advanced enrollment per year for the selected
/// language.
pub fn aggregate_by_level(
    records: &[EnrollmentRecord],
    selection: &LanguageSelection,
    range: YearRange,
) -> AggregateSeries<LevelPoint> {
    let totals = fold_by_year::<3>(records, selection, range, |r| match r.level.as_ref()? {
        Level::Beginner => Some(0),
        Level::Intermediate => Some(1),
        Level::Advanced => Some(2),
        Level::Other(_) => None,
    });

    let mut points = Vec::with_capacity(range.year_count());
    points.extend(
        totals
            .into_iter()
            .map(|(year, [beginner, intermediate, advanced])| LevelPoint {
                year,
                beginner,
                intermediate,
                advanced,
            }),
    );
    AggregateSeries { points }
}
