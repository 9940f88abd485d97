use crate::data::aggregate::{AggregateSeries, LevelPoint, TermPoint, aggregate_by_level, aggregate_by_term};
use crate::data::catalog::validate_selection;
use crate::data::filter::{LanguageSelection, matching_count};
use crate::data::model::{EnrollmentDataset, EnrollmentRecord, YearRange};
use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Owns the language filter and the two series derived from it. Every
/// mutation of the filter or the dataset goes through a method that ends in
/// [`AppState::recompute`], so the series never go stale.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<EnrollmentDataset>,

    /// Fixed x-axis of both charts.
    pub year_range: YearRange,

    /// Current language filter.
    selection: LanguageSelection,

    /// Fall / Winter series for the current filter (cached).
    by_term: AggregateSeries<TermPoint>,

    /// Beginner / Intermediate / Advanced series for the current filter (cached).
    by_level: AggregateSeries<LevelPoint>,

    /// Records passing the current filter (cached).
    pub matching_records: usize,

    /// Whether the data tables are shown under the charts.
    pub show_tables: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(YearRange::default())
    }
}

impl AppState {
    /// Fresh state with the all-languages filter and zero-filled series.
    pub fn new(year_range: YearRange) -> Self {
        let mut state = Self {
            dataset: None,
            year_range,
            selection: LanguageSelection::All,
            by_term: AggregateSeries::default(),
            by_level: AggregateSeries::default(),
            matching_records: 0,
            show_tables: false,
            status_message: None,
        };
        state.recompute();
        state
    }

    pub fn selection(&self) -> &LanguageSelection {
        &self.selection
    }

    pub fn by_term(&self) -> &AggregateSeries<TermPoint> {
        &self.by_term
    }

    pub fn by_level(&self) -> &AggregateSeries<LevelPoint> {
        &self.by_level
    }

    /// Ingest a newly loaded dataset and refresh the series.
    pub fn set_dataset(&mut self, dataset: EnrollmentDataset) {
        self.dataset = Some(dataset);
        self.status_message = None;
        self.recompute();
    }

    /// Handle a value from the language selector.
    ///
    /// Unknown values are rejected and the previous filter stays in place.
    pub fn on_language_selected(&mut self, value: &str) -> Result<(), DashboardError> {
        match validate_selection(value) {
            Ok(selection) => {
                self.selection = selection;
                self.status_message = None;
                self.recompute();
                Ok(())
            }
            Err(err) => {
                log::warn!("Ignoring language selection: {err}");
                self.status_message = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Rebuild both series from scratch for the current filter.
    pub fn recompute(&mut self) {
        let records: &[EnrollmentRecord] = self
            .dataset
            .as_ref()
            .map(|ds| ds.records.as_slice())
            .unwrap_or(&[]);

        self.by_term = aggregate_by_term(records, &self.selection, self.year_range);
        self.by_level = aggregate_by_level(records, &self.selection, self.year_range);
        self.matching_records = matching_count(records, &self.selection);

        log::debug!(
            "Recomputed series for '{}' over {}: {} matching records",
            self.selection,
            self.year_range,
            self.matching_records
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Level, Term};

    fn dataset() -> EnrollmentDataset {
        let rec = |year, language: &str, n| EnrollmentRecord {
            year: Some(year),
            term: Some(Term::Fall),
            level: Some(if language == "Chinese" { Level::Beginner } else { Level::Advanced }),
            language: Some(language.to_string()),
            enrollment: Some(n),
        };
        EnrollmentDataset::from_records(vec![
            rec(2015, "Chinese", 5),
            rec(2015, "Japanese", 7),
            rec(2016, "Chinese", 2),
        ])
    }

    #[test]
    fn starts_with_all_languages_and_zero_series() {
        let state = AppState::default();
        assert_eq!(state.selection(), &LanguageSelection::All);
        assert_eq!(state.by_term().len(), 23);
        assert_eq!(state.by_level().len(), 23);
        assert_eq!(state.by_term().peak(), 0);
        assert_eq!(state.matching_records, 0);
    }

    #[test]
    fn loading_a_dataset_recomputes() {
        let mut state = AppState::default();
        state.status_message = Some("old error".into());
        state.set_dataset(dataset());
        assert_eq!(state.by_term().get(2015).unwrap().fall, 12);
        assert_eq!(state.matching_records, 3);
        assert!(state.status_message.is_none());
    }

    #[test]
    fn selecting_a_language_replaces_both_series() {
        let mut state = AppState::default();
        state.set_dataset(dataset());

        let p = state.by_level().get(2015).unwrap();
        assert_eq!((p.beginner, p.advanced), (5, 7));

        state.on_language_selected("Chinese").unwrap();
        assert_eq!(state.selection(), &LanguageSelection::Language("Chinese".into()));
        assert_eq!(state.by_term().get(2015).unwrap().fall, 5);
        assert_eq!(state.by_term().get(2016).unwrap().fall, 2);
        let p = state.by_level().get(2015).unwrap();
        assert_eq!((p.beginner, p.advanced), (5, 0));
        assert_eq!(state.by_level().get(2016).unwrap().beginner, 2);
        assert_eq!(state.matching_records, 2);

        state.on_language_selected("Japanese").unwrap();
        let p = state.by_level().get(2015).unwrap();
        assert_eq!((p.beginner, p.advanced), (0, 7));

        state.on_language_selected("all-languages").unwrap();
        assert_eq!(state.by_term().get(2015).unwrap().fall, 12);
        assert_eq!(state.by_level().get(2015).unwrap().advanced, 7);
    }

    #[test]
    fn invalid_selection_keeps_previous_filter() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        state.on_language_selected("Japanese").unwrap();
        let before = state.by_term().clone();

        let err = state.on_language_selected("Esperanto").unwrap_err();

        assert_eq!(err, DashboardError::InvalidLanguageSelection("Esperanto".into()));
        assert_eq!(state.selection(), &LanguageSelection::Language("Japanese".into()));
        assert_eq!(state.by_term(), &before);
        assert!(state.status_message.is_some());
    }

    #[test]
    fn custom_year_range_shapes_the_series() {
        let mut state = AppState::new(YearRange::new(2014, 2016).unwrap());
        state.set_dataset(dataset());
        let years: Vec<i32> = state.by_term().iter().map(|p| p.year).collect();
        assert_eq!(years, vec![2014, 2015, 2016]);
    }
}
