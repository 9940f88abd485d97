use std::fmt;

use super::catalog::ALL_LANGUAGES;
use super::model::EnrollmentRecord;

// ---------------------------------------------------------------------------
// Filter predicate: which language the charts are restricted to
// ---------------------------------------------------------------------------

/// The user's language filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum LanguageSelection {
    /// The all-languages sentinel: no filtering.
    #[default]
    All,
    /// Exact, case-sensitive match on `EnrollmentRecord::language`.
    Language(String),
}

impl LanguageSelection {
    /// The selector value this selection corresponds to.
    pub fn value(&self) -> &str {
        match self {
            LanguageSelection::All => ALL_LANGUAGES,
            LanguageSelection::Language(name) => name,
        }
    }

    /// Whether a record passes the filter.
    ///
    /// * `All` → every record passes, including ones without a language
    /// * `Language(name)` → only records whose language is exactly `name`
    pub fn matches(&self, record: &EnrollmentRecord) -> bool {
        match self {
            LanguageSelection::All => true,
            LanguageSelection::Language(name) => record.language.as_deref() == Some(name.as_str()),
        }
    }
}

impl fmt::Display for LanguageSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Number of records passing the filter.
pub fn matching_count(records: &[EnrollmentRecord], selection: &LanguageSelection) -> usize {
    records.iter().filter(|r| selection.matches(r)).count()
}
