use crate::error::DashboardError;

use super::filter::LanguageSelection;

// ---------------------------------------------------------------------------
// Language catalog – what the selector offers
// ---------------------------------------------------------------------------

/// Selector value meaning "sum every language together".
pub const ALL_LANGUAGES: &str = "all-languages";

/// One selectable entry: the value handed to the state and its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub value: &'static str,
    pub label: &'static str,
}

/// A display group in the selector. Grouping has no effect on aggregation.
#[derive(Debug, Clone, Copy)]
pub struct CatalogGroup {
    pub label: &'static str,
    pub entries: &'static [CatalogEntry],
}

const fn lang(name: &'static str) -> CatalogEntry {
    CatalogEntry {
        value: name,
        label: name,
    }
}

pub const CATALOG: &[CatalogGroup] = &[
    CatalogGroup {
        label: "General Information",
        entries: &[CatalogEntry {
            value: ALL_LANGUAGES,
            label: "All U-M Asian Languages",
        }],
    },
    CatalogGroup {
        label: "Southeast Asia",
        entries: &[
            lang("Thai"),
            lang("Vietnamese"),
            lang("Tibetan"),
            lang("Indonesian"),
            lang("Filipino"),
        ],
    },
    CatalogGroup {
        label: "Indian Subcontinent",
        entries: &[
            lang("Telugu"),
            lang("Bengali"),
            lang("Tamil"),
            lang("Hindi"),
            lang("Sanskrit"),
            lang("Urdu"),
            lang("Punjabi"),
        ],
    },
    CatalogGroup {
        label: "East Asia",
        entries: &[lang("Chinese"), lang("Japanese"), lang("Korean")],
    },
];

/// All catalog entries, sentinel included, in display order.
pub fn entries() -> impl Iterator<Item = &'static CatalogEntry> {
    CATALOG.iter().flat_map(|g| g.entries.iter())
}

/// Names of the concrete languages (sentinel excluded).
pub fn languages() -> impl Iterator<Item = &'static str> {
    entries()
        .map(|e| e.value)
        .filter(|v| *v != ALL_LANGUAGES)
}

/// Check a selector value against the catalog ∪ {sentinel}.
pub fn validate_selection(value: &str) -> Result<LanguageSelection, DashboardError> {
    if value == ALL_LANGUAGES {
        return Ok(LanguageSelection::All);
    }
    if languages().any(|l| l == value) {
        Ok(LanguageSelection::Language(value.to_string()))
    } else {
        Err(DashboardError::InvalidLanguageSelection(value.to_string()))
    }
}

/// Human-readable label for a selection, falling back to the raw value.
pub fn label_for(selection: &LanguageSelection) -> &str {
    let value = selection.value();
    entries()
        .find(|e| e.value == value)
        .map(|e| e.label)
        .unwrap_or(value)
}
