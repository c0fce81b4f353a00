//! List-view derivation: free-text search, categorical filters, highlighting.

mod highlight;
mod lookup;

pub use highlight::{Segment, highlight};
pub use lookup::{Cell, Lookup, Lookups, NOT_AVAILABLE, TableRow};

use serde::{Deserialize, Serialize};

use crate::form::FieldKind;
use crate::record::Record;

/// Char-by-char lowercase, the same folding [`highlight`] applies to cell
/// text. Unlike `str::to_lowercase` it has no word-final forms.
fn fold_case(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Whitespace-separated search term, matched as an AND of substrings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    tokens: Vec<String>,
}

impl SearchQuery {
    pub fn new(term: &str) -> Self {
        Self {
            tokens: term.split_whitespace().map(fold_case).collect(),
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Every token occurs in `haystack`, ignoring case
    pub fn matches(&self, haystack: &str) -> bool {
        if self.tokens.is_empty() {
            return true;
        }
        let haystack = fold_case(haystack);
        self.tokens.iter().all(|token| haystack.contains(token.as_str()))
    }
}

/// Exact-match equality on one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldFilter {
    pub field: String,
    pub value: String,
}

impl FieldFilter {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn matches<E: Record>(&self, record: &E) -> bool {
        let actual = if self.field == "id" {
            Some(record.id().to_string())
        } else {
            record.field(&self.field)
        };
        actual.as_deref() == Some(self.value.as_str())
    }
}

/// Search term plus filters, composed with AND
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub search: SearchQuery,
    pub filters: Vec<FieldFilter>,
}

impl ListQuery {
    pub fn new(term: &str) -> Self {
        Self {
            search: SearchQuery::new(term),
            filters: Vec::new(),
        }
    }

    pub fn all() -> Self {
        Self::default()
    }

    pub fn filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push(FieldFilter::new(field, value));
        self
    }

    pub fn matches<E: Record>(&self, record: &E, lookups: &Lookups) -> bool {
        self.filters.iter().all(|f| f.matches(record))
            && (self.search.is_empty() || self.search.matches(&search_text(record, lookups)))
    }

    /// Matching records in store order; pure and repeatable
    pub fn apply<'a, E: Record>(&self, records: &'a [E], lookups: &Lookups) -> Vec<&'a E> {
        records
            .iter()
            .filter(|record| self.matches(*record, lookups))
            .collect()
    }
}

/// Concatenation of a record's id and searchable fields, with references
/// replaced by the referenced record's display name
pub fn search_text<E: Record>(record: &E, lookups: &Lookups) -> String {
    let mut parts = vec![record.id().to_string()];
    for field in E::schema().searchable_fields() {
        let Some(value) = record.field(field.name) else {
            continue;
        };
        match field.kind {
            FieldKind::Reference(kind) => {
                if let Some(name) = lookups.name(kind, &value) {
                    parts.push(name.to_string());
                }
            }
            _ => parts.push(value),
        }
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormValues;
    use crate::record::{District, Mandal};
    use chrono::{TimeZone, Utc};

    fn district(id: &str, name: &str, code: u32, status: &str) -> District {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let values = FormValues::new()
            .with("name", name)
            .with("code", code.to_string())
            .with("state", "Telangana")
            .with("status", status);
        District::create(id.to_string(), &values, now).unwrap()
    }

    fn mandal(id: &str, name: &str, district_id: &str) -> Mandal {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let values = FormValues::new()
            .with("name", name)
            .with("code", "1")
            .with("district_id", district_id);
        Mandal::create(id.to_string(), &values, now).unwrap()
    }

    fn districts() -> Vec<District> {
        vec![
            district("D1", "Warangal", 7, "Active"),
            district("D2", "Khammam", 4, "Inactive"),
            district("D3", "Warangal Rural", 8, "Active"),
        ]
    }

    #[test]
    fn test_empty_search_returns_everything() {
        let records = districts();
        let result = ListQuery::new("   ").apply(&records, &Lookups::new());
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_tokens_are_anded_and_case_insensitive() {
        let records = districts();
        let ids: Vec<&str> = ListQuery::new("WARANGAL rural")
            .apply(&records, &Lookups::new())
            .into_iter()
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(ids, vec!["D3"]);
    }

    #[test]
    fn test_word_final_sigma_folds_like_cell_text() {
        let query = SearchQuery::new("ΟΔΟΣ");
        assert_eq!(query.tokens(), ["οδοσ"]);
        assert!(query.matches("Νέα ΟΔΟΣ"));
    }

    #[test]
    fn test_tokens_match_across_fields() {
        let records = districts();
        let result = ListQuery::new("khammam telangana").apply(&records, &Lookups::new());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "D2");
    }

    #[test]
    fn test_filter_composes_with_search() {
        let records = districts();
        let result = ListQuery::new("warangal")
            .filter("status", "Active")
            .filter("code", "8")
            .apply(&records, &Lookups::new());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "D3");

        let none = ListQuery::all()
            .filter("status", "active")
            .apply(&records, &Lookups::new());
        assert!(none.is_empty(), "filters are exact matches");
    }

    #[test]
    fn test_search_resolves_references_through_lookup() {
        let parents = districts();
        let lookups = Lookups::new().with(&parents);
        let mandals = vec![mandal("M1", "Hanamkonda", "D1"), mandal("M2", "Sathupalli", "D2")];

        let result = ListQuery::new("khammam").apply(&mandals, &lookups);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "M2");

        let text = search_text(&mandals[0], &lookups);
        assert!(text.contains("Warangal"));
        assert!(!text.contains("D1 "));
    }

    #[test]
    fn test_apply_is_idempotent() {
        let records = districts();
        let query = ListQuery::new("a").filter("state", "Telangana");
        let first = query.apply(&records, &Lookups::new());
        let second = query.apply(&records, &Lookups::new());
        assert_eq!(first, second);
    }

    #[test]
    fn test_table_row_falls_back_to_na() {
        let lookups = Lookups::new().with(&districts());
        let orphan = mandal("M9", "Orphan", "D404");

        let row = TableRow::project(&orphan, &lookups);
        assert_eq!(row.value("district_id"), Some(NOT_AVAILABLE));
        assert_eq!(row.value("name"), Some("Orphan"));

        let linked = TableRow::project(&mandal("M1", "Hanamkonda", "D1"), &lookups);
        assert_eq!(linked.value("district_id"), Some("Warangal"));
    }
}
