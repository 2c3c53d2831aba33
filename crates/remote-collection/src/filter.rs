//! Local Filter/Sort Engine
//!
//! Pure derivation of the displayed rows from the raw collection and the
//! filter/sort controls. Same inputs always give the same output.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Accessors the engine needs from a row
pub trait Filterable {
    /// String value of a named field, `None` when absent
    fn field(&self, name: &str) -> Option<&str>;

    /// Key for the name sorts
    fn sort_name(&self) -> &str;

    /// Key for the date sorts, milliseconds since the epoch
    fn sort_time(&self) -> Option<i64>;
}

/// Value of one categorical filter
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterValue {
    /// No constraint for this key
    #[default]
    Any,
    /// Field must equal this value exactly
    Exact(String),
}

impl FilterValue {
    /// Option value the select controls use for "all"
    pub const ANY_OPTION: &'static str = "";

    /// Map a select control value; the empty option means no constraint.
    pub fn from_option(value: &str) -> Self {
        if value == Self::ANY_OPTION {
            FilterValue::Any
        } else {
            FilterValue::Exact(value.to_string())
        }
    }

    pub fn as_option(&self) -> &str {
        match self {
            FilterValue::Any => Self::ANY_OPTION,
            FilterValue::Exact(v) => v,
        }
    }

    fn accepts(&self, value: Option<&str>) -> bool {
        match self {
            FilterValue::Any => true,
            FilterValue::Exact(expected) => value == Some(expected.as_str()),
        }
    }
}

/// Search text plus categorical filters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    search: String,
    search_fields: Vec<String>,
    filters: BTreeMap<String, FilterValue>,
}

impl FilterCriteria {
    /// Criteria searching over `search_fields`
    pub fn new(search_fields: &[&str]) -> Self {
        Self {
            search_fields: search_fields.iter().map(|f| f.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search = query.into();
        self
    }

    pub fn with_filter(mut self, key: impl Into<String>, value: FilterValue) -> Self {
        self.set_filter(key, value);
        self
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_filter(&mut self, key: impl Into<String>, value: FilterValue) {
        match value {
            FilterValue::Any => {
                self.filters.remove(&key.into());
            }
            exact => {
                self.filters.insert(key.into(), exact);
            }
        }
    }

    pub fn filter(&self, key: &str) -> &FilterValue {
        static ANY: FilterValue = FilterValue::Any;
        self.filters.get(key).unwrap_or(&ANY)
    }

    /// True if `row` passes the search and every categorical filter.
    pub fn matches<T: Filterable>(&self, row: &T) -> bool {
        self.matches_search(row)
            && self
                .filters
                .iter()
                .all(|(key, value)| value.accepts(row.field(key)))
    }

    fn matches_search<T: Filterable>(&self, row: &T) -> bool {
        let query = self.search.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.search_fields.iter().any(|name| {
            row.field(name)
                .map(|value| value.to_lowercase().contains(&query))
                .unwrap_or(false)
        })
    }
}

/// Sort options offered by list pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortSpec {
    #[default]
    Newest,
    Oldest,
    NameAsc,
    NameDesc,
}

impl SortSpec {
    pub const ALL: [SortSpec; 4] = [SortSpec::Newest, SortSpec::Oldest, SortSpec::NameAsc, SortSpec::NameDesc];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortSpec::Newest => "newest",
            SortSpec::Oldest => "oldest",
            SortSpec::NameAsc => "name_asc",
            SortSpec::NameDesc => "name_desc",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|spec| spec.as_str() == value)
    }

    /// Total order over two rows; equal keys compare `Equal`.
    pub fn compare<T: Filterable>(&self, a: &T, b: &T) -> Ordering {
        match self {
            SortSpec::Newest => b.sort_time().cmp(&a.sort_time()),
            SortSpec::Oldest => a.sort_time().cmp(&b.sort_time()),
            SortSpec::NameAsc => compare_names(a.sort_name(), b.sort_name()),
            SortSpec::NameDesc => compare_names(b.sort_name(), a.sort_name()),
        }
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Displayed rows: matching items in sort order, ties kept in input order.
pub fn derive<T: Filterable + Clone>(items: &[T], criteria: &FilterCriteria, sort: SortSpec) -> Vec<T> {
    let mut rows: Vec<T> = items.iter().filter(|row| criteria.matches(*row)).cloned().collect();
    rows.sort_by(|a, b| sort.compare(a, b));
    rows
}

/// Parse a backend timestamp into epoch milliseconds.
///
/// Accepts RFC 3339, zone-less ISO date-times (read as UTC) and plain dates.
pub fn parse_timestamp(value: &str) -> Option<i64> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.timestamp_millis());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Row;

    fn rows() -> Vec<Row> {
        vec![
            Row::new("1", "Smart Farming").status("PENDING").code("PRJ-001").created("2024-03-01T08:00:00"),
            Row::new("2", "Cyber Range").status("APPROVED").code("PRJ-002").created("2024-01-15T08:00:00"),
            Row::new("3", "big data lab").status("PENDING").code("PRJ-003").created("2024-02-10"),
            Row::new("4", "GIS Mapper").status("REJECTED").code("GIS-004"),
        ]
    }

    fn ids(rows: &[Row]) -> Vec<&str> {
        rows.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_status_filter_scenario() {
        let items = vec![Row::new("1", "A").status("PENDING"), Row::new("2", "B").status("APPROVED")];
        let criteria = FilterCriteria::new(&["name"]).with_filter("status", FilterValue::Exact("PENDING".into()));
        let out = derive(&items, &criteria, SortSpec::Newest);
        assert_eq!(ids(&out), ["1"]);
    }

    #[test]
    fn test_result_is_subset_satisfying_predicate() {
        let items = rows();
        let criteria = FilterCriteria::new(&["name", "code"])
            .with_search("a")
            .with_filter("status", FilterValue::Exact("PENDING".into()));
        let out = derive(&items, &criteria, SortSpec::NameAsc);
        assert!(!out.is_empty());
        for row in &out {
            assert!(items.contains(row));
            assert!(criteria.matches(row));
            assert_eq!(row.status, "PENDING");
        }
    }

    #[test]
    fn test_search_is_case_insensitive_over_any_field() {
        let items = rows();
        let by_name = FilterCriteria::new(&["name", "code"]).with_search("BIG DATA");
        assert_eq!(ids(&derive(&items, &by_name, SortSpec::NameAsc)), ["3"]);

        let by_code = FilterCriteria::new(&["name", "code"]).with_search("gis-");
        assert_eq!(ids(&derive(&items, &by_code, SortSpec::NameAsc)), ["4"]);

        let not_configured = FilterCriteria::new(&["name"]).with_search("prj-002");
        assert!(derive(&items, &not_configured, SortSpec::NameAsc).is_empty());
    }

    #[test]
    fn test_empty_search_and_any_filter_match_everything() {
        let items = rows();
        let criteria = FilterCriteria::new(&["name"])
            .with_search("   ")
            .with_filter("status", FilterValue::Any);
        assert_eq!(derive(&items, &criteria, SortSpec::Oldest).len(), items.len());
    }

    #[test]
    fn test_any_option_never_collides_with_a_category() {
        assert_eq!(FilterValue::from_option(""), FilterValue::Any);
        assert_eq!(FilterValue::from_option("ALL"), FilterValue::Exact("ALL".into()));
        let items = vec![Row::new("1", "A").status("ALL"), Row::new("2", "B").status("PENDING")];
        let criteria = FilterCriteria::new(&[]).with_filter("status", FilterValue::from_option("ALL"));
        assert_eq!(ids(&derive(&items, &criteria, SortSpec::Newest)), ["1"]);
    }

    #[test]
    fn test_missing_field_fails_active_filter() {
        let items = vec![Row::new("1", "A")];
        let criteria = FilterCriteria::new(&[]).with_filter("division", FilterValue::Exact("GIS".into()));
        assert!(derive(&items, &criteria, SortSpec::Newest).is_empty());
    }

    #[test]
    fn test_setting_any_removes_constraint() {
        let mut criteria = FilterCriteria::new(&[]).with_filter("status", FilterValue::Exact("X".into()));
        criteria.set_filter("status", FilterValue::Any);
        assert_eq!(criteria, FilterCriteria::new(&[]));
        assert_eq!(criteria.filter("status"), &FilterValue::Any);
    }

    #[test]
    fn test_derive_is_deterministic() {
        let items = rows();
        let criteria = FilterCriteria::new(&["name"]).with_search("a");
        let first = derive(&items, &criteria, SortSpec::Newest);
        let _ = derive(&items, &FilterCriteria::default(), SortSpec::NameDesc);
        let second = derive(&items, &criteria, SortSpec::Newest);
        assert_eq!(first, second);
    }

    #[test]
    fn test_name_desc_reverses_name_asc() {
        let items = rows();
        let criteria = FilterCriteria::default();
        let asc = derive(&items, &criteria, SortSpec::NameAsc);
        let mut desc = derive(&items, &criteria, SortSpec::NameDesc);
        desc.reverse();
        assert_eq!(asc, desc);
        assert_eq!(ids(&asc), ["3", "2", "4", "1"]);
    }

    #[test]
    fn test_names_differing_only_in_case_are_totally_ordered() {
        let items = vec![Row::new("1", "alpha"), Row::new("2", "Alpha")];
        let asc = derive(&items, &FilterCriteria::default(), SortSpec::NameAsc);
        let mut desc = derive(&items, &FilterCriteria::default(), SortSpec::NameDesc);
        desc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn test_date_sorts_put_undated_rows_last_for_newest() {
        let items = rows();
        let newest = derive(&items, &FilterCriteria::default(), SortSpec::Newest);
        assert_eq!(ids(&newest), ["1", "3", "2", "4"]);
        let oldest = derive(&items, &FilterCriteria::default(), SortSpec::Oldest);
        assert_eq!(ids(&oldest), ["4", "2", "3", "1"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let items = vec![
            Row::new("a", "Same").created("2024-01-01"),
            Row::new("b", "Other").created("2024-01-01"),
            Row::new("c", "Third").created("2024-01-01"),
        ];
        let out = derive(&items, &FilterCriteria::default(), SortSpec::Newest);
        assert_eq!(ids(&out), ["a", "b", "c"]);
    }

    #[test]
    fn test_sort_spec_round_trips_option_values() {
        for spec in SortSpec::ALL {
            assert_eq!(SortSpec::parse(spec.as_str()), Some(spec));
        }
        assert_eq!(SortSpec::parse("bogus"), None);
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let day = parse_timestamp("2024-02-10").unwrap();
        assert_eq!(parse_timestamp("2024-02-10T00:00:00"), Some(day));
        assert_eq!(parse_timestamp("2024-02-10T00:00:00.000"), Some(day));
        assert_eq!(parse_timestamp("2024-02-10T07:00:00+07:00"), Some(day));
        assert_eq!(parse_timestamp("2024-02-10 00:00:00"), Some(day));
        assert_eq!(parse_timestamp("yesterday"), None);
    }
}
