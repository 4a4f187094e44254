//! Free-text search and counting over in-memory lists.
//!
//! Every listing page filters its table with the same rule: a record matches
//! when one of its searchable fields contains the query, ignoring case. An
//! empty query matches everything. Results keep insertion order.

/// A record that exposes the text fields a search box looks at
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

/// Case-insensitive substring match over the record's searchable fields
pub fn matches_query<T: Searchable>(record: &T, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    record
        .search_fields()
        .into_iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Whether two identifiers (book numbers, property numbers, borrower names)
/// name the same thing. Uses the same case folding as [`matches_query`].
pub fn same_key(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Keep the records matching `query`, in their original order
pub fn filter_by_query<'a, T: Searchable>(records: &'a [T], query: Option<&str>) -> Vec<&'a T> {
    match query {
        Some(q) => records.iter().filter(|r| matches_query(*r, q)).collect(),
        None => records.iter().collect(),
    }
}

/// Count records satisfying `pred` (summary cards)
pub fn count_where<T, F>(records: &[T], pred: F) -> i64
where
    F: Fn(&T) -> bool,
{
    records.iter().filter(|r| pred(r)).count() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(&'static str, &'static str);

    impl Searchable for Row {
        fn search_fields(&self) -> Vec<&str> {
            vec![self.0, self.1]
        }
    }

    #[test]
    fn same_key_folds_case_beyond_ascii() {
        assert!(same_key(" José Peña ", "JOSÉ PEÑA"));
        assert!(same_key("inv-ics-001", "INV-ICS-001"));
        assert!(!same_key("B1002", "B10021"));
    }

    #[test]
    fn blank_query_matches_everything() {
        let rows = vec![Row("a", "b"), Row("c", "d")];
        assert_eq!(filter_by_query(&rows, Some("   ")).len(), 2);
        assert_eq!(filter_by_query(&rows, None).len(), 2);
    }

    #[test]
    fn match_ignores_case_and_checks_every_field() {
        let rows = vec![Row("Web Design", "x"), Row("Other", "WEBSTER"), Row("None", "none")];
        let found: Vec<&str> = filter_by_query(&rows, Some("wEb")).iter().map(|r| r.0).collect();
        assert_eq!(found, vec!["Web Design", "Other"]);
    }

    #[test]
    fn count_where_counts_matching_records() {
        let values = [1, 2, 3, 4, 5];
        assert_eq!(count_where(&values, |v| v % 2 == 1), 3);
        assert_eq!(count_where(&[] as &[i32], |_| true), 0);
    }
}
