use crate::report::violation::DisplayRow;

/// Normalize a raw search term: trimmed and lower-cased.
pub fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Whether any non-empty cell of `row` contains the normalized `term`.
fn row_matches(row: &DisplayRow, term: &str) -> bool {
    row.cells()
        .filter_map(|(_, cell)| cell)
        .filter(|value| !value.is_empty())
        .any(|value| value.to_lowercase().contains(term))
}

/// Positions of the rows matching `term`, in dataset order.
///
/// An empty term (after trimming) selects every row.
pub fn matching_indices(rows: &[DisplayRow], term: &str) -> Vec<usize> {
    let term = normalize_term(term);
    if term.is_empty() {
        return (0..rows.len()).collect();
    }

    rows.iter()
        .enumerate()
        .filter(|(_, row)| row_matches(row, &term))
        .map(|(i, _)| i)
        .collect()
}

/// Narrow `rows` to those containing `term` in any field, case-insensitively.
pub fn filter<'a>(rows: &'a [DisplayRow], term: &str) -> Vec<&'a DisplayRow> {
    matching_indices(rows, term)
        .into_iter()
        .map(|i| &rows[i])
        .collect()
}
