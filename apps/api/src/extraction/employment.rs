//! Employment table recovery from flattened PDF text.
//!
//! The form renders employment history as a table, but text extraction loses
//! the geometry and emits one cell per line with no delimiters. Rows are
//! recovered by positional chunking on a fixed column count.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Columns in the employment table: employer, job description, start, end, contact.
pub const EMPLOYMENT_COLUMNS: usize = 5;

const SECTION_MARKER: &str = "Employer";
const SECTION_END_MARKER: &str = "Employment List";
const HEADER_LAST_COLUMN: &str = "Contact Name";
const EMPTY_TABLE_MARKER: &str = "No Records Found";

/// One row of the employment table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentRecord {
    pub employer: String,
    pub job_description: String,
    pub start_date: String,
    pub end_date: String,
    pub contact_name: String,
}

impl EmploymentRecord {
    fn from_row(row: &[&str]) -> Self {
        EmploymentRecord {
            employer: row[0].to_string(),
            job_description: row[1].to_string(),
            start_date: row[2].to_string(),
            end_date: row[3].to_string(),
            contact_name: row[4].to_string(),
        }
    }
}

/// Extracts employment rows from normalized form text.
///
/// Returns an empty list when the section marker is missing or the table reports
/// no records. A trailing partial row is dropped.
pub fn extract_employment(text: &str) -> Vec<EmploymentRecord> {
    let Some((_, block)) = text.split_once(SECTION_MARKER) else {
        return Vec::new();
    };
    let block = match block.split_once(SECTION_END_MARKER) {
        Some((head, _)) => head,
        None => block,
    };

    let lines: Vec<&str> = block
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    // Without a recognizable header row, treat the whole block as data.
    let data = match lines.iter().position(|line| *line == HEADER_LAST_COLUMN) {
        Some(header_end) => &lines[header_end + 1..],
        None => &lines[..],
    };

    if data
        .first()
        .is_some_and(|first| first.eq_ignore_ascii_case(EMPTY_TABLE_MARKER))
    {
        return Vec::new();
    }

    let rows: Vec<EmploymentRecord> = data
        .chunks_exact(EMPLOYMENT_COLUMNS)
        .map(EmploymentRecord::from_row)
        .collect();

    let leftover = data.len() % EMPLOYMENT_COLUMNS;
    if leftover > 0 {
        debug!("Dropping {leftover} trailing employment line(s) that do not fill a row");
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Employer\nJob Description\nStart Date\nEnd Date\nContact Name\n";

    fn data_lines(n: usize) -> String {
        (0..n).map(|i| format!("cell {i}\n")).collect()
    }

    #[test]
    fn test_missing_marker_returns_empty() {
        assert!(extract_employment("First Name: Ada\nLast Name: Lovelace").is_empty());
    }

    #[test]
    fn test_no_records_found_returns_empty() {
        let text = format!("Employment History\n{HEADER}No Records Found\n");
        assert!(extract_employment(&text).is_empty());
    }

    #[test]
    fn test_no_records_found_is_case_insensitive() {
        let text = format!("{HEADER}  no records found  \n");
        assert!(extract_employment(&text).is_empty());
    }

    #[test]
    fn test_ten_lines_yield_two_rows_in_column_order() {
        let text = format!(
            "{HEADER}Acme Ltd\nWarehouse operative\n2019-01\n2020-06\nJ. Smith\n\
             Globex\nBarista\n2020-07\n2022-03\nM. Jones\n"
        );
        let rows = extract_employment(&text);
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            EmploymentRecord {
                employer: "Acme Ltd".to_string(),
                job_description: "Warehouse operative".to_string(),
                start_date: "2019-01".to_string(),
                end_date: "2020-06".to_string(),
                contact_name: "J. Smith".to_string(),
            }
        );
        assert_eq!(rows[1].employer, "Globex");
        assert_eq!(rows[1].contact_name, "M. Jones");
    }

    #[test]
    fn test_trailing_partial_row_is_dropped() {
        let text = format!("{HEADER}{}", data_lines(12));
        let rows = extract_employment(&text);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].contact_name, "cell 9");
    }

    #[test]
    fn test_missing_header_treats_block_as_data() {
        // Everything after the "Employer" marker is data when no header row is found.
        let text = "Employer\nAcme\nClerk\n2020-01\n2021-01\nBoss\n";
        let rows = extract_employment(text);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].employer, "Acme");
    }

    #[test]
    fn test_block_is_truncated_at_employment_list() {
        let text = format!("{HEADER}{}Employment List\nignored 1\nignored 2\nignored 3\nignored 4\nignored 5\n", data_lines(5));
        let rows = extract_employment(&text);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].employer, "cell 0");
    }

    #[test]
    fn test_blank_lines_between_cells_are_ignored() {
        let text = format!("{HEADER}\nA\n\nB\n  \nC\nD\nE\n");
        let rows = extract_employment(&text);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].job_description, "B");
    }
}
