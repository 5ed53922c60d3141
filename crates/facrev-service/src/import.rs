//! CSV faculty import.
//!
//! The admin uploads a CSV with at least `name`, `department`, and
//! `title` columns (any order, extra columns ignored). Rows missing a
//! name or department are skipped rather than failing the batch; a file
//! that yields zero usable rows is an error.

use std::io::Read;

use csv::ReaderBuilder;
use tracing::debug;

use facrev_core::FacultyDraft;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    #[error("No importable rows found")]
    Empty,
}

const REQUIRED_COLUMNS: [&str; 3] = ["name", "department", "title"];

/// Parse CSV bytes into faculty drafts.
pub fn parse_faculty_csv(input: impl Read) -> Result<Vec<FacultyDraft>, ImportError> {
    let mut reader = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    let mut column = [0usize; 3];
    for (i, wanted) in REQUIRED_COLUMNS.iter().enumerate() {
        column[i] = headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(wanted))
            .ok_or(ImportError::MissingColumn(REQUIRED_COLUMNS[i]))?;
    }
    let [name_col, department_col, title_col] = column;

    let mut drafts = Vec::new();
    let mut skipped = 0usize;
    for record in reader.records() {
        let record = record?;
        let field = |col: usize| record.get(col).unwrap_or("").trim().to_string();
        let name = field(name_col);
        let department = field(department_col);
        if name.is_empty() || department.is_empty() {
            skipped += 1;
            continue;
        }
        let mut title = field(title_col);
        if title.is_empty() {
            title = "Faculty".to_string();
        }
        drafts.push(FacultyDraft {
            name,
            department,
            title,
        });
    }

    if skipped > 0 {
        debug!(skipped, "skipped incomplete CSV rows");
    }
    if drafts.is_empty() {
        return Err(ImportError::Empty);
    }
    Ok(drafts)
}
