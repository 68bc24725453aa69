mod parser;

use std::io::Read;
use std::path::Path;

use crate::leave::domain::Employee;

/// Failure while ingesting a personnel template export.
#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingColumns(Vec<String>),
    MissingField { line: usize, field: &'static str },
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read roster export: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
            RosterImportError::MissingColumns(columns) => write!(
                f,
                "roster export is missing required column(s): {}",
                columns.join(", ")
            ),
            RosterImportError::MissingField { line, field } => {
                write!(f, "row {} has no value for required column {}", line, field)
            }
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
            RosterImportError::MissingColumns(_) | RosterImportError::MissingField { .. } => None,
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads a personnel template export and assigns sequential roster ids.
///
/// Required columns are the tax id, the three name parts, and the position;
/// the remaining template columns are optional and resolve to `None` here,
/// once, whether the column is absent or the cell is blank.
pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Employee>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Employee>, RosterImportError> {
        parser::parse_roster(reader)
    }
}
