use std::io::Read;

use serde::{Deserialize, Deserializer};

use crate::leave::domain::{Employee, EmployeeId};

use super::RosterImportError;

pub(crate) const REQUIRED_COLUMNS: [&str; 5] = ["RFC", "PATERNO", "MATERNO", "NOMBRE", "PUESTO"];

pub(crate) fn parse_roster<R: Read>(reader: R) -> Result<Vec<Employee>, RosterImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .into_iter()
        .filter(|column| !headers.iter().any(|header| header == *column))
        .map(|column| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(RosterImportError::MissingColumns(missing));
    }

    let mut employees = Vec::new();
    for (index, record) in csv_reader.deserialize::<RosterRow>().enumerate() {
        let row = record?;
        // Data rows start at line 2; line 1 is the header.
        let line = index + 2;
        employees.push(row.into_employee(EmployeeId((index + 1) as u64), line)?);
    }

    Ok(employees)
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(rename = "RFC", default, deserialize_with = "empty_string_as_none")]
    rfc: Option<String>,
    #[serde(rename = "CURP", default, deserialize_with = "empty_string_as_none")]
    curp: Option<String>,
    #[serde(rename = "PATERNO", default, deserialize_with = "empty_string_as_none")]
    paternal_surname: Option<String>,
    #[serde(rename = "MATERNO", default, deserialize_with = "empty_string_as_none")]
    maternal_surname: Option<String>,
    #[serde(rename = "NOMBRE", default, deserialize_with = "empty_string_as_none")]
    given_names: Option<String>,
    #[serde(rename = "PLAZA", default, deserialize_with = "empty_string_as_none")]
    payroll_slot: Option<String>,
    #[serde(rename = "PUESTO", default, deserialize_with = "empty_string_as_none")]
    position: Option<String>,
    #[serde(
        rename = "BASE/INTERINO",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    contract: Option<String>,
    #[serde(rename = "C.C.T.", default, deserialize_with = "empty_string_as_none")]
    work_center_code: Option<String>,
    #[serde(
        rename = "CENTRO DE TRABAJO",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    work_center: Option<String>,
}

impl RosterRow {
    fn into_employee(self, id: EmployeeId, line: usize) -> Result<Employee, RosterImportError> {
        Ok(Employee {
            id,
            rfc: require(self.rfc, "RFC", line)?,
            curp: self.curp,
            paternal_surname: require(self.paternal_surname, "PATERNO", line)?,
            maternal_surname: require(self.maternal_surname, "MATERNO", line)?,
            given_names: require(self.given_names, "NOMBRE", line)?,
            position: require(self.position, "PUESTO", line)?,
            payroll_slot: self.payroll_slot,
            contract: self.contract,
            work_center_code: self.work_center_code,
            work_center: self.work_center,
        })
    }
}

fn require(
    value: Option<String>,
    field: &'static str,
    line: usize,
) -> Result<String, RosterImportError> {
    value.ok_or(RosterImportError::MissingField { line, field })
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
