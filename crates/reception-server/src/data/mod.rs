//! Hospital Data
//!
//! The CSV tables the reception desk answers from: daily per-hospital trend
//! rows, departments, doctors and patients. Loaded once at startup and
//! read-only afterwards.

mod directory;
mod trends;

use std::{fs::File, path::Path};

use serde::de::DeserializeOwned;

use crate::error::Result;

pub use directory::{Department, Doctor, Patient};
use trends::HospitalRecord;

pub const TRENDS_FILE: &str = "hospital_trends.csv";
pub const DEPARTMENTS_FILE: &str = "department.csv";
pub const DOCTORS_FILE: &str = "doctor.csv";
pub const PATIENTS_FILE: &str = "patient.csv";

/// Every table the reception desk can look things up in
#[derive(Debug, Default)]
pub struct HospitalData {
    records: Vec<HospitalRecord>,
    columns: Vec<String>,
    departments: Vec<Department>,
    doctors: Vec<Doctor>,
    patients: Vec<Patient>,
}

impl HospitalData {
    /// Load the tables found in `dir`. A missing file leaves its table empty;
    /// a malformed one is an error.
    pub fn load(dir: &Path) -> Result<Self> {
        let (records, columns) = match open(dir, TRENDS_FILE)? {
            Some(reader) => trends::read(reader)?,
            None => (Vec::new(), Vec::new()),
        };

        Ok(Self {
            records,
            columns,
            departments: read_table(dir, DEPARTMENTS_FILE)?,
            doctors: read_table(dir, DOCTORS_FILE)?,
            patients: read_table(dir, PATIENTS_FILE)?,
        })
    }

    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    /// Column names of the trend table, in file order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

fn open(dir: &Path, name: &str) -> Result<Option<csv::Reader<File>>> {
    let path = dir.join(name);
    if !path.is_file() {
        tracing::warn!(path = %path.display(), "Hospital table missing, starting empty");
        return Ok(None);
    }

    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(&path)?;
    Ok(Some(reader))
}

fn read_table<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<Vec<T>> {
    let Some(mut reader) = open(dir, name)? else {
        return Ok(Vec::new());
    };

    let rows = reader
        .deserialize()
        .collect::<std::result::Result<Vec<T>, csv::Error>>()?;
    tracing::debug!(table = name, rows = rows.len(), "Loaded hospital table");
    Ok(rows)
}

/// Case-insensitive substring match
fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
pub(crate) fn fixture() -> HospitalData {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    HospitalData::load(&dir).expect("fixture tables load")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_tables_load() {
        let data = fixture();
        assert_eq!(data.records.len(), 6);
        assert_eq!(data.columns().len(), 28);
        assert_eq!(data.departments().len(), 4);
        assert_eq!(data.doctors().len(), 3);
        assert_eq!(data.patients().len(), 3);
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let data = HospitalData::load(Path::new("no-such-data-dir")).unwrap();
        assert_eq!(data.hospital_count(), 0);
        assert!(data.date_range().is_none());
        assert!(data.departments().is_empty());
    }

    #[test]
    fn test_malformed_table_is_an_error() {
        let dir = std::env::temp_dir().join(format!("reception-bad-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(TRENDS_FILE), "hospital_id,hospital_name\nH001\n").unwrap();

        let result = HospitalData::load(&dir);
        std::fs::remove_dir_all(&dir).ok();

        assert!(matches!(result, Err(crate::error::ServerError::Data(_))));
    }
}
