//! Departments, doctors and patients
//!
//! Name, floor, building, specialization, day and disease lookups are
//! case-insensitive substring matches; ids and room numbers must match whole.

use serde::Deserialize;

use super::{HospitalData, contains_ci};
use crate::error::{Result, ServerError};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Department {
    #[serde(default)]
    pub department_id: String,
    pub department_name: String,
    pub floor: String,
    pub building: String,
    #[serde(default)]
    pub contact_extension: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Doctor {
    #[serde(default)]
    pub doctor_id: String,
    pub doctor_name: String,
    pub specialization: String,
    #[serde(default)]
    pub department_id: String,
    #[serde(default)]
    pub available_days: String,
    #[serde(default)]
    pub available_time_start: String,
    #[serde(default)]
    pub available_time_end: String,
    #[serde(default)]
    pub years_experience: String,
    #[serde(default)]
    pub contact_number: String,
}

impl Doctor {
    /// Name without the "Dr." title
    pub fn plain_name(&self) -> &str {
        let name = self.doctor_name.trim();
        name.strip_prefix("Dr.")
            .or_else(|| name.strip_prefix("Dr "))
            .map_or(name, str::trim_start)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Patient {
    #[serde(default)]
    pub patient_id: String,
    pub patient_name: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub disease: String,
    pub room_number: String,
    #[serde(default)]
    pub floor: String,
    #[serde(default)]
    pub building: String,
    #[serde(default)]
    pub attending_doctor_id: String,
    #[serde(default)]
    pub admitted_date: String,
    #[serde(default)]
    pub relative_name: String,
    #[serde(default)]
    pub relative_contact: String,
    #[serde(default)]
    pub direction_to_room: String,
}

impl HospitalData {
    pub fn find_department(&self, name: &str) -> Result<&Department> {
        self.departments
            .iter()
            .find(|d| contains_ci(&d.department_name, name))
            .ok_or_else(|| ServerError::NotFound(format!("Department '{name}' not found")))
    }

    pub fn departments_on_floor(&self, floor: &str) -> Vec<&Department> {
        self.departments.iter().filter(|d| contains_ci(&d.floor, floor)).collect()
    }

    pub fn departments_in_building(&self, building: &str) -> Vec<&Department> {
        self.departments
            .iter()
            .filter(|d| contains_ci(&d.building, building))
            .collect()
    }

    pub fn find_doctor(&self, name: &str) -> Result<&Doctor> {
        self.doctors
            .iter()
            .find(|d| contains_ci(&d.doctor_name, name))
            .ok_or_else(|| ServerError::NotFound(format!("Doctor '{name}' not found")))
    }

    pub fn doctors_by_specialization(&self, specialization: &str) -> Vec<&Doctor> {
        self.doctors
            .iter()
            .filter(|d| contains_ci(&d.specialization, specialization))
            .collect()
    }

    pub fn doctors_in_department(&self, department_id: &str) -> Vec<&Doctor> {
        self.doctors
            .iter()
            .filter(|d| d.department_id.eq_ignore_ascii_case(department_id.trim()))
            .collect()
    }

    pub fn doctors_on_day(&self, day: &str) -> Vec<&Doctor> {
        self.doctors
            .iter()
            .filter(|d| contains_ci(&d.available_days, day))
            .collect()
    }

    pub fn find_patient(&self, name: &str) -> Result<&Patient> {
        self.patients
            .iter()
            .find(|p| contains_ci(&p.patient_name, name))
            .ok_or_else(|| ServerError::NotFound(format!("Patient '{name}' not found")))
    }

    pub fn patient_in_room(&self, room: &str) -> Result<&Patient> {
        self.patients
            .iter()
            .find(|p| p.room_number.eq_ignore_ascii_case(room.trim()))
            .ok_or_else(|| ServerError::NotFound(format!("No patient found in room '{room}'")))
    }

    pub fn patients_with_disease(&self, disease: &str) -> Vec<&Patient> {
        self.patients
            .iter()
            .filter(|p| contains_ci(&p.disease, disease))
            .collect()
    }

    pub fn patients_of_doctor(&self, doctor_id: &str) -> Vec<&Patient> {
        self.patients
            .iter()
            .filter(|p| p.attending_doctor_id.eq_ignore_ascii_case(doctor_id.trim()))
            .collect()
    }

    pub fn patients_on_floor(&self, floor: &str) -> Vec<&Patient> {
        self.patients.iter().filter(|p| contains_ci(&p.floor, floor)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixture;

    #[test]
    fn test_department_lookups() {
        let data = fixture();
        let cardiology = data.find_department("cardio").unwrap();
        assert_eq!(cardiology.floor, "First Floor");
        assert_eq!(cardiology.contact_extension, "210");

        let ground: Vec<_> = data
            .departments_on_floor("ground floor")
            .iter()
            .map(|d| d.department_name.as_str())
            .collect();
        assert_eq!(ground, ["Emergency", "Radiology"]);
        assert_eq!(data.departments_in_building("East Wing").len(), 2);
        assert!(data.find_department("Oncology").is_err());
    }

    #[test]
    fn test_doctor_lookups() {
        let data = fixture();
        let doctor = data.find_doctor("sarah johnson").unwrap();
        assert_eq!(doctor.specialization, "Cardiologist");
        assert_eq!(doctor.plain_name(), "Sarah Johnson");

        assert_eq!(data.doctors_by_specialization("pediatric").len(), 1);
        assert_eq!(data.doctors_in_department("D01")[0].doctor_name, "Dr. Aisha Patel");
        assert_eq!(data.doctors_on_day("monday").len(), 2);
        assert!(data.doctors_on_day("Sunday").is_empty());
    }

    #[test]
    fn test_patient_lookups() {
        let data = fixture();
        let patient = data.find_patient("emma").unwrap();
        assert_eq!(patient.room_number, "205");
        assert!(patient.direction_to_room.contains("East Wing"));

        assert_eq!(data.patient_in_room("icu-05").unwrap().patient_name, "Robert Brown");
        assert_eq!(
            data.patient_in_room("999").unwrap_err().to_string(),
            "No patient found in room '999'"
        );
        assert_eq!(data.patients_with_disease("asthma").len(), 1);
        assert_eq!(data.patients_of_doctor("DR01")[0].patient_name, "John Smith");
        assert_eq!(data.patients_on_floor("first").len(), 1);
    }
}
