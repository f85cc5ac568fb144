//! Patient Tool
//!
//! Visitor-facing patient lookups: who is in which room, and how to get there.

use std::sync::Arc;

use async_trait::async_trait;

use super::{action_parameter, bullet_list, text_parameter};
use crate::data::{HospitalData, Patient};
use crate::error::{Result, ServerError};
use crate::tool::{Tool, ToolCall, ToolResult, ToolSchema};

const NAME: &str = "patients";
const ACTIONS: &[&str] = &["list", "find", "room", "disease", "doctor", "floor", "directions"];

pub struct PatientTool {
    data: Arc<HospitalData>,
}

impl PatientTool {
    pub const fn new(data: Arc<HospitalData>) -> Self {
        Self { data }
    }

    fn run(&self, call: &ToolCall) -> Result<String> {
        match call.require("action")? {
            "list" => Ok(bullet_list(
                "Current patients:",
                self.data.patients().iter().map(summary),
                "No patient data available.",
            )),
            "find" => {
                let p = self.data.find_patient(call.require("name")?)?;
                Ok(format!(
                    "**{}**\n- Age: {}, Gender: {}\n- Room: {}\n- Location: {}, {}\n- Condition: {}\n- Admitted: {}\n- Relative: {} ({})",
                    p.patient_name,
                    p.age,
                    p.gender,
                    p.room_number,
                    p.floor,
                    p.building,
                    p.disease,
                    p.admitted_date,
                    p.relative_name,
                    p.relative_contact
                ))
            }
            "room" => {
                let room = call.require("room")?;
                let p = self.data.patient_in_room(room)?;
                Ok(format!(
                    "**Room {room}**\n- Patient: {}\n- Age: {}, Gender: {}\n- Condition: {}\n- Relative: {} ({})",
                    p.patient_name, p.age, p.gender, p.disease, p.relative_name, p.relative_contact
                ))
            }
            "disease" => {
                let disease = call.require("disease")?;
                Ok(bullet_list(
                    &format!("Patients with {disease}:"),
                    self.data.patients_with_disease(disease).into_iter().map(summary),
                    &format!("No patients found with disease: {disease}"),
                ))
            }
            "doctor" => {
                let doctor_id = call.require("doctor_id")?;
                Ok(bullet_list(
                    &format!("Patients of doctor {doctor_id}:"),
                    self.data.patients_of_doctor(doctor_id).into_iter().map(summary),
                    &format!("No patients found for doctor {doctor_id}."),
                ))
            }
            "floor" => {
                let floor = call.require("floor")?;
                Ok(bullet_list(
                    &format!("Patients on {floor}:"),
                    self.data.patients_on_floor(floor).into_iter().map(summary),
                    &format!("No patients found on {floor}."),
                ))
            }
            "directions" => {
                let p = self.data.find_patient(call.require("name")?)?;
                Ok(format!(
                    "**Directions to {}**\n- Room: {}\n- Location: {}, {}\n\n{}",
                    p.patient_name, p.room_number, p.floor, p.building, p.direction_to_room
                ))
            }
            other => Err(ServerError::ToolValidation(format!("Unknown action: {other}"))),
        }
    }
}

fn summary(p: &Patient) -> String {
    format!("{}, room {} ({})", p.patient_name, p.room_number, p.disease)
}

#[async_trait]
impl Tool for PatientTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: NAME.into(),
            description: "Patients by name, room, condition, doctor or floor, and directions to their room".into(),
            parameters: vec![
                action_parameter(ACTIONS),
                text_parameter("name", "Patient name or part of it"),
                text_parameter("room", "Room number, e.g. '301' or 'ICU-05'"),
                text_parameter("disease", "Condition"),
                text_parameter("doctor_id", "Attending doctor ID"),
                text_parameter("floor", "Floor"),
            ],
            category: Some("directory".into()),
        }
    }

    async fn execute(&self, call: &ToolCall) -> Result<ToolResult> {
        ToolResult::from_lookup(NAME, self.run(call))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixture;

    async fn run(call: ToolCall) -> ToolResult {
        PatientTool::new(Arc::new(fixture())).execute(&call).await.unwrap()
    }

    #[tokio::test]
    async fn test_directions() {
        let output = run(ToolCall::new(NAME).arg("action", "directions").arg("name", "John Smith"))
            .await
            .output;
        assert!(output.starts_with("**Directions to John Smith**\n- Room: 301"));
        assert!(output.ends_with("room 301 is the second door on the right."));
    }

    #[tokio::test]
    async fn test_room_lookup() {
        let output = run(ToolCall::new(NAME).arg("action", "room").arg("room", "ICU-05")).await.output;
        assert!(output.contains("- Patient: Robert Brown"));

        let result = run(ToolCall::new(NAME).arg("action", "room").arg("room", "404")).await;
        assert!(!result.success);
    }

    #[tokio::test]
    async fn test_listings() {
        let output = run(ToolCall::new(NAME).arg("action", "disease").arg("disease", "pneumonia"))
            .await
            .output;
        assert_eq!(output, "**Patients with pneumonia:**\n- Robert Brown, room ICU-05 (Pneumonia)");

        let output = run(ToolCall::new(NAME).arg("action", "list")).await.output;
        assert_eq!(output.matches("\n- ").count(), 3);
    }
}
