//! Doctor Tool

use std::sync::Arc;

use async_trait::async_trait;

use super::{action_parameter, bullet_list, text_parameter};
use crate::data::{Doctor, HospitalData};
use crate::error::{Result, ServerError};
use crate::tool::{Tool, ToolCall, ToolResult, ToolSchema};

const NAME: &str = "doctors";
const ACTIONS: &[&str] = &["list", "find", "specialization", "department", "on_day"];

/// Doctors, their specializations and when they can be seen
pub struct DoctorTool {
    data: Arc<HospitalData>,
}

impl DoctorTool {
    pub const fn new(data: Arc<HospitalData>) -> Self {
        Self { data }
    }

    fn run(&self, call: &ToolCall) -> Result<String> {
        match call.require("action")? {
            "list" => Ok(bullet_list(
                "Hospital doctors:",
                self.data.doctors().iter().map(summary),
                "No doctor data available.",
            )),
            "find" => {
                let doctor = self.data.find_doctor(call.require("name")?)?;
                Ok(format!(
                    "**{}**\n- Specialization: {}\n- Experience: {} years\n- Available: {}, {}\n- Contact: {}",
                    doctor.doctor_name,
                    doctor.specialization,
                    doctor.years_experience,
                    doctor.available_days,
                    hours(doctor),
                    doctor.contact_number
                ))
            }
            "specialization" => {
                let specialization = call.require("specialization")?;
                Ok(bullet_list(
                    &format!("Doctors specializing in {specialization}:"),
                    self.data
                        .doctors_by_specialization(specialization)
                        .into_iter()
                        .map(summary),
                    &format!("No doctors found with specialization: {specialization}"),
                ))
            }
            "department" => {
                let department_id = call.require("department_id")?;
                Ok(bullet_list(
                    &format!("Doctors in department {department_id}:"),
                    self.data
                        .doctors_in_department(department_id)
                        .into_iter()
                        .map(summary),
                    &format!("No doctors found in department {department_id}."),
                ))
            }
            "on_day" => {
                let day = call.require("day")?;
                Ok(bullet_list(
                    &format!("Doctors available on {day}:"),
                    self.data
                        .doctors_on_day(day)
                        .into_iter()
                        .map(|d| format!("{} ({}), {}", d.doctor_name, d.specialization, hours(d))),
                    &format!("No doctors available on {day}."),
                ))
            }
            other => Err(ServerError::ToolValidation(format!("Unknown action: {other}"))),
        }
    }
}

fn hours(doctor: &Doctor) -> String {
    format!("{}-{}", doctor.available_time_start, doctor.available_time_end)
}

fn summary(doctor: &Doctor) -> String {
    format!(
        "{} ({}): {}, {}",
        doctor.doctor_name,
        doctor.specialization,
        doctor.available_days,
        hours(doctor)
    )
}

#[async_trait]
impl Tool for DoctorTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: NAME.into(),
            description: "Doctors by name, specialization, department or day, with their hours".into(),
            parameters: vec![
                action_parameter(ACTIONS),
                text_parameter("name", "Doctor name or part of it"),
                text_parameter("specialization", "e.g. 'Cardiologist'"),
                text_parameter("department_id", "Department ID, e.g. 'D02'"),
                text_parameter("day", "Day of the week"),
            ],
            category: Some("directory".into()),
        }
    }

    async fn execute(&self, call: &ToolCall) -> Result<ToolResult> {
        ToolResult::from_lookup(NAME, self.run(call))
    }
}
