//! Department Tool

use std::sync::Arc;

use async_trait::async_trait;

use super::{action_parameter, bullet_list, text_parameter};
use crate::data::{Department, HospitalData};
use crate::error::{Result, ServerError};
use crate::tool::{Tool, ToolCall, ToolResult, ToolSchema};

const NAME: &str = "departments";
const ACTIONS: &[&str] = &["list", "find", "on_floor", "in_building"];

/// Where departments are and how to reach them by phone
pub struct DepartmentTool {
    data: Arc<HospitalData>,
}

impl DepartmentTool {
    pub const fn new(data: Arc<HospitalData>) -> Self {
        Self { data }
    }

    fn run(&self, call: &ToolCall) -> Result<String> {
        match call.require("action")? {
            "list" => Ok(bullet_list(
                "Hospital departments:",
                self.data.departments().iter().map(summary),
                "No department data available.",
            )),
            "find" => {
                let dept = self.data.find_department(call.require("name")?)?;
                Ok(format!(
                    "**{}**\n- Location: {}, {}\n- Contact extension: {}",
                    dept.department_name, dept.floor, dept.building, dept.contact_extension
                ))
            }
            "on_floor" => {
                let floor = call.require("floor")?;
                Ok(bullet_list(
                    &format!("Departments on {floor}:"),
                    self.data
                        .departments_on_floor(floor)
                        .into_iter()
                        .map(|d| format!("{} ({})", d.department_name, d.building)),
                    &format!("No departments found on {floor}."),
                ))
            }
            "in_building" => {
                let building = call.require("building")?;
                Ok(bullet_list(
                    &format!("Departments in {building}:"),
                    self.data
                        .departments_in_building(building)
                        .into_iter()
                        .map(|d| format!("{} ({})", d.department_name, d.floor)),
                    &format!("No departments found in {building}."),
                ))
            }
            other => Err(ServerError::ToolValidation(format!("Unknown action: {other}"))),
        }
    }
}

fn summary(dept: &Department) -> String {
    format!(
        "{}: {}, {} (ext. {})",
        dept.department_name, dept.floor, dept.building, dept.contact_extension
    )
}

#[async_trait]
impl Tool for DepartmentTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: NAME.into(),
            description: "Where each department is (floor, building) and its phone extension".into(),
            parameters: vec![
                action_parameter(ACTIONS),
                text_parameter("name", "Department name or part of it"),
                text_parameter("floor", "Floor, e.g. 'Ground Floor'"),
                text_parameter("building", "Building, e.g. 'East Wing'"),
            ],
            category: Some("directory".into()),
        }
    }

    async fn execute(&self, call: &ToolCall) -> Result<ToolResult> {
        ToolResult::from_lookup(NAME, self.run(call))
    }
}
