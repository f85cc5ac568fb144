//! Hospital Record Tools
//!
//! One tool per table. Each takes an `action` argument naming the lookup and
//! answers in the light markup the widget renders (bold, `- ` bullets).

mod departments;
mod doctors;
mod hospitals;
mod patients;

use std::sync::Arc;

pub use departments::DepartmentTool;
pub use doctors::DoctorTool;
pub use hospitals::HospitalTool;
pub use patients::PatientTool;

use crate::data::HospitalData;
use crate::tool::{ParameterSchema, ToolRegistry};

/// Registry holding every record tool over `data`
pub fn registry(data: &Arc<HospitalData>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(HospitalTool::new(Arc::clone(data)));
    registry.register(DepartmentTool::new(Arc::clone(data)));
    registry.register(DoctorTool::new(Arc::clone(data)));
    registry.register(PatientTool::new(Arc::clone(data)));
    registry
}

fn action_parameter(actions: &[&str]) -> ParameterSchema {
    ParameterSchema {
        name: "action".into(),
        param_type: "string".into(),
        description: format!("Lookup to run: {}", actions.join(", ")),
        required: true,
        enum_values: Some(actions.iter().map(|a| serde_json::json!(a)).collect()),
    }
}

fn text_parameter(name: &str, description: &str) -> ParameterSchema {
    ParameterSchema {
        name: name.into(),
        param_type: "string".into(),
        description: description.into(),
        required: false,
        enum_values: None,
    }
}

/// `title` followed by one bullet per item, or `empty` when there are none
fn bullet_list(title: &str, items: impl IntoIterator<Item = String>, empty: &str) -> String {
    let mut out = format!("**{title}**\n");
    let mut any = false;
    for item in items {
        any = true;
        out.push_str("- ");
        out.push_str(&item);
        out.push('\n');
    }
    if any { out.trim_end().to_string() } else { empty.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixture;

    #[test]
    fn test_registry_holds_every_table() {
        let registry = registry(&Arc::new(fixture()));
        let names: Vec<_> = registry.schemas().into_iter().map(|s| s.name).collect();
        assert_eq!(names, ["departments", "doctors", "hospital_data", "patients"]);
    }

    #[test]
    fn test_bullet_list() {
        assert_eq!(bullet_list("Rooms", ["101".to_string()], "none"), "**Rooms**\n- 101");
        assert_eq!(bullet_list("Rooms", Vec::new(), "none"), "none");
    }
}
