//! Hospital Trend Tool
//!
//! Count, names, locations, per-date details, single columns, the date
//! range and great-circle distances between hospitals.

use std::fmt::Write as _;
use std::sync::Arc;

use async_trait::async_trait;

use super::{action_parameter, bullet_list, text_parameter};
use crate::data::HospitalData;
use crate::error::{Result, ServerError};
use crate::tool::{Tool, ToolCall, ToolResult, ToolSchema};

const NAME: &str = "hospital_data";
const NO_DATA: &str = "No hospital data available.";

const ACTIONS: &[&str] = &[
    "count",
    "names",
    "location",
    "details",
    "column_value",
    "columns",
    "date_range",
    "distance",
    "all_distances",
];

/// Detail sections: heading and `(label, column)` rows
const DETAIL_SECTIONS: &[(&str, &[(&str, &str)])] = &[
    ("Beds", &[("Capacity", "bed_capacity"), ("Occupied", "beds_occupied"), ("Available", "beds_available")]),
    ("ICU", &[("Total", "icu_beds_total"), ("Occupied", "icu_beds_occupied")]),
    (
        "Ventilators",
        &[("Total", "ventilators_total"), ("In use", "ventilators_in_use"), ("Available", "ventilators_available")],
    ),
    (
        "Patient activity",
        &[
            ("Admissions", "patient_admissions"),
            ("Discharges", "patient_discharges"),
            ("Emergency visits", "emergency_visits"),
            ("Surgeries", "surgery_count"),
        ],
    ),
    ("Infectious cases", &[("COVID", "covid_cases"), ("Flu", "flu_cases"), ("Other", "other_infectious_cases")]),
];

/// Staff rows: label, available column, total column
const STAFF: &[(&str, &str, &str)] = &[
    ("Doctors", "doctors_available", "doctors_total"),
    ("Nurses", "nurses_available", "nurses_total"),
    ("Paramedics", "paramedics_available", "paramedics_total"),
];

/// Lookups over the daily hospital trend table
pub struct HospitalTool {
    data: Arc<HospitalData>,
}

impl HospitalTool {
    pub const fn new(data: Arc<HospitalData>) -> Self {
        Self { data }
    }

    fn run(&self, call: &ToolCall) -> Result<String> {
        let data = &self.data;
        match call.require("action")? {
            "count" => Ok(format!("There are **{}** hospitals in the system.", data.hospital_count())),
            "names" => Ok(bullet_list(
                "Hospitals in the system:",
                data.hospitals().into_iter().map(|h| {
                    format!("{} (ID: {}), location: {}", h.hospital_name, h.hospital_id, h.location)
                }),
                NO_DATA,
            )),
            "location" => {
                let (record, coordinates) = data.location(call.require("hospital")?)?;
                Ok(format!(
                    "**{}** (ID: {})\n- Coordinates: {coordinates}\n- Region: {}",
                    record.hospital_name, record.hospital_id, record.region
                ))
            }
            "details" => self.details(call.require("hospital")?, call.require("date")?),
            "column_value" => self.column_value(call),
            "columns" => Ok(bullet_list(
                "Available columns in hospital data:",
                data.columns().iter().cloned(),
                NO_DATA,
            )),
            "date_range" => Ok(data.date_range().map_or_else(
                || NO_DATA.to_string(),
                |range| {
                    format!(
                        "**Available data range**\n- Start date: {}\n- End date: {}\n- Total days: {}\n\nDates: {}",
                        range.start,
                        range.end,
                        range.total_days(),
                        range.dates.join(", ")
                    )
                },
            )),
            "distance" => {
                let distance = data.distance(call.require("hospital")?, call.require("other_hospital")?)?;
                Ok(format!(
                    "Distance from **{}** to **{}**: **{:.2} km**\n- From: ({})\n- To: ({})",
                    distance.from, distance.to, distance.km, distance.from_coordinates, distance.to_coordinates
                ))
            }
            "all_distances" => {
                let distances = data.all_distances();
                Ok(bullet_list(
                    &format!("Distances between {} hospital pairs:", distances.len()),
                    distances
                        .iter()
                        .map(|d| format!("{} to {}: {:.2} km", d.from, d.to, d.km)),
                    NO_DATA,
                ))
            }
            other => Err(ServerError::ToolValidation(format!("Unknown action: {other}"))),
        }
    }

    fn details(&self, hospital: &str, date: &str) -> Result<String> {
        let record = self.data.details(hospital, date)?;
        let value = |column: &str| record.value(column).unwrap_or("n/a");

        let mut out = format!(
            "## {} on {}\n- ID: {}\n- Location: {}\n- Region: {}\n",
            record.hospital_name, record.date, record.hospital_id, record.location, record.region
        );
        for &(heading, rows) in DETAIL_SECTIONS {
            let _ = writeln!(out, "\n**{heading}**");
            for &(label, column) in rows {
                let _ = writeln!(out, "- {label}: {}", value(column));
            }
        }
        out.push_str("\n**Staff available**\n");
        for &(label, available, total) in STAFF {
            let _ = writeln!(out, "- {label}: {}/{}", value(available), value(total));
        }
        let _ = write!(
            out,
            "\nBurnout risk: {}\nPatient satisfaction: {}/5.0",
            value("burnout_risk_score"),
            value("avg_patient_satisfaction")
        );
        Ok(out)
    }

    fn column_value(&self, call: &ToolCall) -> Result<String> {
        let hospital = call.require("hospital")?;
        let column = call.require("column")?;
        let date = call.str_arg("date");
        let values = self.data.column_values(hospital, column, date)?;

        match (date, values.as_slice()) {
            (Some(date), [(_, value)]) => Ok(format!("{column} for {hospital} on {date}: **{value}**")),
            _ => Ok(bullet_list(
                &format!("{column} for {hospital}:"),
                values.iter().map(|(date, value)| format!("{date}: {value}")),
                NO_DATA,
            )),
        }
    }
}

#[async_trait]
impl Tool for HospitalTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: NAME.into(),
            description: "Hospital count, names, locations, daily bed/ICU/staff figures, \
                          available dates and distances between hospitals"
                .into(),
            parameters: vec![
                action_parameter(ACTIONS),
                text_parameter("hospital", "Hospital name or ID"),
                text_parameter("other_hospital", "Second hospital, for distance"),
                text_parameter("column", "Column name, for column_value"),
                text_parameter("date", "Date as YYYY-MM-DD"),
            ],
            category: Some("hospitals".into()),
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
        HospitalTool::new(Arc::new(fixture())).execute(&call).await.unwrap()
    }

    fn call(action: &str) -> ToolCall {
        ToolCall::new(NAME).arg("action", action)
    }

    #[tokio::test]
    async fn test_count() {
        let result = run(call("count")).await;
        assert!(result.success);
        assert_eq!(result.output, "There are **3** hospitals in the system.");
    }

    #[tokio::test]
    async fn test_names_include_locations() {
        let output = run(call("names")).await.output;
        assert!(output.starts_with("**Hospitals in the system:**"));
        assert!(output.contains("- City General Hospital (ID: H001), location: 40.7128,-74.0060"));
        assert_eq!(output.matches("\n- ").count(), 3);
    }

    #[tokio::test]
    async fn test_location_and_distance() {
        let output = run(call("location").arg("hospital", "Lakeside Community Hospital")).await.output;
        assert!(output.contains("Coordinates: 41.8781, -87.6298"));
        assert!(output.contains("Region: Central"));

        let output = run(call("distance").arg("hospital", "H001").arg("other_hospital", "H002"))
            .await
            .output;
        assert!(output.contains("**3935.75 km**"), "{output}");
    }

    #[tokio::test]
    async fn test_date_range_and_all_distances() {
        let output = run(call("date_range")).await.output;
        assert!(output.contains("Start date: 2024-01-01"));
        assert!(output.contains("Total days: 2"));

        let output = run(call("all_distances")).await.output;
        assert!(output.starts_with("**Distances between 3 hospital pairs:**"));
        assert!(output.contains("St. Mary Medical Center to Lakeside Community Hospital: 2803.97 km"));
    }

    #[tokio::test]
    async fn test_details_and_columns() {
        let output = run(call("details").arg("hospital", "H002").arg("date", "2024-01-01")).await.output;
        assert!(output.starts_with("## St. Mary Medical Center on 2024-01-01"));
        assert!(output.contains("- Available: 50"));
        assert!(output.contains("- Nurses: 160/210"));

        let output = run(call("column_value")
            .arg("hospital", "H003")
            .arg("column", "ventilators_available")
            .arg("date", "2024-01-02"))
        .await
        .output;
        assert_eq!(output, "ventilators_available for H003 on 2024-01-02: **9**");
    }

    #[tokio::test]
    async fn test_misses_are_failed_results() {
        let result = run(call("location").arg("hospital", "Mercy West")).await;
        assert!(!result.success);
        assert_eq!(result.output, "Hospital 'Mercy West' not found");
    }

    #[tokio::test]
    async fn test_missing_argument_is_an_error() {
        let tool = HospitalTool::new(Arc::new(fixture()));
        let err = tool.execute(&call("distance").arg("hospital", "H001")).await.unwrap_err();
        assert!(matches!(err, ServerError::ToolValidation(_)));
    }
}
