//! Intent Routing
//!
//! Maps a visitor's question onto one record lookup. A question either names
//! something in the records (a hospital, patient, doctor, specialization,
//! condition or department) or asks about a table in general ("how many
//! hospitals", "which doctors work on Monday"). Names win over keywords, and
//! hospitals are tried first, then patients, doctors and departments.
//!
//! Questions that match nothing return `None` and go to the fallback
//! responder.

use std::sync::LazyLock;

use regex::Regex;

use crate::data::HospitalData;
use crate::tool::ToolCall;

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{4}-\d{2}-\d{2}\b").expect("valid regex"));
static ROOM_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\broom\s+(?:number\s+|no\.?\s*)?([a-z]*-?\d+)\b").expect("valid regex"));

const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Columns that identify a row rather than measure something
const IDENTITY_COLUMNS: [&str; 5] = ["hospital_id", "hospital_name", "date", "location", "region"];

/// Pick the lookup that answers `query`, if any
pub fn route(query: &str, data: &HospitalData) -> Option<ToolCall> {
    let q = query.to_lowercase();
    route_hospitals(&q, data)
        .or_else(|| route_patients(&q, data))
        .or_else(|| route_doctors(&q, data))
        .or_else(|| route_departments(&q, data))
}

fn route_hospitals(q: &str, data: &HospitalData) -> Option<ToolCall> {
    let call = |action: &str| ToolCall::new("hospital_data").arg("action", action);
    let named = mentioned_hospitals(q, data);

    if has_any(q, &["distance", "how far", "far apart"]) && (!named.is_empty() || q.contains("hospital")) {
        return Some(match named.as_slice() {
            [from, to, ..] => call("distance").arg("hospital", *from).arg("other_hospital", *to),
            _ => call("all_distances"),
        });
    }
    if has_any(q, &["how many hospital", "number of hospital", "hospital count", "count of hospital"]) {
        return Some(call("count"));
    }
    if named.is_empty() && has_any(q, &["dates", "date range", "data range"]) {
        return Some(call("date_range"));
    }
    if has_any(q, &["columns", "metrics", "what data"]) {
        return Some(call("columns"));
    }

    if let Some(&hospital) = named.first() {
        let date = ISO_DATE.find(q).map(|m| m.as_str());
        if let Some(column) = mentioned_column(q, data) {
            let lookup = call("column_value").arg("hospital", hospital).arg("column", column);
            return Some(match date {
                Some(date) => lookup.arg("date", date),
                None => lookup,
            });
        }
        return Some(match date {
            Some(date) => call("details").arg("hospital", hospital).arg("date", date),
            None => call("location").arg("hospital", hospital),
        });
    }

    if q.contains("hospital") && has_any(q, &["list", "all", "which", "name", "where", "location"]) {
        return Some(call("names"));
    }
    None
}

fn route_patients(q: &str, data: &HospitalData) -> Option<ToolCall> {
    let call = |action: &str| ToolCall::new("patients").arg("action", action);

    if let Some(patient) = data.patients().iter().find(|p| mentions(q, &p.patient_name)) {
        let action = if has_any(q, &["direction", "get to", "way to", "how do i", "reach"]) {
            "directions"
        } else {
            "find"
        };
        return Some(call(action).arg("name", patient.patient_name.as_str()));
    }
    if let Some(room) = ROOM_NUMBER.captures(q).and_then(|c| c.get(1)) {
        return Some(call("room").arg("room", room.as_str()));
    }
    if let Some(patient) = data.patients().iter().find(|p| mentions(q, &p.disease)) {
        return Some(call("disease").arg("disease", patient.disease.as_str()));
    }
    if q.contains("patient") {
        return Some(match mentioned(q, data.patients().iter().map(|p| p.floor.as_str())) {
            Some(floor) => call("floor").arg("floor", floor),
            None => call("list"),
        });
    }
    None
}

fn route_doctors(q: &str, data: &HospitalData) -> Option<ToolCall> {
    let call = |action: &str| ToolCall::new("doctors").arg("action", action);

    if let Some(doctor) = data.doctors().iter().find(|d| mentions(q, d.plain_name())) {
        return Some(call("find").arg("name", doctor.plain_name()));
    }
    if let Some(doctor) = data.doctors().iter().find(|d| mentions(q, &d.specialization)) {
        return Some(call("specialization").arg("specialization", doctor.specialization.as_str()));
    }
    if !has_any(q, &["doctor", "physician", "dr."]) {
        return None;
    }

    if let Some(day) = WEEKDAYS.iter().find(|day| q.contains(**day)) {
        return Some(call("on_day").arg("day", capitalize(day)));
    }
    if let Some(dept) = data.departments().iter().find(|d| mentions(q, &d.department_name)) {
        return Some(call("department").arg("department_id", dept.department_id.as_str()));
    }
    Some(call("list"))
}

fn route_departments(q: &str, data: &HospitalData) -> Option<ToolCall> {
    let call = |action: &str| ToolCall::new("departments").arg("action", action);

    if let Some(dept) = data.departments().iter().find(|d| mentions(q, &d.department_name)) {
        return Some(call("find").arg("name", dept.department_name.as_str()));
    }
    if !q.contains("department") {
        return None;
    }

    let departments = data.departments();
    if let Some(floor) = mentioned(q, departments.iter().map(|d| d.floor.as_str())) {
        return Some(call("on_floor").arg("floor", floor));
    }
    if let Some(building) = mentioned(q, departments.iter().map(|d| d.building.as_str())) {
        return Some(call("in_building").arg("building", building));
    }
    Some(call("list"))
}

/// Hospital names mentioned in `q` (by name or id), in the order they appear
fn mentioned_hospitals<'a>(q: &str, data: &'a HospitalData) -> Vec<&'a str> {
    let mut found: Vec<(usize, &str)> = data
        .hospitals()
        .into_iter()
        .filter_map(|h| {
            let at = find_ci(q, &h.hospital_name).or_else(|| find_ci(q, &h.hospital_id))?;
            Some((at, h.hospital_name.as_str()))
        })
        .collect();
    found.sort_by_key(|(at, _)| *at);
    found.into_iter().map(|(_, name)| name).collect()
}

/// Longest measured column named in `q`, written either `beds_available`
/// or `beds available`
fn mentioned_column<'a>(q: &str, data: &'a HospitalData) -> Option<&'a str> {
    data.columns()
        .iter()
        .map(String::as_str)
        .filter(|c| !IDENTITY_COLUMNS.contains(c))
        .filter(|c| q.contains(*c) || q.contains(&c.replace('_', " ")))
        .max_by_key(|c| c.len())
}

/// First of `candidates` that `q` mentions
fn mentioned<'a>(q: &str, candidates: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    candidates.into_iter().find(|c| mentions(q, c))
}

fn mentions(q: &str, name: &str) -> bool {
    find_ci(q, name).is_some()
}

/// Position of `needle` in the already-lowercased `q`
fn find_ci(q: &str, needle: &str) -> Option<usize> {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    q.find(&needle)
}

fn has_any(q: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| q.contains(k))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixture;

    fn routed(query: &str) -> (String, Option<String>) {
        let call = route(query, &fixture()).unwrap_or_else(|| panic!("no route for {query:?}"));
        let action = call.str_arg("action").map(String::from);
        (call.name, action)
    }

    fn arg(query: &str, key: &str) -> String {
        route(query, &fixture()).unwrap().str_arg(key).unwrap().to_string()
    }

    #[test]
    fn test_quick_questions_are_answerable() {
        let quick = reception_core::WidgetConfig::default().quick_questions;
        assert!(!quick.is_empty());
        for question in &quick {
            assert!(route(question, &fixture()).is_some(), "{question}");
        }

        assert_eq!(routed("How many hospitals are there?").1.as_deref(), Some("count"));
        assert_eq!(routed("List all hospitals and their locations").1.as_deref(), Some("names"));
        assert_eq!(routed("What dates are available?").1.as_deref(), Some("date_range"));
        assert_eq!(routed("How far apart are the hospitals?").1.as_deref(), Some("all_distances"));
    }

    #[test]
    fn test_hospital_questions() {
        let q = "What is the distance between Lakeside Community Hospital and City General Hospital?";
        assert_eq!(routed(q).1.as_deref(), Some("distance"));
        assert_eq!(arg(q, "hospital"), "Lakeside Community Hospital");
        assert_eq!(arg(q, "other_hospital"), "City General Hospital");

        assert_eq!(routed("Where is St. Mary Medical Center?").1.as_deref(), Some("location"));
        assert_eq!(routed("Show H002 on 2024-01-02").1.as_deref(), Some("details"));

        let q = "How many ICU beds occupied at H001 on 2024-01-01?";
        assert_eq!(routed(q).1.as_deref(), Some("column_value"));
        assert_eq!(arg(q, "column"), "icu_beds_occupied");
        assert_eq!(arg(q, "date"), "2024-01-01");
    }

    #[test]
    fn test_directory_questions() {
        assert_eq!(
            routed("How do I get to Emma Davis?"),
            ("patients".to_string(), Some("directions".to_string()))
        );
        assert_eq!(arg("Who is in room ICU-05?", "room"), "icu-05");
        assert_eq!(routed("Is Dr. Sarah Johnson in today?"), ("doctors".to_string(), Some("find".to_string())));
        assert_eq!(arg("Which doctors work on tuesday?", "day"), "Tuesday");
        assert_eq!(arg("I need a pediatrician", "specialization"), "Pediatrician");
        assert_eq!(routed("Where is radiology?"), ("departments".to_string(), Some("find".to_string())));
        assert_eq!(arg("Which departments are on the ground floor?", "floor"), "Ground Floor");
    }

    #[test]
    fn test_unrelated_question_is_not_routed() {
        assert!(route("What are the visiting hours?", &fixture()).is_none());
        assert!(route("Can I park my car here?", &fixture()).is_none());
    }
}
