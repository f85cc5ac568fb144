//! Per-hospital daily trend rows and the lookups over them

use std::collections::{BTreeSet, HashMap, HashSet};
use std::io::Read;

use serde::Serialize;

use super::HospitalData;
use crate::error::{Result, ServerError};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// One hospital on one date.
///
/// Identity columns are typed; every other column (beds, ICU, staff,
/// case counts, scores...) is kept verbatim and read through [`Self::value`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HospitalRecord {
    pub hospital_id: String,
    pub hospital_name: String,
    pub date: String,
    /// `"lat,lon"`
    pub location: String,
    pub region: String,
    metrics: HashMap<String, String>,
}

impl HospitalRecord {
    fn from_row(mut row: HashMap<String, String>) -> Result<Self> {
        Ok(Self {
            hospital_id: take(&mut row, "hospital_id")?,
            hospital_name: take(&mut row, "hospital_name")?,
            date: take(&mut row, "date")?,
            location: row.remove("location").unwrap_or_default(),
            region: row.remove("region").unwrap_or_default(),
            metrics: row,
        })
    }

    /// Value of any column by name, identity columns included
    pub fn value(&self, column: &str) -> Option<&str> {
        match column {
            "hospital_id" => Some(&self.hospital_id),
            "hospital_name" => Some(&self.hospital_name),
            "date" => Some(&self.date),
            "location" => Some(&self.location),
            "region" => Some(&self.region),
            other => self.metrics.get(other).map(String::as_str),
        }
    }

    pub fn coordinates(&self) -> Result<Coordinates> {
        Coordinates::parse(&self.location)
    }

    fn is_named(&self, name: &str) -> bool {
        self.hospital_name.eq_ignore_ascii_case(name.trim())
            || self.hospital_id.eq_ignore_ascii_case(name.trim())
    }
}

fn take(row: &mut HashMap<String, String>, column: &str) -> Result<String> {
    row.remove(column)
        .ok_or_else(|| ServerError::Data(format!("missing column '{column}'")))
}

pub(super) fn read<R: Read>(mut reader: csv::Reader<R>) -> Result<(Vec<HospitalRecord>, Vec<String>)> {
    let columns = reader.headers()?.iter().map(String::from).collect();

    let mut records = Vec::new();
    for row in reader.deserialize::<HashMap<String, String>>() {
        records.push(HospitalRecord::from_row(row?)?);
    }
    Ok((records, columns))
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Parse a `"lat,lon"` location cell
    pub fn parse(location: &str) -> Result<Self> {
        let invalid = || ServerError::Data(format!("invalid coordinates '{location}'"));
        let (lat, lon) = location.split_once(',').ok_or_else(invalid)?;

        Ok(Self {
            latitude: lat.trim().parse().map_err(|_| invalid())?,
            longitude: lon.trim().parse().map_err(|_| invalid())?,
        })
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// Great-circle distance in kilometres, rounded to two decimals
pub fn haversine_km(from: Coordinates, to: Coordinates) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    (EARTH_RADIUS_KM * c * 100.0).round() / 100.0
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Distance {
    pub from: String,
    pub to: String,
    pub km: f64,
    pub from_coordinates: Coordinates,
    pub to_coordinates: Coordinates,
}

/// Dates covered by the trend table, ascending
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
    pub dates: Vec<String>,
}

impl DateRange {
    pub fn total_days(&self) -> usize {
        self.dates.len()
    }
}

impl HospitalData {
    /// Number of distinct hospital ids
    pub fn hospital_count(&self) -> usize {
        self.records
            .iter()
            .map(|r| r.hospital_id.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    /// First row of each hospital, in file order
    pub fn hospitals(&self) -> Vec<&HospitalRecord> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter(|r| seen.insert(r.hospital_id.as_str()))
            .collect()
    }

    /// Match by name or id, ignoring case
    pub fn find_hospital(&self, name: &str) -> Result<&HospitalRecord> {
        self.records
            .iter()
            .find(|r| r.is_named(name))
            .ok_or_else(|| ServerError::NotFound(format!("Hospital '{name}' not found")))
    }

    pub fn location(&self, name: &str) -> Result<(&HospitalRecord, Coordinates)> {
        let record = self.find_hospital(name)?;
        Ok((record, record.coordinates()?))
    }

    /// The row for `name` on `date`
    pub fn details(&self, name: &str, date: &str) -> Result<&HospitalRecord> {
        self.find_hospital(name)?;
        self.records
            .iter()
            .find(|r| r.is_named(name) && r.date == date.trim())
            .ok_or_else(|| {
                ServerError::NotFound(format!(
                    "No data found for hospital '{name}' on date '{date}'"
                ))
            })
    }

    /// `(date, value)` pairs of one column for one hospital; all dates unless
    /// `date` narrows it
    pub fn column_values(&self, name: &str, column: &str, date: Option<&str>) -> Result<Vec<(&str, &str)>> {
        if !self.columns.iter().any(|c| c == column) {
            return Err(ServerError::NotFound(format!(
                "Column '{column}' not found. Available columns: {}",
                self.columns.join(", ")
            )));
        }
        self.find_hospital(name)?;

        let values: Vec<_> = self
            .records
            .iter()
            .filter(|r| r.is_named(name) && date.is_none_or(|d| r.date == d.trim()))
            .filter_map(|r| Some((r.date.as_str(), r.value(column)?)))
            .collect();

        match date {
            Some(date) if values.is_empty() => Err(ServerError::NotFound(format!(
                "No data found for hospital '{name}' on date '{date}'"
            ))),
            _ => Ok(values),
        }
    }

    pub fn distance(&self, from: &str, to: &str) -> Result<Distance> {
        let (origin, from_coordinates) = self.location(from)?;
        let (target, to_coordinates) = self.location(to)?;

        Ok(Distance {
            from: origin.hospital_name.clone(),
            to: target.hospital_name.clone(),
            km: haversine_km(from_coordinates, to_coordinates),
            from_coordinates,
            to_coordinates,
        })
    }

    /// Every unordered pair of hospitals once. Hospitals whose location
    /// cannot be parsed are skipped.
    pub fn all_distances(&self) -> Vec<Distance> {
        let hospitals = self.hospitals();
        let mut distances = Vec::new();

        for a in &hospitals {
            for b in &hospitals {
                if a.hospital_id < b.hospital_id {
                    match self.distance(&a.hospital_id, &b.hospital_id) {
                        Ok(distance) => distances.push(distance),
                        Err(e) => tracing::debug!(error = %e, "Skipping hospital pair"),
                    }
                }
            }
        }
        distances
    }

    /// `None` when the trend table is empty
    pub fn date_range(&self) -> Option<DateRange> {
        let dates: Vec<String> = self
            .records
            .iter()
            .map(|r| r.date.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        Some(DateRange {
            start: dates.first()?.clone(),
            end: dates.last()?.clone(),
            dates,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixture;

    #[test]
    fn test_count_and_names() {
        let data = fixture();
        assert_eq!(data.hospital_count(), 3);

        let names: Vec<_> = data.hospitals().iter().map(|h| h.hospital_name.as_str()).collect();
        assert_eq!(
            names,
            ["City General Hospital", "St. Mary Medical Center", "Lakeside Community Hospital"]
        );
    }

    #[test]
    fn test_location_by_name_or_id() {
        let data = fixture();
        let (record, coordinates) = data.location("city general hospital").unwrap();
        assert_eq!(record.hospital_id, "H001");
        assert!((coordinates.latitude - 40.7128).abs() < 1e-9);
        assert!((coordinates.longitude + 74.006).abs() < 1e-9);

        assert_eq!(data.location("H003").unwrap().0.region, "Central");
        assert!(matches!(data.location("Nowhere"), Err(ServerError::NotFound(_))));
    }

    #[test]
    fn test_haversine_matches_known_distance() {
        let data = fixture();
        let distance = data.distance("City General Hospital", "St. Mary Medical Center").unwrap();
        assert!((distance.km - 3935.75).abs() < 0.01, "got {}", distance.km);
        assert_eq!(distance.to, "St. Mary Medical Center");

        let same = data.distance("H001", "H001").unwrap();
        assert!(same.km.abs() < f64::EPSILON);
    }

    #[test]
    fn test_all_distances_lists_each_pair_once() {
        let distances = fixture().all_distances();
        assert_eq!(distances.len(), 3);
        let chicago = distances
            .iter()
            .find(|d| d.from == "City General Hospital" && d.to == "Lakeside Community Hospital")
            .unwrap();
        assert!((chicago.km - 1144.29).abs() < 0.01);
    }

    #[test]
    fn test_date_range() {
        let range = fixture().date_range().unwrap();
        assert_eq!(range.start, "2024-01-01");
        assert_eq!(range.end, "2024-01-02");
        assert_eq!(range.total_days(), 2);
    }

    #[test]
    fn test_details_and_column_values() {
        let data = fixture();
        let row = data.details("St. Mary Medical Center", "2024-01-02").unwrap();
        assert_eq!(row.value("icu_beds_occupied"), Some("28"));

        let beds = data.column_values("H001", "beds_available", None).unwrap();
        assert_eq!(beds, [("2024-01-01", "80"), ("2024-01-02", "64")]);

        let one_day = data.column_values("H001", "beds_available", Some("2024-01-02")).unwrap();
        assert_eq!(one_day, [("2024-01-02", "64")]);
    }

    #[test]
    fn test_lookup_errors_name_the_problem() {
        let data = fixture();
        let err = data.column_values("H001", "parking_spaces", None).unwrap_err();
        assert!(err.to_string().starts_with("Column 'parking_spaces' not found"));

        let err = data.details("H002", "1999-12-31").unwrap_err();
        assert_eq!(err.to_string(), "No data found for hospital 'H002' on date '1999-12-31'");
    }

    #[test]
    fn test_bad_coordinates_are_rejected() {
        assert!(Coordinates::parse("New York, NY").is_err());
        assert!(Coordinates::parse("40.7").is_err());
    }
}
