use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::fs;

use crate::parse::Inspection;

/// One inspection as stored in the results file, keyed by its report label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEntry {
    #[serde(rename = "Facility Name: ")]
    pub facility_name: String,
    #[serde(rename = "Inspection Date: ")]
    pub inspection_date: String,
    #[serde(rename = "Street Address: ")]
    pub street_address: String,
    #[serde(rename = "City: ")]
    pub city: String,
    #[serde(rename = "State: ")]
    pub state: String,
    #[serde(rename = "Zipcode: ")]
    pub zipcode: String,
    #[serde(rename = "Inspection Type: ")]
    pub inspection_type: String,
    #[serde(rename = "Inspection Grade: ")]
    pub inspection_grade: String,
    #[serde(rename = "Out of Compliance Violations: ")]
    pub violations: String,
}

impl From<&Inspection> for ResultEntry {
    fn from(inspection: &Inspection) -> Self {
        Self {
            facility_name: inspection.facility_name.clone(),
            inspection_date: inspection.inspection_date.clone(),
            street_address: inspection.address.street.clone(),
            city: inspection.address.city.clone(),
            state: inspection.address.state.clone(),
            zipcode: inspection.address.zip.clone(),
            inspection_type: inspection.inspection_type.clone(),
            inspection_grade: inspection.grade.to_string(),
            violations: inspection.violations.clone(),
        }
    }
}

/// Keys to try, in order, for an entry whose facility name may already be taken.
fn candidate_keys(entry: &ResultEntry) -> impl Iterator<Item = String> {
    let name = entry.facility_name.clone();
    let composite = format!(
        "{} ({}, {}, {})",
        entry.facility_name, entry.street_address, entry.city, entry.inspection_date
    );
    std::iter::once(name)
        .chain(std::iter::once(composite.clone()))
        .chain((2..).map(move |n| format!("{composite} #{n}")))
}

/// Inspections keyed by facility name, in scrape order.
///
/// A repeated name with different details gets a key made from the name, address
/// and date instead. An identical repeat is dropped.
pub fn results_map(inspections: &[Inspection]) -> serde_json::Result<Map<String, Value>> {
    let mut map = Map::new();
    for inspection in inspections {
        let entry = ResultEntry::from(inspection);
        let value = serde_json::to_value(&entry)?;
        for key in candidate_keys(&entry) {
            match map.get(&key) {
                None => {
                    if key != entry.facility_name {
                        log::warn!(
                            "Facility name `{}` is already in the results, storing under `{key}`",
                            entry.facility_name
                        );
                    }
                    map.insert(key, value);
                    break;
                }
                Some(existing) if *existing == value => {
                    log::debug!("Dropping repeated inspection of `{key}`");
                    break;
                }
                Some(_) => {}
            }
        }
    }
    Ok(map)
}

/// Writes every inspection to `path`, replacing whatever was there.
pub async fn write_results(path: impl AsRef<Path>, inspections: &[Inspection]) -> crate::Result<()> {
    let map = results_map(inspections)?;
    let mut bytes = serde_json::to_vec_pretty(&map)?;
    bytes.push(b'\n');
    fs::write(path, bytes).await?;
    Ok(())
}

#[cfg(test)]
pub async fn read_results(path: impl AsRef<Path>) -> crate::Result<Vec<(String, ResultEntry)>> {
    let bytes = fs::read(path).await?;
    let map: Map<String, Value> = serde_json::from_slice(&bytes)?;
    map.into_iter()
        .map(|(key, value)| -> crate::Result<(String, ResultEntry)> {
            Ok((key, serde_json::from_value(value)?))
        })
        .collect()
}
